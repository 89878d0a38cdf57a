//! Statement AST nodes
//!
//! This module defines the statement forms of the subset, including:
//! - Variable declarations (var, let, const)
//! - Function and class declarations with decorators
//! - Import/export declarations (with type-only imports)
//! - If/return/throw and plain blocks

use super::*;
use crate::token::Span;

/// Top-level or block-level statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Variable declaration: var/let/const
    VariableDecl(VariableDecl),

    /// Function declaration
    FunctionDecl(FunctionDecl),

    /// Class declaration
    ClassDecl(ClassDecl),

    /// Type alias declaration: type T = ...
    TypeAliasDecl(TypeAliasDecl),

    /// Import statement
    ImportDecl(ImportDecl),

    /// Export statement
    ExportDecl(ExportDecl),

    /// Expression statement (e.g. a call)
    Expression(ExpressionStatement),

    /// If statement
    If(IfStatement),

    /// Return statement
    Return(ReturnStatement),

    /// Throw statement
    Throw(ThrowStatement),

    /// Standalone block: { ... }
    ///
    /// A `{` in statement position always opens a block, never an object
    /// literal.
    Block(BlockStatement),

    /// Empty statement (;)
    Empty(Span),
}

impl Statement {
    /// Get the span of this statement
    pub fn span(&self) -> &Span {
        match self {
            Statement::VariableDecl(s) => &s.span,
            Statement::FunctionDecl(s) => &s.span,
            Statement::ClassDecl(s) => &s.span,
            Statement::TypeAliasDecl(s) => &s.span,
            Statement::ImportDecl(s) => &s.span,
            Statement::ExportDecl(s) => &s.span,
            Statement::Expression(s) => &s.span,
            Statement::If(s) => &s.span,
            Statement::Return(s) => &s.span,
            Statement::Throw(s) => &s.span,
            Statement::Block(s) => &s.span,
            Statement::Empty(span) => span,
        }
    }

    /// Check if this statement is a declaration
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            Statement::VariableDecl(_)
                | Statement::FunctionDecl(_)
                | Statement::ClassDecl(_)
                | Statement::TypeAliasDecl(_)
        )
    }
}

// ============================================================================
// Variable Declaration
// ============================================================================

/// Variable declaration: let x = 42; or var a, b;
///
/// One statement may declare several names; each gets its own
/// declarator node so bindings can be tracked per name.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    /// var, let, or const
    pub kind: VariableKind,

    /// One declarator per declared name
    pub declarations: Vec<VariableDeclarator>,

    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

/// A single declared name with optional annotation and initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub name: Identifier,
    pub type_annotation: Option<TypeAnnotation>,
    pub init: Option<Expression>,
    pub span: Span,
}

// ============================================================================
// Function Declaration
// ============================================================================

/// Function declaration
///
/// # Example
/// ```text
/// function resolve(id: string): User {
///     return registry.get(id);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// Function name
    pub name: Identifier,

    /// Type parameters (generics)
    pub type_params: Option<Vec<TypeParameter>>,

    /// Parameters
    pub params: Vec<Parameter>,

    /// Return type annotation
    pub return_type: Option<TypeAnnotation>,

    /// Function body
    pub body: BlockStatement,

    /// Is async function?
    pub is_async: bool,

    pub span: Span,
}

/// Function or constructor parameter.
///
/// Constructor parameters may carry a visibility modifier or `readonly`
/// (TypeScript parameter properties); the optional marker is `x?: T`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub decorators: Vec<Decorator>,
    pub visibility: Option<Visibility>,
    pub readonly: bool,
    pub name: Identifier,
    pub optional: bool,
    pub type_annotation: Option<TypeAnnotation>,
    /// Default value (e.g. `x: number = 10`)
    pub default_value: Option<Expression>,
    pub span: Span,
}

// ============================================================================
// Class Declaration
// ============================================================================

/// Class declaration
///
/// # Example
/// ```text
/// @ObjectType()
/// class User {
///     @Field()
///     name: string | null;
///
///     @Field()
///     tags: string[];
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    /// Decorators (@ObjectType, @InputType, etc.)
    pub decorators: Vec<Decorator>,

    /// Abstract modifier
    pub is_abstract: bool,

    pub name: Identifier,
    pub type_params: Option<Vec<TypeParameter>>,
    pub extends: Option<TypeAnnotation>,
    pub implements: Vec<TypeAnnotation>,
    pub members: Vec<ClassMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
}

/// Visibility modifier for class members and parameter properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Private,
    Protected,
    #[default]
    Public,
}

/// Field declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Decorators (@Field, @Property, etc.)
    pub decorators: Vec<Decorator>,

    pub visibility: Visibility,
    pub readonly: bool,
    pub is_static: bool,
    pub name: Identifier,

    /// Optional marker: `name?: string`
    pub optional: bool,

    pub type_annotation: Option<TypeAnnotation>,
    pub initializer: Option<Expression>,
    pub span: Span,
}

/// Method declaration (including getters and setters)
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub decorators: Vec<Decorator>,
    pub visibility: Visibility,
    pub kind: MethodKind,
    pub is_static: bool,
    pub is_async: bool,
    pub name: Identifier,
    pub type_params: Option<Vec<TypeParameter>>,
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub body: BlockStatement,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Getter,
    Setter,
}

/// Constructor declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub params: Vec<Parameter>,
    pub body: BlockStatement,
    pub span: Span,
}

// ============================================================================
// Decorators
// ============================================================================

/// Decorator: @decorator or @decorator(arg1, arg2)
#[derive(Debug, Clone, PartialEq)]
pub struct Decorator {
    /// Decorator expression (identifier, member chain, or call)
    pub expression: Expression,
    pub span: Span,
}

// ============================================================================
// Type Alias
// ============================================================================

/// Type alias: type Id = string | number;
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDecl {
    pub name: Identifier,
    pub type_params: Option<Vec<TypeParameter>>,
    pub ty: TypeAnnotation,
    pub span: Span,
}

// ============================================================================
// Control Flow Statements
// ============================================================================

/// If statement
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
    pub span: Span,
}

/// Return statement
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub span: Span,
}

/// Throw statement
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    pub value: Expression,
    pub span: Span,
}

/// Block statement: a sequence of statements wrapped in { }.
///
/// Used for function and method bodies, control-flow branches, and
/// standalone statement-level blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
    pub span: Span,
}

/// Expression statement
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}

// ============================================================================
// Module System
// ============================================================================

/// Import declaration
///
/// # Example
/// ```text
/// import { Field, ObjectType } from "type-graphql";
/// import type { Document } from "mongoose";
/// import * as mongoose from "mongoose";
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub specifiers: Vec<ImportSpecifier>,

    /// Whole-declaration type-only marker: `import type { X } from ...`
    pub type_only: bool,

    pub source: StringLiteral,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier {
    /// import { foo }, import { foo as bar }, import { type Foo }
    Named {
        name: Identifier,
        alias: Option<Identifier>,
        type_only: bool,
    },
    /// import * as foo
    Namespace(Identifier),
    /// import foo (default)
    Default(Identifier),
}

impl ImportSpecifier {
    /// The name the specifier binds in local scope.
    pub fn local_name(&self) -> &Identifier {
        match self {
            ImportSpecifier::Named { name, alias, .. } => alias.as_ref().unwrap_or(name),
            ImportSpecifier::Namespace(id) => id,
            ImportSpecifier::Default(id) => id,
        }
    }
}

/// Export declaration wrapping a declaration statement.
///
/// `export class A {}` and `export default class A {}` both wrap the
/// inner declaration; bindings introduced by the declaration behave as
/// if it were unwrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDecl {
    pub declaration: Box<Statement>,
    pub is_default: bool,
    pub span: Span,
}
