//! Statement parsing

use super::{ParseError, Parser};
use crate::ast::*;
use crate::interner::Symbol;
use crate::token::{Span, Token};

/// Parse a statement.
pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    // Check depth before entering
    parser.depth += 1;
    if parser.depth > super::guards::MAX_PARSE_DEPTH {
        parser.depth -= 1;
        return Err(ParseError::parser_limit_exceeded(
            format!(
                "maximum nesting depth ({}) exceeded in statement",
                super::guards::MAX_PARSE_DEPTH
            ),
            parser.current_span(),
        ));
    }

    // Inner function so `?` can be used freely while depth is always decremented
    let result = parse_statement_inner(parser);

    parser.depth -= 1;
    result
}

fn parse_statement_inner(parser: &mut Parser) -> Result<Statement, ParseError> {
    match parser.current() {
        Token::Var | Token::Let | Token::Const => parse_variable_declaration(parser),
        Token::Function => parse_function_declaration(parser),
        Token::Class => parse_class_declaration(parser, Vec::new()),
        Token::Import => parse_import_declaration(parser),
        Token::Export => parse_export_declaration(parser, Vec::new()),

        // Decorators may precede either the class itself or its export
        // wrapper (`@ObjectType() export class User`)
        Token::At => {
            let decorators = parse_decorators(parser)?;
            if parser.check(&Token::Export) {
                parse_export_declaration(parser, decorators)
            } else {
                parse_class_declaration(parser, decorators)
            }
        }
        Token::If => parse_if_statement(parser),
        Token::Return => parse_return_statement(parser),
        Token::Throw => parse_throw_statement(parser),

        // A `{` in statement position opens a block
        Token::LeftBrace => {
            let start_span = parser.current_span();
            parser.advance();
            let block = parse_block_statement(parser)?;
            let span = parser.combine_spans(&start_span, &block.span);
            Ok(Statement::Block(BlockStatement {
                statements: block.statements,
                span,
            }))
        }

        Token::Semicolon => {
            let span = parser.current_span();
            parser.advance();
            Ok(Statement::Empty(span))
        }

        // Contextual keywords: `async function`, `abstract class`, `type X = ...`
        Token::Identifier(_) => {
            if parser.is_contextual("async") && matches!(parser.peek(), Some(Token::Function)) {
                return parse_function_declaration(parser);
            }
            if parser.is_contextual("abstract") && matches!(parser.peek(), Some(Token::Class)) {
                return parse_class_declaration(parser, Vec::new());
            }
            if parser.is_contextual("type") && matches!(parser.peek(), Some(Token::Identifier(_)))
            {
                return parse_type_alias_declaration(parser);
            }
            parse_expression_statement(parser)
        }

        _ => parse_expression_statement(parser),
    }
}

fn parse_expression_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    let expression = super::expr::parse_expression(parser)?;

    // Optional semicolon
    if parser.check(&Token::Semicolon) {
        parser.advance();
    }

    let span = parser.combine_spans(&start_span, expression.span());

    Ok(Statement::Expression(ExpressionStatement {
        expression,
        span,
    }))
}

// ============================================================================
// Variable Declarations
// ============================================================================

/// Parse a variable declaration: let x = 1; or var a, b;
fn parse_variable_declaration(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();

    let kind = match parser.current() {
        Token::Var => VariableKind::Var,
        Token::Let => VariableKind::Let,
        Token::Const => VariableKind::Const,
        _ => return Err(parser.unexpected_token(&[Token::Var, Token::Let, Token::Const])),
    };
    parser.advance();

    let mut declarations = Vec::new();
    let mut guard = super::guards::LoopGuard::new("variable_declarators");

    loop {
        guard.check()?;
        let decl_start = parser.current_span();

        let name = parser.expect_identifier()?;

        // Definite assignment marker: x!: string
        if parser.check(&Token::Bang) && matches!(parser.peek(), Some(Token::Colon)) {
            parser.advance();
        }

        let type_annotation = if parser.check(&Token::Colon) {
            parser.advance();
            Some(super::types::parse_type_annotation(parser)?)
        } else {
            None
        };

        let init = if parser.check(&Token::Equal) {
            parser.advance();
            Some(super::expr::parse_expression(parser)?)
        } else {
            if kind == VariableKind::Const {
                return Err(ParseError::invalid_syntax(
                    "const declarations must have an initializer",
                    decl_start,
                )
                .with_suggestion("Add an initializer: const x = value;"));
            }
            None
        };

        let end_span = if let Some(ref init) = init {
            *init.span()
        } else if let Some(ref type_ann) = type_annotation {
            type_ann.span
        } else {
            name.span
        };

        declarations.push(VariableDeclarator {
            name,
            type_annotation,
            init,
            span: parser.combine_spans(&decl_start, &end_span),
        });

        if parser.check(&Token::Comma) {
            parser.advance();
        } else {
            break;
        }
    }

    // Optional semicolon
    if parser.check(&Token::Semicolon) {
        parser.advance();
    }

    let last_span = declarations[declarations.len() - 1].span;
    let span = parser.combine_spans(&start_span, &last_span);

    Ok(Statement::VariableDecl(VariableDecl {
        kind,
        declarations,
        span,
    }))
}

// ============================================================================
// Function Declarations
// ============================================================================

/// Parse a function declaration
fn parse_function_declaration(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();

    let is_async = parser.eat_contextual("async");

    parser.expect(Token::Function)?;

    let name = parser.expect_identifier()?;

    let type_params = if parser.check(&Token::Less) {
        parser.advance();
        Some(parse_type_parameters(parser)?)
    } else {
        None
    };

    parser.expect(Token::LeftParen)?;
    let params = parse_function_parameters(parser)?;
    parser.expect(Token::RightParen)?;

    let return_type = if parser.check(&Token::Colon) {
        parser.advance();
        Some(super::types::parse_type_annotation(parser)?)
    } else {
        None
    };

    parser.expect(Token::LeftBrace)?;
    let body = parse_block_statement(parser)?;

    let span = parser.combine_spans(&start_span, &body.span);

    Ok(Statement::FunctionDecl(FunctionDecl {
        name,
        type_params,
        params,
        return_type,
        body,
        is_async,
        span,
    }))
}

/// Parse function parameters (closing paren not consumed).
pub(super) fn parse_function_parameters(
    parser: &mut Parser,
) -> Result<Vec<Parameter>, ParseError> {
    let mut params = Vec::new();
    let mut guard = super::guards::LoopGuard::new("function_parameters");

    while !parser.check(&Token::RightParen) && !parser.at_eof() {
        guard.check()?;
        let start_span = parser.current_span();

        let decorators = parse_decorators(parser)?;

        // Visibility and readonly are modifiers only when a parameter name
        // follows; otherwise the word *is* the name.
        let visibility = if modifier_ahead(parser) {
            if parser.eat_contextual("public") {
                Some(Visibility::Public)
            } else if parser.eat_contextual("private") {
                Some(Visibility::Private)
            } else if parser.eat_contextual("protected") {
                Some(Visibility::Protected)
            } else {
                None
            }
        } else {
            None
        };

        let readonly = modifier_ahead(parser) && parser.eat_contextual("readonly");

        let name = parser.expect_identifier()?;

        let optional = if parser.check(&Token::Question) {
            parser.advance();
            true
        } else {
            false
        };

        let type_annotation = if parser.check(&Token::Colon) {
            parser.advance();
            Some(super::types::parse_type_annotation(parser)?)
        } else {
            None
        };

        let default_value = if parser.check(&Token::Equal) {
            parser.advance();
            Some(super::expr::parse_expression(parser)?)
        } else {
            None
        };

        let end_span = if let Some(ref default) = default_value {
            *default.span()
        } else if let Some(ref type_ann) = type_annotation {
            type_ann.span
        } else {
            name.span
        };

        params.push(Parameter {
            decorators,
            visibility,
            readonly,
            name,
            optional,
            type_annotation,
            default_value,
            span: parser.combine_spans(&start_span, &end_span),
        });

        if !parser.check(&Token::RightParen) {
            parser.expect(Token::Comma)?;
        }
    }

    Ok(params)
}

/// Check whether the current contextual word acts as a modifier: true
/// when another name-like token follows it.
fn modifier_ahead(parser: &Parser) -> bool {
    matches!(parser.current(), Token::Identifier(_))
        && matches!(
            parser.peek(),
            Some(Token::Identifier(_)) | Some(Token::Static)
        )
}

/// Parse type parameters (generics), consuming the closing `>`.
fn parse_type_parameters(parser: &mut Parser) -> Result<Vec<TypeParameter>, ParseError> {
    let mut type_params = Vec::new();
    let mut guard = super::guards::LoopGuard::new("type_parameters");

    while !parser.check(&Token::Greater) && !parser.at_eof() {
        guard.check()?;
        let start_span = parser.current_span();

        let name = parser.expect_identifier()?;

        // Optional constraint: T extends Foo
        let constraint = if parser.check(&Token::Extends) {
            parser.advance();
            Some(super::types::parse_type_annotation(parser)?)
        } else {
            None
        };

        // Optional default: T = DefaultType
        let default = if parser.check(&Token::Equal) {
            parser.advance();
            Some(super::types::parse_type_annotation(parser)?)
        } else {
            None
        };

        let end_span = if let Some(ref d) = default {
            d.span
        } else if let Some(ref c) = constraint {
            c.span
        } else {
            start_span
        };

        type_params.push(TypeParameter {
            name,
            constraint,
            default,
            span: parser.combine_spans(&start_span, &end_span),
        });

        if !parser.check(&Token::Greater) {
            parser.expect(Token::Comma)?;
        }
    }

    parser.expect(Token::Greater)?;
    Ok(type_params)
}

/// Parse a block statement: statements until `}`. The opening brace has
/// already been consumed by the caller.
pub(super) fn parse_block_statement(parser: &mut Parser) -> Result<BlockStatement, ParseError> {
    let start_span = parser.current_span();
    let mut statements = Vec::new();
    let mut guard = super::guards::LoopGuard::new("block_statements");

    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check()?;
        statements.push(parse_statement(parser)?);
    }

    let end_span = parser.current_span();
    parser.expect(Token::RightBrace)?;

    Ok(BlockStatement {
        statements,
        span: parser.combine_spans(&start_span, &end_span),
    })
}

/// Parse either a braced block or a single statement (for if branches).
fn parse_block_or_statement(parser: &mut Parser) -> Result<Box<Statement>, ParseError> {
    if parser.check(&Token::LeftBrace) {
        let start_span = parser.current_span();
        parser.advance();
        let block = parse_block_statement(parser)?;
        let span = parser.combine_spans(&start_span, &block.span);
        Ok(Box::new(Statement::Block(BlockStatement {
            statements: block.statements,
            span,
        })))
    } else {
        Ok(Box::new(parse_statement(parser)?))
    }
}

// ============================================================================
// Control Flow
// ============================================================================

/// Parse an if statement
fn parse_if_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::If)?;

    parser.expect(Token::LeftParen)?;
    let condition = super::expr::parse_expression(parser)?;
    parser.expect(Token::RightParen)?;

    let then_branch = parse_block_or_statement(parser)?;

    let else_branch = if parser.check(&Token::Else) {
        parser.advance();
        Some(parse_block_or_statement(parser)?)
    } else {
        None
    };

    let end_span = if let Some(ref e) = else_branch {
        *e.span()
    } else {
        *then_branch.span()
    };

    let span = parser.combine_spans(&start_span, &end_span);

    Ok(Statement::If(IfStatement {
        condition,
        then_branch,
        else_branch,
        span,
    }))
}

/// Parse a return statement
fn parse_return_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::Return)?;

    let value = if parser.check(&Token::Semicolon)
        || parser.check(&Token::RightBrace)
        || parser.at_eof()
    {
        None
    } else {
        Some(super::expr::parse_expression(parser)?)
    };

    if parser.check(&Token::Semicolon) {
        parser.advance();
    }

    let end_span = if let Some(ref v) = value {
        *v.span()
    } else {
        start_span
    };

    let span = parser.combine_spans(&start_span, &end_span);
    Ok(Statement::Return(ReturnStatement { value, span }))
}

/// Parse a throw statement
fn parse_throw_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::Throw)?;

    let value = super::expr::parse_expression(parser)?;

    if parser.check(&Token::Semicolon) {
        parser.advance();
    }

    let span = parser.combine_spans(&start_span, value.span());
    Ok(Statement::Throw(ThrowStatement { value, span }))
}

// ============================================================================
// Type Alias
// ============================================================================

/// Parse a type alias declaration: type Id = string | number;
fn parse_type_alias_declaration(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();

    // `type` is contextual
    if !parser.eat_contextual("type") {
        return Err(parser.unexpected_token(&[Token::Identifier(Symbol::dummy())]));
    }

    let name = parser.expect_identifier()?;

    let type_params = if parser.check(&Token::Less) {
        parser.advance();
        Some(parse_type_parameters(parser)?)
    } else {
        None
    };

    parser.expect(Token::Equal)?;
    let ty = super::types::parse_type_annotation(parser)?;

    if parser.check(&Token::Semicolon) {
        parser.advance();
    }

    let span = parser.combine_spans(&start_span, &ty.span);

    Ok(Statement::TypeAliasDecl(TypeAliasDecl {
        name,
        type_params,
        ty,
        span,
    }))
}

// ============================================================================
// Class Declarations
// ============================================================================

/// Parse a class declaration. Decorators already consumed by the caller
/// are passed in; decorators written after an `export` keyword are picked
/// up here and appended.
fn parse_class_declaration(
    parser: &mut Parser,
    mut decorators: Vec<Decorator>,
) -> Result<Statement, ParseError> {
    let start_span = match decorators.first() {
        Some(decorator) => decorator.span,
        None => parser.current_span(),
    };

    let mut trailing = parse_decorators(parser)?;
    decorators.append(&mut trailing);

    let is_abstract = parser.eat_contextual("abstract");

    parser.expect(Token::Class)?;

    let name = parser.expect_identifier()?;

    let type_params = if parser.check(&Token::Less) {
        parser.advance();
        Some(parse_type_parameters(parser)?)
    } else {
        None
    };

    let extends = if parser.check(&Token::Extends) {
        parser.advance();
        Some(super::types::parse_type_annotation(parser)?)
    } else {
        None
    };

    let mut implements = Vec::new();
    if parser.is_contextual("implements") {
        parser.advance();
        let mut guard = super::guards::LoopGuard::new("implements_clause");
        loop {
            guard.check()?;
            implements.push(super::types::parse_type_annotation(parser)?);
            if parser.check(&Token::Comma) {
                parser.advance();
            } else {
                break;
            }
        }
    }

    parser.expect(Token::LeftBrace)?;
    let members = parse_class_members(parser)?;
    let end_span = parser.current_span();
    parser.expect(Token::RightBrace)?;

    let span = parser.combine_spans(&start_span, &end_span);

    Ok(Statement::ClassDecl(ClassDecl {
        decorators,
        is_abstract,
        name,
        type_params,
        extends,
        implements,
        members,
        span,
    }))
}

/// Parse class members (fields, methods, constructor)
fn parse_class_members(parser: &mut Parser) -> Result<Vec<ClassMember>, ParseError> {
    let mut members = Vec::new();
    let mut guard = super::guards::LoopGuard::new("class_members");

    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check()?;

        // Stray semicolons between members are legal
        if parser.check(&Token::Semicolon) {
            parser.advance();
            continue;
        }

        members.push(parse_class_member(parser)?);
    }

    Ok(members)
}

/// Parse a single class member
fn parse_class_member(parser: &mut Parser) -> Result<ClassMember, ParseError> {
    let start_span = parser.current_span();

    let decorators = parse_decorators(parser)?;

    // Modifiers are contextual except `static`; each applies only when a
    // member name still follows.
    let visibility = if member_modifier_ahead(parser) {
        if parser.eat_contextual("private") {
            Visibility::Private
        } else if parser.eat_contextual("protected") {
            Visibility::Protected
        } else if parser.eat_contextual("public") {
            Visibility::Public
        } else {
            Visibility::Public
        }
    } else {
        Visibility::Public
    };

    let is_static = if parser.check(&Token::Static)
        && !matches!(
            parser.peek(),
            Some(Token::Colon)
                | Some(Token::Equal)
                | Some(Token::LeftParen)
                | Some(Token::Question)
                | Some(Token::Semicolon)
        ) {
        parser.advance();
        true
    } else {
        false
    };

    let readonly = member_modifier_ahead(parser) && parser.eat_contextual("readonly");

    let is_async = member_modifier_ahead(parser) && parser.eat_contextual("async");

    let kind = if member_modifier_ahead(parser) && parser.eat_contextual("get") {
        MethodKind::Getter
    } else if member_modifier_ahead(parser) && parser.eat_contextual("set") {
        MethodKind::Setter
    } else {
        MethodKind::Method
    };

    let name = parse_member_name(parser)?;

    // Constructor is recognized by name
    if parser.resolve(name.name) == "constructor" {
        return parse_constructor(parser, start_span);
    }

    // Method if type params or parens follow, field otherwise
    if parser.check(&Token::Less) || parser.check(&Token::LeftParen) {
        let type_params = if parser.check(&Token::Less) {
            parser.advance();
            Some(parse_type_parameters(parser)?)
        } else {
            None
        };

        parser.expect(Token::LeftParen)?;
        let params = parse_function_parameters(parser)?;
        parser.expect(Token::RightParen)?;

        let return_type = if parser.check(&Token::Colon) {
            parser.advance();
            Some(super::types::parse_type_annotation(parser)?)
        } else {
            None
        };

        parser.expect(Token::LeftBrace)?;
        let body = parse_block_statement(parser)?;

        let span = parser.combine_spans(&start_span, &body.span);

        Ok(ClassMember::Method(MethodDecl {
            decorators,
            visibility,
            kind,
            is_static,
            is_async,
            name,
            type_params,
            params,
            return_type,
            body,
            span,
        }))
    } else {
        let optional = if parser.check(&Token::Question) {
            parser.advance();
            true
        } else {
            false
        };

        // Definite assignment marker: name!: string
        if parser.check(&Token::Bang) && matches!(parser.peek(), Some(Token::Colon)) {
            parser.advance();
        }

        let type_annotation = if parser.check(&Token::Colon) {
            parser.advance();
            Some(super::types::parse_type_annotation(parser)?)
        } else {
            None
        };

        let initializer = if parser.check(&Token::Equal) {
            parser.advance();
            Some(super::expr::parse_expression(parser)?)
        } else {
            None
        };

        if parser.check(&Token::Semicolon) {
            parser.advance();
        }

        let end_span = if let Some(ref init) = initializer {
            *init.span()
        } else if let Some(ref ta) = type_annotation {
            ta.span
        } else {
            name.span
        };

        let span = parser.combine_spans(&start_span, &end_span);

        Ok(ClassMember::Field(FieldDecl {
            decorators,
            visibility,
            readonly,
            is_static,
            name,
            optional,
            type_annotation,
            initializer,
            span,
        }))
    }
}

/// Check whether a contextual member modifier is ahead: the next token
/// must still be able to start a member name.
fn member_modifier_ahead(parser: &Parser) -> bool {
    if !matches!(parser.current(), Token::Identifier(_)) && !parser.check(&Token::Static) {
        return false;
    }
    match parser.peek() {
        Some(Token::Identifier(_)) | Some(Token::Static) => true,
        Some(tok) => tok.is_keyword(),
        None => false,
    }
}

/// Parse a member name: identifier or keyword spelling.
fn parse_member_name(parser: &mut Parser) -> Result<Identifier, ParseError> {
    match parser.current() {
        Token::Identifier(_) => parser.expect_identifier(),
        tok if tok.is_keyword() => {
            let spelling = tok.to_string();
            let span = parser.current_span();
            parser.advance();
            let name = parser.intern(&spelling);
            Ok(Identifier { name, span })
        }
        _ => Err(parser.unexpected_token(&[Token::Identifier(Symbol::dummy())])),
    }
}

/// Parse a constructor
fn parse_constructor(parser: &mut Parser, start_span: Span) -> Result<ClassMember, ParseError> {
    parser.expect(Token::LeftParen)?;
    let params = parse_function_parameters(parser)?;
    parser.expect(Token::RightParen)?;

    parser.expect(Token::LeftBrace)?;
    let body = parse_block_statement(parser)?;

    let span = parser.combine_spans(&start_span, &body.span);

    Ok(ClassMember::Constructor(ConstructorDecl {
        params,
        body,
        span,
    }))
}

// ============================================================================
// Decorator Parsing
// ============================================================================

/// Parse decorators: @name, @name(args), @ns.name(args)
pub(super) fn parse_decorators(parser: &mut Parser) -> Result<Vec<Decorator>, ParseError> {
    let mut decorators = Vec::new();
    let mut guard = super::guards::LoopGuard::new("decorators");

    while parser.check(&Token::At) {
        guard.check()?;
        decorators.push(parse_decorator(parser)?);
    }

    Ok(decorators)
}

/// Parse a single decorator
fn parse_decorator(parser: &mut Parser) -> Result<Decorator, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::At)?;

    let ident = parser.expect_identifier()?;
    let mut expression = Expression::Identifier(ident);

    // Member access: @module.decorator
    let mut guard = super::guards::LoopGuard::new("decorator_member_chain");
    while parser.check(&Token::Dot) {
        guard.check()?;
        parser.advance();
        let property = parser.expect_identifier()?;
        let span = parser.combine_spans(expression.span(), &property.span);

        expression = Expression::Member(MemberExpression {
            object: Box::new(expression),
            property,
            optional: false,
            span,
        });
    }

    // Calls: @decorator(args), possibly chained @factory(a)(b)
    guard.reset();
    while parser.check(&Token::LeftParen) {
        guard.check()?;
        let call_start = *expression.span();
        parser.advance();

        let mut arguments = Vec::new();
        let mut args_guard = super::guards::LoopGuard::new("decorator_args");

        if !parser.check(&Token::RightParen) {
            loop {
                args_guard.check()?;
                arguments.push(super::expr::parse_expression(parser)?);
                if parser.check(&Token::Comma) {
                    parser.advance();
                } else {
                    break;
                }
            }
        }

        let end_span = parser.current_span();
        parser.expect(Token::RightParen)?;

        let span = parser.combine_spans(&call_start, &end_span);
        expression = Expression::Call(CallExpression {
            callee: Box::new(expression),
            arguments,
            span,
        });
    }

    let span = parser.combine_spans(&start_span, expression.span());
    Ok(Decorator { expression, span })
}

// ============================================================================
// Import Declaration
// ============================================================================

/// Parse an import declaration
fn parse_import_declaration(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::Import)?;

    // Side-effect import: import "polyfill";
    if let Token::StringLiteral(value) = parser.current() {
        let value = *value;
        let source_span = parser.current_span();
        parser.advance();

        if parser.check(&Token::Semicolon) {
            parser.advance();
        }

        let span = parser.combine_spans(&start_span, &source_span);
        return Ok(Statement::ImportDecl(ImportDecl {
            specifiers: Vec::new(),
            type_only: false,
            source: StringLiteral {
                value,
                span: source_span,
            },
            span,
        }));
    }

    // `import type ...` unless `type` is itself the default binding
    // (`import type from "mod"`)
    let type_only =
        parser.is_contextual("type") && !matches!(parser.peek(), Some(Token::From));
    if type_only {
        parser.advance();
    }

    let mut specifiers = Vec::new();

    if parser.check(&Token::LeftBrace) {
        // import { foo, bar as baz } from "module"
        parser.advance();
        specifiers = parse_named_imports(parser)?;
        parser.expect(Token::RightBrace)?;
    } else if parser.check(&Token::Star) {
        // import * as foo from "module"
        parser.advance();
        if !parser.eat_contextual("as") {
            return Err(parser.unexpected_token(&[Token::Identifier(Symbol::dummy())]));
        }
        let alias = parser.expect_identifier()?;
        specifiers.push(ImportSpecifier::Namespace(alias));
    } else if matches!(parser.current(), Token::Identifier(_)) {
        // import foo from "module" (default import)
        let name = parser.expect_identifier()?;
        specifiers.push(ImportSpecifier::Default(name));

        // import foo, { bar } from "module"
        if parser.check(&Token::Comma) {
            parser.advance();
            parser.expect(Token::LeftBrace)?;
            let mut named = parse_named_imports(parser)?;
            specifiers.append(&mut named);
            parser.expect(Token::RightBrace)?;
        }
    } else {
        return Err(parser.unexpected_token(&[
            Token::LeftBrace,
            Token::Star,
            Token::Identifier(Symbol::dummy()),
        ]));
    }

    parser.expect(Token::From)?;

    let source = if let Token::StringLiteral(value) = parser.current() {
        let value = *value;
        let source_span = parser.current_span();
        parser.advance();
        StringLiteral {
            value,
            span: source_span,
        }
    } else {
        return Err(parser.unexpected_token(&[Token::StringLiteral(Symbol::dummy())]));
    };

    if parser.check(&Token::Semicolon) {
        parser.advance();
    }

    let span = parser.combine_spans(&start_span, &source.span);

    Ok(Statement::ImportDecl(ImportDecl {
        specifiers,
        type_only,
        source,
        span,
    }))
}

/// Parse named imports: foo, bar as baz, type Qux
fn parse_named_imports(parser: &mut Parser) -> Result<Vec<ImportSpecifier>, ParseError> {
    let mut specifiers = Vec::new();
    let mut guard = super::guards::LoopGuard::new("named_imports");

    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check()?;

        // Per-specifier type-only marker: { type Foo }
        let type_only = parser.is_contextual("type")
            && matches!(parser.peek(), Some(Token::Identifier(_)));
        if type_only {
            parser.advance();
        }

        let name = parse_member_name(parser)?;

        // Optional `as` alias
        let alias = if parser.is_contextual("as") {
            parser.advance();
            Some(parser.expect_identifier()?)
        } else {
            None
        };

        specifiers.push(ImportSpecifier::Named {
            name,
            alias,
            type_only,
        });

        if parser.check(&Token::Comma) {
            parser.advance();
        } else {
            break;
        }
    }

    Ok(specifiers)
}

// ============================================================================
// Export Declaration
// ============================================================================

/// Parse an export declaration. Decorators written before the `export`
/// keyword arrive through `decorators` and belong to the exported class.
fn parse_export_declaration(
    parser: &mut Parser,
    decorators: Vec<Decorator>,
) -> Result<Statement, ParseError> {
    let start_span = match decorators.first() {
        Some(decorator) => decorator.span,
        None => parser.current_span(),
    };
    parser.expect(Token::Export)?;

    // Specifier-only and re-export forms are outside the subset
    if parser.check(&Token::LeftBrace) {
        return Err(ParseError::unsupported_feature(
            "export specifier lists",
            parser.current_span(),
        ));
    }
    if parser.check(&Token::Star) {
        return Err(ParseError::unsupported_feature(
            "re-exports",
            parser.current_span(),
        ));
    }

    let is_default = if parser.check(&Token::Default) {
        parser.advance();
        true
    } else {
        false
    };

    let starts_class = parser.check(&Token::Class)
        || parser.check(&Token::At)
        || (parser.is_contextual("abstract") && matches!(parser.peek(), Some(Token::Class)));

    if !decorators.is_empty() && !starts_class {
        return Err(ParseError::invalid_syntax(
            "decorators are only valid on class declarations",
            start_span,
        ));
    }

    let declaration = match parser.current() {
        Token::Var | Token::Let | Token::Const => parse_variable_declaration(parser)?,
        Token::Function => parse_function_declaration(parser)?,
        Token::Class | Token::At => parse_class_declaration(parser, decorators)?,
        Token::Identifier(_) => {
            if parser.is_contextual("async") && matches!(parser.peek(), Some(Token::Function)) {
                parse_function_declaration(parser)?
            } else if parser.is_contextual("abstract")
                && matches!(parser.peek(), Some(Token::Class))
            {
                parse_class_declaration(parser, decorators)?
            } else if parser.is_contextual("type")
                && matches!(parser.peek(), Some(Token::Identifier(_)))
            {
                parse_type_alias_declaration(parser)?
            } else if is_default {
                parse_expression_statement(parser)?
            } else {
                return Err(parser.unexpected_token(&[
                    Token::Class,
                    Token::Function,
                    Token::Let,
                    Token::Const,
                ]));
            }
        }
        _ if is_default => parse_expression_statement(parser)?,
        _ => {
            return Err(parser.unexpected_token(&[
                Token::Class,
                Token::Function,
                Token::Let,
                Token::Const,
                Token::Default,
            ]));
        }
    };

    let span = parser.combine_spans(&start_span, declaration.span());

    Ok(Statement::ExportDecl(ExportDecl {
        declaration: Box::new(declaration),
        is_default,
        span,
    }))
}
