//! The reification engine.
//!
//! `Reifier::reify` turns a TypeScript type annotation (or, failing that,
//! a literal initializer) into a runtime expression a decorator argument
//! can evaluate. Overrides win over everything; unions collapse with
//! nullability extraction; arrays wrap their element; type references go
//! through the qualified-name resolver or the binding-safety check; every
//! shape the engine cannot represent precisely degrades to `Object`
//! rather than erroring.

use typelift_parser::ast::{
    BinaryOperator, EntityName, Expression, KeywordType, Type, TypeAnnotation, TypeReference,
};
use typelift_parser::Interner;

use crate::imports::{ImportMap, RuntimeModule};
use crate::literals;
use crate::overrides::OverrideTable;
use crate::qualified::QualifiedResolver;
use crate::scope::{BindingTable, ScopeId};
use crate::structural;
use crate::uid::TempGenerator;

/// The reifier's sole output: a runtime type expression plus the
/// nullability extracted from union members.
///
/// `nullable` is set only while walking union members; no other path
/// touches it. Nested recursive calls share one flag, so a union anywhere
/// in the walked tree (inside an array element type, for instance) marks
/// the outer descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ReifiedType {
    /// Runtime expression for the deduced type, absent when the
    /// literal-fallback path found nothing to deduce
    pub ty: Option<Expression>,
    /// Did a union include an explicit `null`/`undefined` member?
    pub nullable: bool,
}

/// Per-invocation reification engine.
///
/// Owns the invocation's interner and memoizing subsystems (runtime
/// imports, declared temporaries, qualified-name resolutions); the
/// binding table and override table are compiled by the caller and moved
/// in. One engine serves one source file and is discarded with it.
pub struct Reifier {
    interner: Interner,
    bindings: BindingTable,
    overrides: OverrideTable,
    imports: ImportMap,
    temps: TempGenerator,
    qualified: QualifiedResolver,
}

impl Reifier {
    /// Build an engine from the invocation's compiled inputs.
    pub fn new(interner: Interner, bindings: BindingTable, overrides: OverrideTable) -> Self {
        Self {
            interner,
            bindings,
            overrides,
            imports: ImportMap::new(),
            temps: TempGenerator::new(),
            qualified: QualifiedResolver::new(),
        }
    }

    /// Reify one decorated symbol's type.
    ///
    /// `scope` is the scope enclosing the decorated declaration; `value`
    /// is the optional initializer used as a fallback when no annotation
    /// is present.
    pub fn reify(
        &mut self,
        scope: ScopeId,
        type_annotation: Option<&TypeAnnotation>,
        value: Option<&Expression>,
    ) -> ReifiedType {
        let Some(annotation) = type_annotation else {
            return match value {
                Some(value) => ReifiedType {
                    ty: literals::scalar_for_literal(value)
                        .map(|name| Expression::identifier(self.interner.intern(name))),
                    nullable: false,
                },
                None => ReifiedType {
                    ty: Some(self.placeholder()),
                    nullable: false,
                },
            };
        };

        let mut nullable = false;
        let ty = self.reify_type(scope, &annotation.ty, &mut nullable);
        ReifiedType {
            ty: Some(ty),
            nullable,
        }
    }

    /// The interner the engine works against.
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Runtime imports requested so far.
    pub fn imports(&self) -> &ImportMap {
        &self.imports
    }

    /// Temporaries declared so far.
    pub fn temps(&self) -> &TempGenerator {
        &self.temps
    }

    // ====================================================================
    // Structural dispatch
    // ====================================================================

    fn reify_type(&mut self, scope: ScopeId, ty: &Type, nullable: &mut bool) -> Expression {
        // Overrides are consulted before any structural dispatch, on
        // every recursion level.
        if let Some(replacement) = self.overrides.lookup(ty) {
            return replacement.clone();
        }

        match ty {
            Type::Union(union) => {
                let mut result: Option<Expression> = None;
                for member in &union.types {
                    if member.ty.is_nullish() {
                        *nullable = true;
                        continue;
                    }
                    let reified = self.reify_type(scope, &member.ty, nullable);
                    match &result {
                        None => result = Some(reified),
                        Some(first) if structural::expr_eq(first, &reified) => {}
                        // Heterogeneous union: collapse immediately;
                        // members past the mismatch are not visited.
                        Some(_) => return self.placeholder(),
                    }
                }
                result.unwrap_or_else(|| self.placeholder())
            }

            Type::Literal(literal) => match literals::scalar_for_literal(&literal.expression) {
                Some(name) => Expression::identifier(self.interner.intern(name)),
                None => self.placeholder(),
            },

            Type::Keyword(KeywordType::String) => self.scalar("String"),
            Type::Keyword(KeywordType::Number) => self.scalar("Number"),
            Type::Keyword(KeywordType::Boolean) => self.scalar("Boolean"),

            Type::Array(array) => Expression::array(vec![self.reify_type(
                scope,
                &array.element_type.ty,
                nullable,
            )]),

            Type::Reference(reference) => self.reify_reference(scope, reference),

            // Parentheses carry no meaning of their own.
            Type::Parenthesized(inner) => self.reify_type(scope, &inner.ty, nullable),

            // Everything else is beyond precise reification.
            _ => self.placeholder(),
        }
    }

    fn reify_reference(&mut self, scope: ScopeId, reference: &TypeReference) -> Expression {
        let ident = match &reference.name {
            EntityName::Qualified(_) => {
                let hoist = self.bindings.hoist_scope(scope);
                return self.qualified.resolve(
                    &mut self.temps,
                    &mut self.interner,
                    hoist,
                    &reference.name,
                );
            }
            EntityName::Ident(ident) => ident,
        };

        enum Special {
            NumericAlias,
            Date,
            JsonObject,
            Plain,
        }
        let special = match self.interner.resolve(ident.name) {
            // The schema library's numeric scalars, imported verbatim.
            "Int" | "Float" | "int" => Special::NumericAlias,
            "Date" => Special::Date,
            // Map types degrade to an opaque JSON scalar; with any other
            // argument count `Record` is treated as an ordinary name.
            "Record" if reference.type_args.as_ref().is_some_and(|args| args.len() == 2) => {
                Special::JsonObject
            }
            _ => Special::Plain,
        };

        match special {
            Special::NumericAlias => {
                self.imports
                    .import(&mut self.interner, RuntimeModule::TypeGraphQL, ident.name)
            }
            Special::Date => Expression::identifier(ident.name),
            Special::JsonObject => {
                let symbol = self.interner.intern("GraphQLJSONObject");
                self.imports
                    .import(&mut self.interner, RuntimeModule::GraphQLTypeJson, symbol)
            }
            Special::Plain => {
                if self.bindings.is_safe_reference(scope, ident.name) {
                    // Direct reference; generic arguments are dropped.
                    Expression::Identifier(ident.clone())
                } else {
                    self.guarded_reference(ident.name)
                }
            }
        }
    }

    /// `typeof X === "undefined" ? Object : X` for names whose
    /// initialization order cannot be verified.
    fn guarded_reference(
        &mut self,
        name: typelift_parser::interner::Symbol,
    ) -> Expression {
        let undefined = self.interner.intern("undefined");
        Expression::conditional(
            Expression::binary(
                BinaryOperator::StrictEqual,
                Expression::typeof_of(Expression::identifier(name)),
                Expression::string(undefined),
            ),
            self.placeholder(),
            Expression::identifier(name),
        )
    }

    fn scalar(&mut self, name: &str) -> Expression {
        Expression::identifier(self.interner.intern(name))
    }

    /// The default `Object` placeholder.
    fn placeholder(&mut self) -> Expression {
        Expression::identifier(self.interner.intern("Object"))
    }
}
