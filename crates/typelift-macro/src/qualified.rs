//! Qualified-name reification.
//!
//! A dotted type name (`Types.ObjectId`, `mongoose.Types.ObjectId`)
//! frequently refers to an enum or namespace that exists only at the type
//! level, or that is initialized later in module-evaluation order.
//! Emitting `A.B.C` directly can throw at decorator-evaluation time, so
//! the resolver builds a guarded expression instead:
//!
//! ```text
//! typeof (_ref = typeof A !== "undefined" && A?.B?.C) === "function" ? _ref : Object
//! ```
//!
//! The outermost identifier gets a `typeof` existence check, every member
//! access is optional, and the final value must be callable; anything
//! else short-circuits to `Object`. The resolved value is cached in a
//! declared temporary so the chain evaluates once.
//!
//! Resolutions are memoized per (hoist scope, chain spelling): repeated
//! reification of the same chain reuses the same temporary and yields
//! clones of the same expression.

use rustc_hash::FxHashMap;
use typelift_parser::ast::{BinaryOperator, EntityName, Expression, Identifier, LogicalOperator};
use typelift_parser::interner::Interner;

use crate::scope::ScopeId;
use crate::uid::TempGenerator;

/// Per-invocation resolver with its memo cache.
#[derive(Debug, Default)]
pub struct QualifiedResolver {
    memo: FxHashMap<(ScopeId, String), Expression>,
}

impl QualifiedResolver {
    /// A resolver with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The guarded expression for a qualified name, with its temporary
    /// hoisted to `hoist`.
    pub fn resolve(
        &mut self,
        temps: &mut TempGenerator,
        interner: &mut Interner,
        hoist: ScopeId,
        name: &EntityName,
    ) -> Expression {
        let key = (hoist, name.to_string(interner));
        if let Some(cached) = self.memo.get(&key) {
            return cached.clone();
        }

        let temp = temps.fresh(interner, hoist);
        let undefined = interner.intern("undefined");
        let function = interner.intern("function");
        let object = interner.intern("Object");

        // typeof A !== "undefined" && A?.B?.C
        let guard = Expression::logical(
            LogicalOperator::And,
            Expression::binary(
                BinaryOperator::StrictNotEqual,
                Expression::typeof_of(Expression::identifier(name.leftmost().name)),
                Expression::string(undefined),
            ),
            optional_chain(name),
        );

        // typeof (_ref = <guard>) === "function" ? _ref : Object
        let expr = Expression::conditional(
            Expression::binary(
                BinaryOperator::StrictEqual,
                Expression::typeof_of(Expression::assign(
                    Expression::Identifier(temp.clone()),
                    guard,
                )),
                Expression::string(function),
            ),
            Expression::Identifier(temp),
            Expression::identifier(object),
        );

        self.memo.insert(key, expr.clone());
        expr
    }
}

/// The member-access mirror of an entity name, every access optional.
///
/// A single-segment name is already a plain identifier and is returned
/// unchanged; recursion terminates there.
pub fn optional_chain(name: &EntityName) -> Expression {
    match name {
        EntityName::Ident(id) => Expression::identifier(id.name),
        EntityName::Qualified(q) => Expression::member(
            optional_chain(&q.left),
            Identifier::synthesized(q.right.name),
            true,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structural;
    use typelift_parser::ast::{Statement, Type};
    use typelift_parser::Parser;

    fn parse_entity(source: &str) -> (EntityName, Interner) {
        let full = format!("var _: {};", source);
        let (module, interner) = Parser::new(&full).unwrap().parse().unwrap();
        let Statement::VariableDecl(decl) = &module.statements[0] else {
            panic!("expected variable declaration");
        };
        let Type::Reference(reference) = decl.declarations[0]
            .type_annotation
            .clone()
            .unwrap()
            .ty
        else {
            panic!("expected type reference");
        };
        (reference.name, interner)
    }

    #[test]
    fn test_optional_chain_marks_every_access_optional() {
        let (name, interner) = parse_entity("a.b.c");
        let chain = optional_chain(&name);

        let Expression::Member(outer) = &chain else {
            panic!("expected member access");
        };
        assert!(outer.optional);
        assert_eq!(interner.resolve(outer.property.name), "c");

        let Expression::Member(inner) = outer.object.as_ref() else {
            panic!("expected nested member access");
        };
        assert!(inner.optional);
        assert_eq!(interner.resolve(inner.property.name), "b");
    }

    #[test]
    fn test_single_segment_is_returned_unchanged() {
        let (name, interner) = parse_entity("User");
        let Expression::Identifier(id) = optional_chain(&name) else {
            panic!("expected identifier");
        };
        assert_eq!(interner.resolve(id.name), "User");
    }

    #[test]
    fn test_guarded_expression_shape() {
        let (name, mut interner) = parse_entity("Types.ObjectId");
        let mut temps = TempGenerator::new();
        let mut resolver = QualifiedResolver::new();

        let expr = resolver.resolve(&mut temps, &mut interner, ScopeId(0), &name);

        let Expression::Conditional(cond) = &expr else {
            panic!("expected conditional");
        };
        // Consequent is the temporary, alternate the placeholder.
        let Expression::Identifier(temp) = cond.consequent.as_ref() else {
            panic!("expected temp identifier");
        };
        assert_eq!(interner.resolve(temp.name), "_ref");
        let Expression::Identifier(fallback) = cond.alternate.as_ref() else {
            panic!("expected fallback identifier");
        };
        assert_eq!(interner.resolve(fallback.name), "Object");

        // Test: typeof (_ref = ...) === "function"
        let Expression::Binary(test) = cond.test.as_ref() else {
            panic!("expected binary test");
        };
        assert_eq!(test.operator, BinaryOperator::StrictEqual);
        let Expression::Typeof(typeof_expr) = test.left.as_ref() else {
            panic!("expected typeof");
        };
        let Expression::Assignment(assignment) = typeof_expr.argument.as_ref() else {
            panic!("expected single temporary assignment");
        };
        // The chain is evaluated exactly once, inside the assignment.
        let Expression::Logical(guard) = assignment.right.as_ref() else {
            panic!("expected existence guard");
        };
        assert_eq!(guard.operator, LogicalOperator::And);
    }

    #[test]
    fn test_resolutions_are_memoized_per_scope_and_spelling() {
        let (name, mut interner) = parse_entity("Types.ObjectId");
        let mut temps = TempGenerator::new();
        let mut resolver = QualifiedResolver::new();

        let first = resolver.resolve(&mut temps, &mut interner, ScopeId(0), &name);
        let second = resolver.resolve(&mut temps, &mut interner, ScopeId(0), &name);
        assert!(structural::expr_eq(&first, &second));
        assert_eq!(temps.declared().len(), 1);

        // A different hoist scope gets its own temporary.
        let elsewhere = resolver.resolve(&mut temps, &mut interner, ScopeId(3), &name);
        assert!(!structural::expr_eq(&first, &elsewhere));
        assert_eq!(temps.declared().len(), 2);
    }
}
