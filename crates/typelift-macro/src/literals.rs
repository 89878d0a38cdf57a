//! Literal-to-scalar conversion.
//!
//! Maps a literal value expression to the name of the GraphQL scalar
//! constructor that represents it at runtime. Used both for literal type
//! annotations (`status: "active"`) and for the initializer fallback when
//! a decorated field carries no annotation at all (`count = 42`).

use typelift_parser::ast::Expression;

/// The scalar constructor name for a literal expression, or `None` when
/// the expression is not a recognized literal.
///
/// Unary expressions recurse into their operand so negated numerics
/// (`-1`, `-42n`) map the same as their positive forms. Everything else
/// (templates, identifiers, calls, ...) yields no result; callers fall
/// back to the default `Object` type.
pub fn scalar_for_literal(value: &Expression) -> Option<&'static str> {
    match value {
        Expression::BooleanLiteral(_) => Some("Boolean"),
        Expression::StringLiteral(_) => Some("String"),
        Expression::IntLiteral(_) | Expression::FloatLiteral(_) => Some("Number"),
        Expression::BigIntLiteral(_) => Some("BigInt"),
        Expression::Unary(unary) => scalar_for_literal(&unary.operand),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typelift_parser::ast::{
        BooleanLiteral, IntLiteral, StringLiteral, UnaryExpression, UnaryOperator,
    };
    use typelift_parser::interner::Symbol;
    use typelift_parser::token::Span;

    fn int(value: i64) -> Expression {
        Expression::IntLiteral(IntLiteral {
            value,
            span: Span::dummy(),
        })
    }

    #[test]
    fn test_plain_literals() {
        assert_eq!(scalar_for_literal(&int(42)), Some("Number"));
        assert_eq!(
            scalar_for_literal(&Expression::StringLiteral(StringLiteral {
                value: Symbol::dummy(),
                span: Span::dummy(),
            })),
            Some("String")
        );
        assert_eq!(
            scalar_for_literal(&Expression::BooleanLiteral(BooleanLiteral {
                value: true,
                span: Span::dummy(),
            })),
            Some("Boolean")
        );
        assert_eq!(scalar_for_literal(&Expression::string(Symbol::dummy())), Some("String"));
    }

    #[test]
    fn test_negated_numeric_recurses() {
        let negated = Expression::Unary(UnaryExpression {
            operator: UnaryOperator::Minus,
            operand: Box::new(int(1)),
            span: Span::dummy(),
        });
        assert_eq!(scalar_for_literal(&negated), Some("Number"));
    }

    #[test]
    fn test_unrecognized_kinds_yield_nothing() {
        assert_eq!(scalar_for_literal(&Expression::identifier(Symbol::dummy())), None);
        assert_eq!(scalar_for_literal(&Expression::NullLiteral(Span::dummy())), None);
        // typeof is not a unary operator in this AST, so it does not recurse
        assert_eq!(
            scalar_for_literal(&Expression::typeof_of(int(1))),
            None
        );
    }
}
