//! Expression AST nodes
//!
//! This module defines all expression forms in the subset, including:
//! - Literal expressions (numbers, strings, booleans, arrays, objects)
//! - Unary, binary, logical, and assignment operations
//! - Calls, member chains, and index access
//! - Arrow functions and `typeof`/`await` operators
//!
//! Associated constructors at the bottom build synthesized expressions
//! with dummy spans, used when assembling runtime type expressions.

use super::*;
use crate::interner::Symbol;
use crate::token::Span;

/// Expression (produces a value)
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Integer literal: 42, 0xFF, 0b1010
    IntLiteral(IntLiteral),

    /// Float literal: 3.14, 1.0e10
    FloatLiteral(FloatLiteral),

    /// Bigint literal: 9007199254740993n (digits kept as text)
    BigIntLiteral(BigIntLiteral),

    /// String literal: "hello"
    StringLiteral(StringLiteral),

    /// Template literal without interpolation: `hello`
    TemplateLiteral(TemplateLiteral),

    /// Boolean literal: true, false
    BooleanLiteral(BooleanLiteral),

    /// Null literal
    NullLiteral(Span),

    /// Identifier (including `undefined`, which is not a keyword)
    Identifier(Identifier),

    /// Array literal: [1, 2, 3]
    Array(ArrayExpression),

    /// Object literal: { x: 1, y: 2 }
    Object(ObjectExpression),

    /// Unary expression: !x, -y
    Unary(UnaryExpression),

    /// Binary expression: x + y, a === b
    Binary(BinaryExpression),

    /// Logical expression: x && y, a ?? b
    Logical(LogicalExpression),

    /// Assignment: x = 42, y += 1
    Assignment(AssignmentExpression),

    /// Ternary: x ? y : z
    Conditional(ConditionalExpression),

    /// Function call: foo(1, 2, 3)
    Call(CallExpression),

    /// Member access: obj.prop, obj?.prop
    Member(MemberExpression),

    /// Index access: arr[0]
    Index(IndexExpression),

    /// New expression: new Date()
    New(NewExpression),

    /// Arrow function: (x) => x + 1
    Arrow(ArrowFunction),

    /// Await expression: await promise
    Await(AwaitExpression),

    /// Typeof expression: typeof value
    Typeof(TypeofExpression),

    /// Cast expression: expr as TypeName
    TypeCast(TypeCastExpression),

    /// Parenthesized: (expr)
    Parenthesized(ParenthesizedExpression),

    /// This expression
    This(Span),

    /// Super expression (parent class access)
    Super(Span),
}

impl Expression {
    /// Get the span of this expression
    pub fn span(&self) -> &Span {
        match self {
            Expression::IntLiteral(e) => &e.span,
            Expression::FloatLiteral(e) => &e.span,
            Expression::BigIntLiteral(e) => &e.span,
            Expression::StringLiteral(e) => &e.span,
            Expression::TemplateLiteral(e) => &e.span,
            Expression::BooleanLiteral(e) => &e.span,
            Expression::NullLiteral(span) => span,
            Expression::Identifier(e) => &e.span,
            Expression::Array(e) => &e.span,
            Expression::Object(e) => &e.span,
            Expression::Unary(e) => &e.span,
            Expression::Binary(e) => &e.span,
            Expression::Logical(e) => &e.span,
            Expression::Assignment(e) => &e.span,
            Expression::Conditional(e) => &e.span,
            Expression::Call(e) => &e.span,
            Expression::Member(e) => &e.span,
            Expression::Index(e) => &e.span,
            Expression::New(e) => &e.span,
            Expression::Arrow(e) => &e.span,
            Expression::Await(e) => &e.span,
            Expression::Typeof(e) => &e.span,
            Expression::TypeCast(e) => &e.span,
            Expression::Parenthesized(e) => &e.span,
            Expression::This(span) => span,
            Expression::Super(span) => span,
        }
    }

    /// Check if this expression is a literal
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Expression::IntLiteral(_)
                | Expression::FloatLiteral(_)
                | Expression::BigIntLiteral(_)
                | Expression::StringLiteral(_)
                | Expression::TemplateLiteral(_)
                | Expression::BooleanLiteral(_)
                | Expression::NullLiteral(_)
        )
    }

    /// View as a plain identifier, if it is one.
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expression::Identifier(id) => Some(id),
            _ => None,
        }
    }
}

// ============================================================================
// Literal Expressions
// ============================================================================

/// Integer literal: 42, 0xFF, 0b1010
#[derive(Debug, Clone, PartialEq)]
pub struct IntLiteral {
    pub value: i64,
    pub span: Span,
}

/// Float literal: 3.14, 1.0e10
#[derive(Debug, Clone, PartialEq)]
pub struct FloatLiteral {
    pub value: f64,
    pub span: Span,
}

/// Bigint literal: 123n.
///
/// The digits are interned as text so values beyond i64 survive intact.
#[derive(Debug, Clone, PartialEq)]
pub struct BigIntLiteral {
    pub digits: Symbol,
    pub span: Span,
}

/// String literal: "hello"
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: Symbol,
    pub span: Span,
}

/// Template literal without interpolation: `hello`
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    pub value: Symbol,
    pub span: Span,
}

/// Boolean literal: true, false
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub value: bool,
    pub span: Span,
}

// ============================================================================
// Array and Object Expressions
// ============================================================================

/// Array expression: [1, 2, 3]
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpression {
    pub elements: Vec<Expression>,
    pub span: Span,
}

/// Object expression: { x: 1, y: 2 }
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectExpression {
    pub properties: Vec<Property>,
    pub span: Span,
}

/// A single key/value pair. Shorthand `{ x }` is expanded at parse time
/// into a pair whose value is the identifier itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: PropertyKey,
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Identifier(Identifier),
    StringLiteral(StringLiteral),
    IntLiteral(IntLiteral),
    /// Computed property name: [expr]
    Computed(Expression),
}

// ============================================================================
// Unary & Binary Expressions
// ============================================================================

/// Unary expression: !x, -y
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,  // +x
    Minus, // -x
    Not,   // !x
}

/// Binary expression: x + y, a === b
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Arithmetic
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
    Modulo,   // %

    // Comparison
    Equal,          // ==
    NotEqual,       // !=
    StrictEqual,    // ===
    StrictNotEqual, // !==
    LessThan,       // <
    LessEqual,      // <=
    GreaterThan,    // >
    GreaterEqual,   // >=

    // Bitwise
    BitwiseAnd, // &
    BitwiseOr,  // |
}

/// Logical expression: x && y, a || b, a ?? b
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpression {
    pub operator: LogicalOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,               // &&
    Or,                // ||
    NullishCoalescing, // ??
}

/// Assignment expression: x = 42, y += 1
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    pub operator: AssignmentOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    Assign,    // =
    AddAssign, // +=
    SubAssign, // -=
    MulAssign, // *=
    DivAssign, // /=
}

// ============================================================================
// Complex Expressions
// ============================================================================

/// Conditional (ternary): x ? y : z
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    pub test: Box<Expression>,
    pub consequent: Box<Expression>,
    pub alternate: Box<Expression>,
    pub span: Span,
}

/// Function call: foo(1, 2, 3)
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

/// Member access: obj.prop, obj?.prop
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    pub object: Box<Expression>,
    pub property: Identifier,
    pub optional: bool, // obj?.prop
    pub span: Span,
}

/// Index access: arr[0]
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub object: Box<Expression>,
    pub index: Box<Expression>,
    pub span: Span,
}

/// New expression: new Date()
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

/// Arrow function: (x) => x + 1
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunction {
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub body: ArrowBody,
    pub is_async: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Expression(Box<Expression>),
    Block(BlockStatement),
}

/// Await expression: await promise
#[derive(Debug, Clone, PartialEq)]
pub struct AwaitExpression {
    pub argument: Box<Expression>,
    pub span: Span,
}

/// Typeof expression: typeof value
#[derive(Debug, Clone, PartialEq)]
pub struct TypeofExpression {
    pub argument: Box<Expression>,
    pub span: Span,
}

/// Cast expression: expr as TypeName
#[derive(Debug, Clone, PartialEq)]
pub struct TypeCastExpression {
    pub expression: Box<Expression>,
    pub target_type: TypeAnnotation,
    pub span: Span,
}

/// Parenthesized expression: (expr)
#[derive(Debug, Clone, PartialEq)]
pub struct ParenthesizedExpression {
    pub expression: Box<Expression>,
    pub span: Span,
}

// ============================================================================
// Synthesized-node constructors
// ============================================================================

impl Expression {
    /// A bare identifier with a dummy span.
    pub fn identifier(name: Symbol) -> Self {
        Expression::Identifier(Identifier::synthesized(name))
    }

    /// A string literal with a dummy span.
    pub fn string(value: Symbol) -> Self {
        Expression::StringLiteral(StringLiteral {
            value,
            span: Span::dummy(),
        })
    }

    /// `typeof operand`
    pub fn typeof_of(operand: Expression) -> Self {
        Expression::Typeof(TypeofExpression {
            argument: Box::new(operand),
            span: Span::dummy(),
        })
    }

    /// `(inner)`
    pub fn parenthesized(inner: Expression) -> Self {
        Expression::Parenthesized(ParenthesizedExpression {
            expression: Box::new(inner),
            span: Span::dummy(),
        })
    }

    /// `left <op> right` for comparison and arithmetic operators.
    pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary(BinaryExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            span: Span::dummy(),
        })
    }

    /// `left <op> right` for `&&`, `||`, and `??`.
    pub fn logical(operator: LogicalOperator, left: Expression, right: Expression) -> Self {
        Expression::Logical(LogicalExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            span: Span::dummy(),
        })
    }

    /// `target = value`
    pub fn assign(target: Expression, value: Expression) -> Self {
        Expression::Assignment(AssignmentExpression {
            operator: AssignmentOperator::Assign,
            left: Box::new(target),
            right: Box::new(value),
            span: Span::dummy(),
        })
    }

    /// `test ? consequent : alternate`
    pub fn conditional(test: Expression, consequent: Expression, alternate: Expression) -> Self {
        Expression::Conditional(ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
            span: Span::dummy(),
        })
    }

    /// `object.property` or `object?.property`
    pub fn member(object: Expression, property: Identifier, optional: bool) -> Self {
        Expression::Member(MemberExpression {
            object: Box::new(object),
            property,
            optional,
            span: Span::dummy(),
        })
    }

    /// `[element]` (or any other element list)
    pub fn array(elements: Vec<Expression>) -> Self {
        Expression::Array(ArrayExpression {
            elements,
            span: Span::dummy(),
        })
    }
}
