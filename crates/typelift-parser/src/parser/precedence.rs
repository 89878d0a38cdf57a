//! Operator precedence table for expression parsing.
//!
//! Follows JavaScript/TypeScript precedence rules for the operators in
//! the subset.

use crate::token::Token;

/// Operator precedence level (higher = tighter binding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    None = 0,
    Assignment = 1,     // =, +=, -=, *=, /=
    Conditional = 2,    // ?:
    NullCoalescing = 3, // ??
    LogicalOr = 4,      // ||
    LogicalAnd = 5,     // &&
    BitwiseOr = 6,      // |
    BitwiseAnd = 7,     // &
    Equality = 8,       // ==, !=, ===, !==
    Relational = 9,     // <, >, <=, >=
    Additive = 10,      // +, -
    Multiplicative = 11, // *, /, %
    Unary = 12,         // !, +, -, typeof, await
    Call = 13,          // (), [], ., ?.
    Primary = 14,       // Literals, identifiers, ()
}

impl Precedence {
    /// The next tighter level, used as the minimum for right operands of
    /// left-associative operators. Every binary operator in the subset is
    /// left-associative.
    pub fn one_tighter(self) -> Precedence {
        match self {
            Precedence::None => Precedence::Assignment,
            Precedence::Assignment => Precedence::Conditional,
            Precedence::Conditional => Precedence::NullCoalescing,
            Precedence::NullCoalescing => Precedence::LogicalOr,
            Precedence::LogicalOr => Precedence::LogicalAnd,
            Precedence::LogicalAnd => Precedence::BitwiseOr,
            Precedence::BitwiseOr => Precedence::BitwiseAnd,
            Precedence::BitwiseAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Relational,
            Precedence::Relational => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Unary,
            Precedence::Unary => Precedence::Call,
            Precedence::Call => Precedence::Primary,
            Precedence::Primary => Precedence::Primary,
        }
    }
}

/// Get the precedence of a binary operator token.
pub fn get_precedence(token: &Token) -> Precedence {
    match token {
        // Assignment
        Token::Equal
        | Token::PlusEqual
        | Token::MinusEqual
        | Token::StarEqual
        | Token::SlashEqual => Precedence::Assignment,

        // Conditional
        Token::Question => Precedence::Conditional,

        // Null coalescing
        Token::QuestionQuestion => Precedence::NullCoalescing,

        // Logical OR
        Token::PipePipe => Precedence::LogicalOr,

        // Logical AND
        Token::AmpAmp => Precedence::LogicalAnd,

        // Bitwise OR
        Token::Pipe => Precedence::BitwiseOr,

        // Bitwise AND
        Token::Amp => Precedence::BitwiseAnd,

        // Equality
        Token::EqualEqual | Token::BangEqual | Token::EqualEqualEqual | Token::BangEqualEqual => {
            Precedence::Equality
        }

        // Relational
        Token::Less | Token::LessEqual | Token::Greater | Token::GreaterEqual => {
            Precedence::Relational
        }

        // Additive
        Token::Plus | Token::Minus => Precedence::Additive,

        // Multiplicative
        Token::Star | Token::Slash | Token::Percent => Precedence::Multiplicative,

        _ => Precedence::None,
    }
}

/// Check if an operator is right-associative.
pub fn is_right_associative(token: &Token) -> bool {
    matches!(
        token,
        Token::Equal
            | Token::PlusEqual
            | Token::MinusEqual
            | Token::StarEqual
            | Token::SlashEqual
            | Token::Question // ?: is right-associative
    )
}
