//! Token definitions for the TypeScript subset.
//!
//! This module defines all tokens that can appear in the decorated-class
//! sources the macro processes, including keywords, operators, literals,
//! and special tokens. Contextual words (`type`, `get`, `set`, `async`,
//! `readonly`, and the primitive type names) lex as identifiers and are
//! recognized positionally by the parser, as TypeScript itself does.

use crate::interner::Symbol;
use std::fmt;

/// A token in the TypeScript subset.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    // Declarations
    Class,
    Function,
    Let,
    Const,
    Var,

    // Control flow
    If,
    Else,
    Return,
    Throw,

    // Modules
    Import,
    Export,
    Default,
    From,

    // OOP keywords
    New,
    This,
    Super,
    Static,
    Extends,

    // Type operators
    Typeof,

    // Async
    Await,

    // Literals
    IntLiteral(i64),
    FloatLiteral(f64),
    BigIntLiteral(Symbol), // Digits without the trailing `n`, interned
    StringLiteral(Symbol), // Interned string
    TemplateLiteral(Symbol), // Interpolation-free template, interned
    True,
    False,
    Null,

    // Identifiers
    Identifier(Symbol), // Interned identifier

    // Operators
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Unary
    Bang,

    // Comparison
    EqualEqual,
    BangEqual,
    EqualEqualEqual,
    BangEqualEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Logical
    AmpAmp,
    PipePipe,
    QuestionQuestion,

    // Type composition / bitwise
    Amp,
    Pipe,

    // Assignment
    Equal,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,

    // Other
    Question,
    QuestionDot,
    Dot,
    Colon,
    Arrow,
    At, // @ for decorators

    // Delimiters
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Semicolon,
    Comma,

    // Special
    Eof,
    Error(String),
}

/// Source location information for a token or AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Span for synthesized nodes that have no source location.
    pub const fn dummy() -> Self {
        Span {
            start: 0,
            end: 0,
            line: 0,
            column: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line.min(other.line),
            column: self.column.min(other.column),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Class => write!(f, "class"),
            Token::Function => write!(f, "function"),
            Token::Let => write!(f, "let"),
            Token::Const => write!(f, "const"),
            Token::Var => write!(f, "var"),
            Token::If => write!(f, "if"),
            Token::Else => write!(f, "else"),
            Token::Return => write!(f, "return"),
            Token::Throw => write!(f, "throw"),
            Token::Import => write!(f, "import"),
            Token::Export => write!(f, "export"),
            Token::Default => write!(f, "default"),
            Token::From => write!(f, "from"),
            Token::New => write!(f, "new"),
            Token::This => write!(f, "this"),
            Token::Super => write!(f, "super"),
            Token::Static => write!(f, "static"),
            Token::Extends => write!(f, "extends"),
            Token::Typeof => write!(f, "typeof"),
            Token::Await => write!(f, "await"),
            Token::IntLiteral(n) => write!(f, "{}", n),
            Token::FloatLiteral(n) => write!(f, "{}", n),
            Token::BigIntLiteral(_) => write!(f, "<bigint>"),
            Token::StringLiteral(_) => write!(f, "\"<string>\""),
            Token::TemplateLiteral(_) => write!(f, "`...`"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Null => write!(f, "null"),
            Token::Identifier(_) => write!(f, "<identifier>"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::Bang => write!(f, "!"),
            Token::EqualEqual => write!(f, "=="),
            Token::BangEqual => write!(f, "!="),
            Token::EqualEqualEqual => write!(f, "==="),
            Token::BangEqualEqual => write!(f, "!=="),
            Token::Less => write!(f, "<"),
            Token::LessEqual => write!(f, "<="),
            Token::Greater => write!(f, ">"),
            Token::GreaterEqual => write!(f, ">="),
            Token::AmpAmp => write!(f, "&&"),
            Token::PipePipe => write!(f, "||"),
            Token::QuestionQuestion => write!(f, "??"),
            Token::Amp => write!(f, "&"),
            Token::Pipe => write!(f, "|"),
            Token::Equal => write!(f, "="),
            Token::PlusEqual => write!(f, "+="),
            Token::MinusEqual => write!(f, "-="),
            Token::StarEqual => write!(f, "*="),
            Token::SlashEqual => write!(f, "/="),
            Token::Question => write!(f, "?"),
            Token::QuestionDot => write!(f, "?."),
            Token::Dot => write!(f, "."),
            Token::Colon => write!(f, ":"),
            Token::Arrow => write!(f, "=>"),
            Token::At => write!(f, "@"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::Semicolon => write!(f, ";"),
            Token::Comma => write!(f, ","),
            Token::Eof => write!(f, "EOF"),
            Token::Error(msg) => write!(f, "ERROR: {}", msg),
        }
    }
}

impl Token {
    /// Returns true if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Token::Class
                | Token::Function
                | Token::Let
                | Token::Const
                | Token::Var
                | Token::If
                | Token::Else
                | Token::Return
                | Token::Throw
                | Token::Import
                | Token::Export
                | Token::Default
                | Token::From
                | Token::New
                | Token::This
                | Token::Super
                | Token::Static
                | Token::Extends
                | Token::Typeof
                | Token::Await
        )
    }

    /// Returns true if this token is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Token::IntLiteral(_)
                | Token::FloatLiteral(_)
                | Token::BigIntLiteral(_)
                | Token::StringLiteral(_)
                | Token::TemplateLiteral(_)
                | Token::True
                | Token::False
                | Token::Null
        )
    }

    /// Returns true if this token is an assignment operator.
    pub fn is_assignment_op(&self) -> bool {
        matches!(
            self,
            Token::Equal
                | Token::PlusEqual
                | Token::MinusEqual
                | Token::StarEqual
                | Token::SlashEqual
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let a = Span::new(4, 10, 1, 5);
        let b = Span::new(12, 20, 2, 1);
        let merged = a.merge(&b);
        assert_eq!(merged.start, 4);
        assert_eq!(merged.end, 20);
        assert_eq!(merged.line, 1);
    }

    #[test]
    fn test_span_slice() {
        let source = "let x = 1;";
        let span = Span::new(4, 5, 1, 5);
        assert_eq!(span.slice(source), "x");
        assert_eq!(span.len(), 1);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_dummy_span_is_empty() {
        assert!(Span::dummy().is_empty());
    }

    #[test]
    fn test_token_classifiers() {
        assert!(Token::Class.is_keyword());
        assert!(Token::Typeof.is_keyword());
        assert!(!Token::Identifier(Symbol::dummy()).is_keyword());
        assert!(Token::True.is_literal());
        assert!(Token::IntLiteral(42).is_literal());
        assert!(!Token::Pipe.is_literal());
        assert!(Token::PlusEqual.is_assignment_op());
        assert!(!Token::EqualEqual.is_assignment_op());
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::QuestionDot.to_string(), "?.");
        assert_eq!(Token::Arrow.to_string(), "=>");
        assert_eq!(Token::EqualEqualEqual.to_string(), "===");
        assert_eq!(Token::At.to_string(), "@");
    }
}
