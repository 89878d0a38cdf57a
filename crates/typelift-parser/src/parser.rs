//! Parser for the TypeScript subset
//!
//! This module implements a recursive descent parser that transforms a
//! token stream from the lexer into an Abstract Syntax Tree (AST).
//! Ambiguous constructs (arrow functions vs parenthesized expressions,
//! function types vs parenthesized types) are resolved by checkpointing
//! the token position and backtracking.

pub mod error;
pub mod expr;
pub mod guards;
pub mod precedence;
pub mod recovery;
pub mod stmt;
pub mod types;

use crate::ast::*;
use crate::interner::{Interner, Symbol};
use crate::lexer::Lexer;
use crate::token::{Span, Token};

pub use error::{ParseError, ParseErrorKind};

/// Parser state.
///
/// Recursive descent with checkpoint-based backtracking. The parser owns
/// the interner for the duration of the parse and hands it back with the
/// module, so symbols stay resolvable (and comparable across fragments
/// parsed with a shared interner).
pub struct Parser {
    /// Pre-tokenized input
    tokens: Vec<(Token, Span)>,

    /// Current position in token stream
    pos: usize,

    /// Accumulated parse errors (allows continuing after errors)
    errors: Vec<ParseError>,

    /// Current recursion depth
    pub(crate) depth: usize,

    /// Interner holding every identifier and string
    interner: Interner,
}

impl Parser {
    /// Create a new parser from source code.
    pub fn new(source: &str) -> Result<Self, Vec<crate::lexer::LexError>> {
        Self::with_interner(source, Interner::new())
    }

    /// Create a parser that interns into an existing interner.
    ///
    /// Fragments parsed with a shared interner yield symbols comparable
    /// with each other.
    pub fn with_interner(
        source: &str,
        interner: Interner,
    ) -> Result<Self, Vec<crate::lexer::LexError>> {
        let lexer = Lexer::with_interner(source, interner);
        let (tokens, interner) = lexer.tokenize()?;

        Ok(Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            depth: 0,
            interner,
        })
    }

    /// Parse the entire source into a Module AST.
    ///
    /// Returns the module together with the interner on success, or all
    /// accumulated errors on failure.
    pub fn parse(mut self) -> Result<(Module, Interner), Vec<ParseError>> {
        let start_span = self.current_span();
        let mut statements = Vec::new();

        while !self.at_eof() {
            let before = self.pos;
            match stmt::parse_statement(&mut self) {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    self.errors.push(err);
                    recovery::sync_to_statement_boundary(&mut self);
                    // Recovery may land on the very token that failed;
                    // force progress so the loop terminates.
                    if self.pos == before && !self.at_eof() {
                        self.advance();
                    }
                }
            }
        }

        let span = if let Some(last) = statements.last() {
            self.combine_spans(&start_span, last.span())
        } else {
            start_span
        };

        if !self.errors.is_empty() {
            return Err(self.errors);
        }

        Ok((Module { statements, span }, self.interner))
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos].0
    }

    /// Get the current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.tokens[self.pos].1
    }

    /// Peek at the next token (lookahead).
    #[inline]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1).map(|(tok, _)| tok)
    }

    /// Advance to the next token, returning the previous current token.
    pub fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].0.clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    /// Check if the current token matches the given kind.
    #[inline]
    pub fn check(&self, expected: &Token) -> bool {
        std::mem::discriminant(self.current()) == std::mem::discriminant(expected)
    }

    /// Check if the current token matches any of the given kinds.
    pub fn check_any(&self, expected: &[Token]) -> bool {
        expected.iter().any(|tok| self.check(tok))
    }

    /// Check if we've reached EOF.
    #[inline]
    pub fn at_eof(&self) -> bool {
        matches!(self.current(), Token::Eof)
    }

    /// Consume the current token if it matches the expected kind.
    pub fn expect(&mut self, expected: Token) -> Result<Token, ParseError> {
        if self.check(&expected) {
            Ok(self.advance())
        } else {
            Err(self.unexpected_token(&[expected]))
        }
    }

    // ========================================================================
    // Checkpointing
    // ========================================================================

    /// Record the current position for later backtracking.
    #[inline]
    pub fn checkpoint(&self) -> usize {
        self.pos
    }

    /// Rewind to a previously recorded checkpoint.
    #[inline]
    pub fn rewind(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }

    // ========================================================================
    // Contextual Keywords
    // ========================================================================

    /// Check whether the current token is an identifier with the given
    /// spelling. Words like `type`, `async`, `readonly`, and the primitive
    /// type names are contextual and lex as plain identifiers.
    pub fn is_contextual(&self, word: &str) -> bool {
        match self.current() {
            Token::Identifier(sym) => self.interner.resolve(*sym) == word,
            _ => false,
        }
    }

    /// Consume the current token if it is the given contextual word.
    pub fn eat_contextual(&mut self, word: &str) -> bool {
        if self.is_contextual(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Intern a string through the parser's interner.
    pub fn intern(&mut self, text: &str) -> Symbol {
        self.interner.intern(text)
    }

    /// Resolve a symbol through the parser's interner.
    pub fn resolve(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Create an "unexpected token" error.
    pub(crate) fn unexpected_token(&self, expected: &[Token]) -> ParseError {
        let span = self.current_span();
        if self.at_eof() {
            ParseError::unexpected_eof(expected.to_vec(), span)
        } else {
            ParseError::unexpected_token(expected.to_vec(), self.current().clone(), span)
        }
    }

    /// Parse the current token as an identifier, consuming it.
    pub(crate) fn expect_identifier(&mut self) -> Result<Identifier, ParseError> {
        if let Token::Identifier(name) = self.current() {
            let name = *name;
            let span = self.current_span();
            self.advance();
            Ok(Identifier { name, span })
        } else {
            Err(self.unexpected_token(&[Token::Identifier(Symbol::dummy())]))
        }
    }

    // ========================================================================
    // Utilities
    // ========================================================================

    /// Combine two spans into a single span.
    pub fn combine_spans(&self, start: &Span, end: &Span) -> Span {
        Span {
            start: start.start,
            end: end.end,
            line: start.line,
            column: start.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_new() {
        let source = "let x = 42;";
        let parser = Parser::new(source).unwrap();

        assert!(matches!(parser.current(), Token::Let));
    }

    #[test]
    fn test_parser_advance() {
        let source = "let x";
        let mut parser = Parser::new(source).unwrap();

        assert!(matches!(parser.current(), Token::Let));
        let tok = parser.advance();
        assert!(matches!(tok, Token::Let));
        assert!(matches!(parser.current(), Token::Identifier(_)));
    }

    #[test]
    fn test_parser_at_eof() {
        let source = "";
        let parser = Parser::new(source).unwrap();

        assert!(parser.at_eof());
    }

    #[test]
    fn test_parser_check() {
        let source = "let x";
        let parser = Parser::new(source).unwrap();

        assert!(parser.check(&Token::Let));
        assert!(!parser.check(&Token::Const));
    }

    #[test]
    fn test_contextual_word() {
        let source = "type Foo = string;";
        let parser = Parser::new(source).unwrap();

        assert!(parser.is_contextual("type"));
        assert!(!parser.is_contextual("async"));
    }

    #[test]
    fn test_checkpoint_rewind() {
        let source = "a b c";
        let mut parser = Parser::new(source).unwrap();

        let cp = parser.checkpoint();
        parser.advance();
        parser.advance();
        parser.rewind(cp);

        assert!(parser.is_contextual("a"));
    }

    #[test]
    fn test_parse_returns_interner() {
        let source = "let count = 1;";
        let parser = Parser::new(source).unwrap();
        let (module, interner) = parser.parse().unwrap();

        assert_eq!(module.len(), 1);
        assert!(interner.lookup("count").is_some());
    }
}
