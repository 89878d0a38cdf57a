//! Error recovery strategies for the parser.
//!
//! When the parser encounters an error, it uses these strategies to
//! resynchronize and continue parsing to find more errors.

use super::Parser;
use crate::token::Token;

/// Synchronize to the next statement boundary.
///
/// Used after a parse error to skip tokens until a point where statement
/// parsing can resume.
pub fn sync_to_statement_boundary(parser: &mut Parser) {
    while !parser.at_eof() {
        match parser.current() {
            // Statement-starting tokens
            Token::Function
            | Token::Class
            | Token::Let
            | Token::Const
            | Token::Var
            | Token::If
            | Token::Return
            | Token::Throw
            | Token::Import
            | Token::Export
            | Token::At => {
                return;
            }

            // Semicolon marks end of previous statement
            Token::Semicolon => {
                parser.advance();
                return;
            }

            // Closing brace might end a block
            Token::RightBrace => {
                return;
            }

            _ => {
                parser.advance();
            }
        }
    }
}

/// Synchronize to the next expression boundary.
pub fn sync_to_expression_boundary(parser: &mut Parser) {
    while !parser.at_eof() {
        match parser.current() {
            Token::Semicolon
            | Token::Comma
            | Token::RightParen
            | Token::RightBrace
            | Token::RightBracket => {
                return;
            }

            _ => {
                parser.advance();
            }
        }
    }
}
