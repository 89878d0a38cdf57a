//! TypeScript Subset Parser
//!
//! Lexer, parser, and AST for the decorated-class TypeScript subset that
//! the reification macro operates on:
//! - **Lexer**: logos-backed tokenizer with interned identifiers (`lexer`)
//! - **Parser**: recursive-descent parser with error recovery (`parser`)
//! - **AST**: expressions, statements, and type annotations (`ast`)
//! - **Printer**: precedence-aware JavaScript emission (`printer`)
//! - **Diagnostics**: codespan-backed error rendering (`diagnostics`)
//!
//! # Example
//!
//! ```rust
//! use typelift_parser::Parser;
//!
//! let source = r#"
//!     class User {
//!         name: string | null;
//!     }
//! "#;
//!
//! let parser = Parser::new(source).unwrap();
//! let (module, interner) = parser.parse().unwrap();
//! assert_eq!(module.statements.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// ============================================================================
// Core Modules
// ============================================================================

/// AST nodes: expressions, statements, type annotations
pub mod ast;

/// Diagnostic rendering backed by codespan-reporting
pub mod diagnostics;

/// String interning for identifiers and literals
pub mod interner;

/// Tokenizer for the TypeScript subset
pub mod lexer;

/// Recursive-descent parser with recovery
pub mod parser;

/// JavaScript source emission
pub mod printer;

/// Token and span definitions
pub mod token;

// ============================================================================
// Re-exports
// ============================================================================

pub use ast::Module;
pub use diagnostics::{Diagnostic, ErrorCode};
pub use interner::{Interner, Symbol};
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use printer::{print_expression, print_module, print_statement, Printer};
pub use token::{Span, Token};
