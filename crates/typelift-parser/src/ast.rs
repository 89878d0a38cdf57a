//! Abstract Syntax Tree for the TypeScript subset.
//!
//! This module defines the AST produced by the parser:
//! - Module and statement structure (declarations, imports, exports)
//! - Expressions (literals, operators, calls, member chains)
//! - Type annotations (keywords, references, unions, literals)
//!
//! Every node carries a `Span` for precise source location tracking.
//! Synthesized nodes (built programmatically rather than parsed) carry
//! `Span::dummy()`.

use crate::interner::{Interner, Symbol};
use crate::token::Span;

pub mod expression;
pub mod statement;
pub mod types;

pub use expression::*;
pub use statement::*;
pub use types::*;

/// Root node: one parsed source file.
///
/// # Example
/// ```
/// use typelift_parser::ast::Module;
/// use typelift_parser::token::Span;
///
/// let module = Module::new(vec![], Span::new(0, 0, 1, 1));
/// assert!(module.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// Top-level statements (declarations, imports, exports)
    pub statements: Vec<Statement>,

    /// Span covering the entire module
    pub span: Span,
}

impl Module {
    /// Create a new module
    pub fn new(statements: Vec<Statement>, span: Span) -> Self {
        Self { statements, span }
    }

    /// Check if the module is empty
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Get the number of top-level statements
    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

/// Identifier
///
/// A name for a variable, class, field, type, etc. The actual text lives
/// in the interner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub name: Symbol,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: Symbol, span: Span) -> Self {
        Self { name, span }
    }

    /// An identifier with a dummy span, for synthesized nodes.
    pub fn synthesized(name: Symbol) -> Self {
        Self {
            name,
            span: Span::dummy(),
        }
    }
}

/// Entity name: a dotted name as it appears in type positions.
///
/// `User` is an `Ident`; `Types.ObjectId` is a `Qualified` whose left side
/// may itself be qualified (`mongoose.Types.ObjectId`). The leftmost
/// segment is always a plain identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityName {
    /// Simple name: `User`
    Ident(Identifier),

    /// Dotted name: `Types.ObjectId`
    Qualified(QualifiedName),
}

impl EntityName {
    /// Get the span of this entity name
    pub fn span(&self) -> &Span {
        match self {
            EntityName::Ident(id) => &id.span,
            EntityName::Qualified(q) => &q.span,
        }
    }

    /// The leftmost identifier of the dotted chain.
    ///
    /// For `mongoose.Types.ObjectId` this is `mongoose`; scope lookups
    /// resolve against this segment only.
    pub fn leftmost(&self) -> &Identifier {
        match self {
            EntityName::Ident(id) => id,
            EntityName::Qualified(q) => q.left.leftmost(),
        }
    }

    /// All segments of the chain, leftmost first.
    pub fn segments(&self) -> Vec<&Identifier> {
        let mut out = Vec::new();
        self.collect_segments(&mut out);
        out
    }

    fn collect_segments<'a>(&'a self, out: &mut Vec<&'a Identifier>) {
        match self {
            EntityName::Ident(id) => out.push(id),
            EntityName::Qualified(q) => {
                q.left.collect_segments(out);
                out.push(&q.right);
            }
        }
    }

    /// Render the dotted spelling, e.g. `"Types.ObjectId"`.
    pub fn to_string(&self, interner: &Interner) -> String {
        match self {
            EntityName::Ident(id) => interner.resolve(id.name).to_string(),
            EntityName::Qualified(q) => {
                format!(
                    "{}.{}",
                    q.left.to_string(interner),
                    interner.resolve(q.right.name)
                )
            }
        }
    }
}

/// Qualified name: `left.right` where `left` may itself be qualified.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedName {
    pub left: Box<EntityName>,
    pub right: Identifier,
    pub span: Span,
}
