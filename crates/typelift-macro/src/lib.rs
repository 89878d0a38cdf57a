//! Type-Reification Core
//!
//! Deduces the GraphQL runtime type for a decorated TypeScript class
//! property, method, or parameter from its type annotation (or literal
//! initializer) so the deduced type can be injected as an explicit
//! decorator argument — no reflection metadata required at runtime:
//! - **Reifier**: the recursive type-to-expression engine (`reify`)
//! - **Override table**: user-configured textual type overrides
//!   (`overrides`, `config`)
//! - **Binder**: scope tree and binding-safety analysis (`scope`)
//! - **Qualified names**: guarded resolution of dotted references
//!   (`qualified`)
//! - **Bookkeeping**: runtime-import requests and declared temporaries
//!   (`imports`, `uid`)
//!
//! # Example
//!
//! ```rust
//! use typelift_macro::{Binder, OverrideTable, Reifier};
//! use typelift_parser::ast::{ClassMember, Expression, Statement};
//! use typelift_parser::Parser;
//!
//! let source = r#"
//!     class User {
//!         name: string | null;
//!     }
//! "#;
//! let (module, interner) = Parser::new(source).unwrap().parse().unwrap();
//! let bindings = Binder::bind(&module);
//! let scope = bindings.module_scope();
//!
//! let Statement::ClassDecl(class) = &module.statements[0] else { unreachable!() };
//! let ClassMember::Field(field) = &class.members[0] else { unreachable!() };
//!
//! let mut reifier = Reifier::new(interner, bindings, OverrideTable::empty());
//! let deduced = reifier.reify(scope, field.type_annotation.as_ref(), None);
//!
//! assert!(deduced.nullable);
//! let Some(Expression::Identifier(id)) = deduced.ty else { unreachable!() };
//! assert_eq!(reifier.interner().resolve(id.name), "String");
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// ============================================================================
// Core Modules
// ============================================================================

/// Macro configuration (`typeMap`)
pub mod config;

/// Runtime-import requests and local uids
pub mod imports;

/// Literal value → scalar name conversion
pub mod literals;

/// Compiled type overrides
pub mod overrides;

/// Guarded qualified-name resolution
pub mod qualified;

/// The reification engine
pub mod reify;

/// Binding tables, binder pass, and safety verdicts
pub mod scope;

/// Span-insensitive equality and subset matching
pub mod structural;

/// Fresh declared temporaries
pub mod uid;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::MacroConfig;
pub use imports::{ImportMap, ImportRequest, RuntimeModule};
pub use overrides::{OverrideError, OverrideTable};
pub use reify::{ReifiedType, Reifier};
pub use scope::{Binder, Binding, BindingKind, BindingTable, ScopeId, ScopeKind};
pub use uid::{DeclaredTemp, TempGenerator};
