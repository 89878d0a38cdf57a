//! Fresh-temporary generation.
//!
//! The qualified-name resolver caches a resolved chain value in a
//! temporary (`_ref`, `_ref2`, ...) so the guarded expression evaluates
//! the chain once. Temporaries are recorded together with the scope whose
//! block should receive their `var` declaration; callers materialize
//! those declarations when rewriting the source.

use crate::scope::ScopeId;
use typelift_parser::ast::Identifier;
use typelift_parser::interner::{Interner, Symbol};

/// One generated temporary and the scope it is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaredTemp {
    /// The temporary's name
    pub name: Symbol,
    /// Hoist scope receiving the `var` declaration
    pub scope: ScopeId,
}

/// Per-invocation generator of declared temporaries.
#[derive(Debug, Default)]
pub struct TempGenerator {
    counter: u32,
    declared: Vec<DeclaredTemp>,
}

impl TempGenerator {
    /// A new generator starting at `_ref`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh temporary declared in `scope`.
    pub fn fresh(&mut self, interner: &mut Interner, scope: ScopeId) -> Identifier {
        self.counter += 1;
        let text = if self.counter == 1 {
            "_ref".to_owned()
        } else {
            format!("_ref{}", self.counter)
        };
        let name = interner.intern(&text);
        self.declared.push(DeclaredTemp { name, scope });
        Identifier::synthesized(name)
    }

    /// Every temporary generated so far, in generation order.
    pub fn declared(&self) -> &[DeclaredTemp] {
        &self.declared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_names_follow_uid_sequence() {
        let mut interner = Interner::new();
        let mut temps = TempGenerator::new();
        let scope = ScopeId(0);

        let first = temps.fresh(&mut interner, scope);
        let second = temps.fresh(&mut interner, scope);
        let third = temps.fresh(&mut interner, ScopeId(2));

        assert_eq!(interner.resolve(first.name), "_ref");
        assert_eq!(interner.resolve(second.name), "_ref2");
        assert_eq!(interner.resolve(third.name), "_ref3");

        assert_eq!(temps.declared().len(), 3);
        assert_eq!(temps.declared()[2].scope, ScopeId(2));
    }
}
