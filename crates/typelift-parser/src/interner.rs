//! String interning for identifiers and string literals.
//!
//! Identifiers are compared constantly (contextual keywords, well-known
//! type names, override matching), so the lexer interns them once and the
//! rest of the pipeline works with 4-byte symbols. One interner can be
//! threaded through several parses, which keeps symbols from separately
//! parsed fragments (a source file, an override key, an override value)
//! comparable with each other.

use rustc_hash::FxHashMap;
use std::num::NonZeroU32;

/// An interned string handle.
///
/// Symbols are `Copy` and compare in O(1). Two symbols are equal iff they
/// were produced by the same interner (or a chain of parses sharing one)
/// for the same string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(NonZeroU32);

impl Symbol {
    #[inline]
    fn from_index(index: usize) -> Self {
        // Index 0 maps to the NonZeroU32 value 1.
        Symbol(NonZeroU32::new(index as u32 + 1).expect("interner overflow"))
    }

    #[inline]
    fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// A placeholder symbol for tests and error paths.
    #[inline]
    pub const fn dummy() -> Self {
        match NonZeroU32::new(1) {
            Some(n) => Symbol(n),
            None => unreachable!(),
        }
    }
}

/// Deduplicating string storage.
#[derive(Clone, Default)]
pub struct Interner {
    map: FxHashMap<String, Symbol>,
    strings: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its symbol. Idempotent per string.
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.map.get(s) {
            return sym;
        }
        let sym = Symbol::from_index(self.strings.len());
        self.strings.push(s.to_owned());
        self.map.insert(s.to_owned(), sym);
        sym
    }

    /// Look up a string without interning it.
    ///
    /// Returns `None` when the string has never been interned. Used for
    /// contextual-keyword checks and well-known-name comparisons where
    /// allocating a fresh symbol would be wasted work.
    pub fn lookup(&self, s: &str) -> Option<Symbol> {
        self.map.get(s).copied()
    }

    /// Resolve a symbol back to its string.
    ///
    /// # Panics
    ///
    /// Panics if the symbol did not come from this interner.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.strings[sym.index()]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl std::fmt::Debug for Interner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interner")
            .field("len", &self.strings.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        let mut interner = Interner::new();
        let a = interner.intern("userId");
        let b = interner.intern("name");
        let c = interner.intern("userId");

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_resolve_round_trip() {
        let mut interner = Interner::new();
        let sym = interner.intern("ObjectId");
        assert_eq!(interner.resolve(sym), "ObjectId");
    }

    #[test]
    fn test_lookup_does_not_intern() {
        let mut interner = Interner::new();
        assert_eq!(interner.lookup("Date"), None);
        assert_eq!(interner.len(), 0);

        let sym = interner.intern("Date");
        assert_eq!(interner.lookup("Date"), Some(sym));
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn test_shared_across_fragments() {
        // Symbols from a second parse reusing the interner stay comparable
        // with symbols from the first.
        let mut interner = Interner::new();
        let from_source = interner.intern("Types");

        let mut continued = interner.clone();
        let from_override = continued.intern("Types");
        assert_eq!(from_source, from_override);
    }
}
