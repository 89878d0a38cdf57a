//! Runtime-import references.
//!
//! The reifier sometimes needs a value the source never imported: the
//! numeric scalar aliases (`Int`, `Float`) live in the schema library,
//! and `Record<K, V>` degrades to the JSON-object scalar from the JSON
//! scalar module. `ImportMap` hands out an identifier for a generated
//! local binding (`_Int`, `_GraphQLJSONObject`) and records the request
//! so callers can materialize the matching import statements.
//!
//! Requests are memoized per (module, symbol): asking twice returns a
//! clone of the same local identifier and records the request once. The
//! map lives for one invocation and is discarded with it.

use rustc_hash::FxHashMap;
use typelift_parser::ast::Expression;
use typelift_parser::interner::{Interner, Symbol};

/// Logical runtime module an import is requested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeModule {
    /// The schema-building library (numeric scalar aliases)
    TypeGraphQL,
    /// The JSON scalar package (`GraphQLJSONObject`)
    GraphQLTypeJson,
}

impl RuntimeModule {
    /// The module specifier an import statement would name.
    pub fn path(self) -> &'static str {
        match self {
            RuntimeModule::TypeGraphQL => "type-graphql",
            RuntimeModule::GraphQLTypeJson => "graphql-type-json",
        }
    }
}

/// One recorded import request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportRequest {
    /// Source module
    pub module: RuntimeModule,
    /// Imported symbol name as it appears in the module
    pub imported: Symbol,
    /// Generated local binding name
    pub local: Symbol,
}

/// Per-invocation memoized (module, symbol) → local identifier map.
#[derive(Debug, Default)]
pub struct ImportMap {
    memo: FxHashMap<(RuntimeModule, Symbol), Symbol>,
    requests: Vec<ImportRequest>,
}

impl ImportMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// An identifier expression for `imported` from `module`.
    ///
    /// The first request generates an underscore-prefixed local name and
    /// records the request; later requests return clones of the same
    /// identifier.
    pub fn import(
        &mut self,
        interner: &mut Interner,
        module: RuntimeModule,
        imported: Symbol,
    ) -> Expression {
        if let Some(&local) = self.memo.get(&(module, imported)) {
            return Expression::identifier(local);
        }
        let text = format!("_{}", interner.resolve(imported));
        let local = interner.intern(&text);
        self.memo.insert((module, imported), local);
        self.requests.push(ImportRequest {
            module,
            imported,
            local,
        });
        Expression::identifier(local)
    }

    /// Every distinct request so far, in request order.
    pub fn requests(&self) -> &[ImportRequest] {
        &self.requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_are_memoized() {
        let mut interner = Interner::new();
        let mut imports = ImportMap::new();
        let int = interner.intern("Int");

        let first = imports.import(&mut interner, RuntimeModule::TypeGraphQL, int);
        let second = imports.import(&mut interner, RuntimeModule::TypeGraphQL, int);

        assert_eq!(first, second);
        assert_eq!(imports.requests().len(), 1);
        assert_eq!(interner.resolve(imports.requests()[0].local), "_Int");
    }

    #[test]
    fn test_distinct_modules_get_distinct_requests() {
        let mut interner = Interner::new();
        let mut imports = ImportMap::new();
        let int = interner.intern("Int");
        let json = interner.intern("GraphQLJSONObject");

        imports.import(&mut interner, RuntimeModule::TypeGraphQL, int);
        imports.import(&mut interner, RuntimeModule::GraphQLTypeJson, json);

        let requests = imports.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].module.path(), "type-graphql");
        assert_eq!(requests[1].module.path(), "graphql-type-json");
        assert_eq!(interner.resolve(requests[1].local), "_GraphQLJSONObject");
    }
}
