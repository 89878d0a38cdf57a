//! Binding tables and the binder pass.
//!
//! The reifier needs one question answered about a type reference: is a
//! direct runtime reference to this name safe at decorator-evaluation
//! time? Classes and variable declarators have completed initialization
//! by the time a decorator on a later declaration executes; functions,
//! imports, parameters, and type-level declarations carry weaker or
//! unverifiable ordering guarantees and get the `typeof`-guarded form.
//!
//! `Binder::bind` builds the scope tree in a single pass over a parsed
//! module. Binding is analysis, not checking: later declarations of a
//! name replace earlier ones (JavaScript redeclaration semantics) and the
//! pass never fails.

use rustc_hash::FxHashMap;
use typelift_parser::ast::*;
use typelift_parser::interner::Symbol;
use typelift_parser::token::Span;

/// Scope identifier. The module scope is always `ScopeId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

/// Scope kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Top-level module scope
    Module,
    /// Function, method, or constructor body
    Function,
    /// Class body
    Class,
    /// Statement-level block or control-flow branch
    Block,
}

/// Declaration form backing a binding.
///
/// The form decides the safety verdict: only `Class` and `Variable` are
/// safe to reference directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// Class declaration
    Class,
    /// Variable declarator (var/let/const)
    Variable,
    /// Function declaration
    Function,
    /// Imported value binding
    ImportValue,
    /// Type-only import (erased at runtime)
    ImportType,
    /// Function or method parameter
    Parameter,
    /// Generic type parameter
    TypeParameter,
    /// Type alias (erased at runtime)
    TypeAlias,
}

/// One name bound in one scope.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The bound name
    pub name: Symbol,
    /// Declaration form
    pub kind: BindingKind,
    /// Was the declaration wrapped in `export` / `export default`?
    pub exported: bool,
    /// Span of the declaring identifier
    pub span: Span,
}

impl Binding {
    /// Safe to reference directly at decorator-evaluation time?
    ///
    /// True iff the declaration form is a class declaration or a variable
    /// declarator; the export wrapper does not affect the verdict.
    pub fn is_safe_reference(&self) -> bool {
        matches!(self.kind, BindingKind::Class | BindingKind::Variable)
    }
}

/// One scope in the scope tree.
#[derive(Debug, Clone)]
pub struct Scope {
    /// This scope's id
    pub id: ScopeId,
    /// Scope kind
    pub kind: ScopeKind,
    /// Parent scope (`None` for the module scope)
    pub parent: Option<ScopeId>,
    bindings: FxHashMap<Symbol, Binding>,
}

/// Scope tree with name → binding entries per scope.
#[derive(Debug, Clone)]
pub struct BindingTable {
    scopes: Vec<Scope>,
}

impl BindingTable {
    /// An empty table holding only the module scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                id: ScopeId(0),
                kind: ScopeKind::Module,
                parent: None,
                bindings: FxHashMap::default(),
            }],
        }
    }

    /// The module (top-level) scope.
    pub fn module_scope(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Number of scopes in the tree.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Create a child scope.
    pub fn push_scope(&mut self, kind: ScopeKind, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            id,
            kind,
            parent: Some(parent),
            bindings: FxHashMap::default(),
        });
        id
    }

    /// Define a binding, replacing any earlier binding of the same name
    /// in the same scope.
    pub fn define(&mut self, scope: ScopeId, binding: Binding) {
        self.scopes[scope.0 as usize]
            .bindings
            .insert(binding.name, binding);
    }

    /// Resolve a name by walking the scope chain outward.
    pub fn resolve(&self, scope: ScopeId, name: Symbol) -> Option<&Binding> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0 as usize];
            if let Some(binding) = scope.bindings.get(&name) {
                return Some(binding);
            }
            current = scope.parent;
        }
        None
    }

    /// Safety verdict for a name at a position inside `scope`.
    ///
    /// Unresolvable names are unsafe, the conservative default.
    pub fn is_safe_reference(&self, scope: ScopeId, name: Symbol) -> bool {
        self.resolve(scope, name)
            .is_some_and(Binding::is_safe_reference)
    }

    /// The nearest scope where a generated temporary's `var` declaration
    /// belongs: the closest enclosing block, function body, or module
    /// scope (class bodies cannot hold statements).
    pub fn hoist_scope(&self, scope: ScopeId) -> ScopeId {
        let mut current = scope;
        loop {
            let s = &self.scopes[current.0 as usize];
            match s.kind {
                ScopeKind::Class => current = s.parent.expect("class scope has a parent"),
                _ => return current,
            }
        }
    }

    /// The scope a `var` declarator hoists to: the nearest enclosing
    /// function body or the module scope.
    pub fn var_scope(&self, scope: ScopeId) -> ScopeId {
        let mut current = scope;
        loop {
            let s = &self.scopes[current.0 as usize];
            match s.kind {
                ScopeKind::Module | ScopeKind::Function => return current,
                _ => current = s.parent.expect("non-module scope has a parent"),
            }
        }
    }
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Binder pass
// =========================================================================

/// Single-pass binder over a parsed module.
pub struct Binder {
    table: BindingTable,
}

impl Binder {
    /// Build the binding table for a module.
    pub fn bind(module: &Module) -> BindingTable {
        let mut binder = Binder {
            table: BindingTable::new(),
        };
        let root = binder.table.module_scope();
        for stmt in &module.statements {
            binder.bind_statement(stmt, root, false);
        }
        binder.table
    }

    fn bind_statement(&mut self, stmt: &Statement, scope: ScopeId, exported: bool) {
        match stmt {
            Statement::VariableDecl(decl) => {
                // `var` hoists past block scopes.
                let target = if decl.kind == VariableKind::Var {
                    self.table.var_scope(scope)
                } else {
                    scope
                };
                for declarator in &decl.declarations {
                    self.define(target, &declarator.name, BindingKind::Variable, exported);
                }
            }
            Statement::FunctionDecl(decl) => {
                self.define(scope, &decl.name, BindingKind::Function, exported);
                let body = self.table.push_scope(ScopeKind::Function, scope);
                self.bind_type_params(decl.type_params.as_deref(), body);
                self.bind_params(&decl.params, body);
                for inner in &decl.body.statements {
                    self.bind_statement(inner, body, false);
                }
            }
            Statement::ClassDecl(decl) => {
                self.define(scope, &decl.name, BindingKind::Class, exported);
                let class = self.table.push_scope(ScopeKind::Class, scope);
                self.bind_type_params(decl.type_params.as_deref(), class);
                for member in &decl.members {
                    self.bind_class_member(member, class);
                }
            }
            Statement::TypeAliasDecl(decl) => {
                self.define(scope, &decl.name, BindingKind::TypeAlias, exported);
            }
            Statement::ImportDecl(decl) => {
                for specifier in &decl.specifiers {
                    let type_only = decl.type_only
                        || matches!(specifier, ImportSpecifier::Named { type_only: true, .. });
                    let kind = if type_only {
                        BindingKind::ImportType
                    } else {
                        BindingKind::ImportValue
                    };
                    self.define(scope, specifier.local_name(), kind, false);
                }
            }
            Statement::ExportDecl(decl) => {
                self.bind_statement(&decl.declaration, scope, true);
            }
            Statement::If(stmt) => {
                self.bind_branch(&stmt.then_branch, scope);
                if let Some(else_branch) = &stmt.else_branch {
                    self.bind_branch(else_branch, scope);
                }
            }
            Statement::Block(block) => {
                let inner = self.table.push_scope(ScopeKind::Block, scope);
                for stmt in &block.statements {
                    self.bind_statement(stmt, inner, false);
                }
            }
            // Expression-level statements introduce no bindings.
            Statement::Expression(_)
            | Statement::Return(_)
            | Statement::Throw(_)
            | Statement::Empty(_) => {}
        }
    }

    /// An if-branch that is itself a block opens a scope; a bare
    /// statement binds into the enclosing scope (where only `var` can
    /// introduce a name anyway).
    fn bind_branch(&mut self, stmt: &Statement, scope: ScopeId) {
        match stmt {
            Statement::Block(block) => {
                let inner = self.table.push_scope(ScopeKind::Block, scope);
                for stmt in &block.statements {
                    self.bind_statement(stmt, inner, false);
                }
            }
            other => self.bind_statement(other, scope, false),
        }
    }

    fn bind_class_member(&mut self, member: &ClassMember, class: ScopeId) {
        match member {
            // Field names are properties, not lexical bindings.
            ClassMember::Field(_) => {}
            ClassMember::Method(method) => {
                let body = self.table.push_scope(ScopeKind::Function, class);
                self.bind_type_params(method.type_params.as_deref(), body);
                self.bind_params(&method.params, body);
                for stmt in &method.body.statements {
                    self.bind_statement(stmt, body, false);
                }
            }
            ClassMember::Constructor(ctor) => {
                let body = self.table.push_scope(ScopeKind::Function, class);
                self.bind_params(&ctor.params, body);
                for stmt in &ctor.body.statements {
                    self.bind_statement(stmt, body, false);
                }
            }
        }
    }

    fn bind_params(&mut self, params: &[Parameter], scope: ScopeId) {
        for param in params {
            self.define(scope, &param.name, BindingKind::Parameter, false);
        }
    }

    fn bind_type_params(&mut self, params: Option<&[TypeParameter]>, scope: ScopeId) {
        for param in params.unwrap_or_default() {
            self.define(scope, &param.name, BindingKind::TypeParameter, false);
        }
    }

    fn define(&mut self, scope: ScopeId, name: &Identifier, kind: BindingKind, exported: bool) {
        self.table.define(
            scope,
            Binding {
                name: name.name,
                kind,
                exported,
                span: name.span,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typelift_parser::Parser;

    fn bind(source: &str) -> (BindingTable, typelift_parser::Interner) {
        let (module, interner) = Parser::new(source).unwrap().parse().unwrap();
        (Binder::bind(&module), interner)
    }

    #[test]
    fn test_class_binding_is_safe() {
        let (table, interner) = bind("class User {}");
        let name = interner.lookup("User").unwrap();
        let binding = table.resolve(table.module_scope(), name).unwrap();
        assert_eq!(binding.kind, BindingKind::Class);
        assert!(binding.is_safe_reference());
    }

    #[test]
    fn test_exported_declarations_stay_safe() {
        let (table, interner) = bind("export class User {}\nexport const ids = [];");
        let root = table.module_scope();

        let user = table.resolve(root, interner.lookup("User").unwrap()).unwrap();
        assert!(user.exported);
        assert!(user.is_safe_reference());

        let ids = table.resolve(root, interner.lookup("ids").unwrap()).unwrap();
        assert_eq!(ids.kind, BindingKind::Variable);
        assert!(ids.is_safe_reference());
    }

    #[test]
    fn test_function_and_imports_are_unsafe() {
        let (table, interner) = bind(
            r#"
            import { ObjectId } from "mongoose";
            import type { Document } from "mongoose";
            function helper() {}
            "#,
        );
        let root = table.module_scope();

        for name in ["ObjectId", "Document", "helper"] {
            let sym = interner.lookup(name).unwrap();
            assert!(!table.is_safe_reference(root, sym), "{name} should be unsafe");
        }
        let doc = table
            .resolve(root, interner.lookup("Document").unwrap())
            .unwrap();
        assert_eq!(doc.kind, BindingKind::ImportType);
    }

    #[test]
    fn test_unresolved_name_is_unsafe() {
        let (table, mut interner) = bind("class User {}");
        let missing = interner.intern("Missing");
        assert!(!table.is_safe_reference(table.module_scope(), missing));
    }

    #[test]
    fn test_var_hoists_past_blocks() {
        let (table, interner) = bind("{ var hoisted = 1; let scoped = 2; }");
        let root = table.module_scope();

        let hoisted = interner.lookup("hoisted").unwrap();
        assert!(table.resolve(root, hoisted).is_some());

        // `let` stays in the block scope.
        let scoped = interner.lookup("scoped").unwrap();
        assert!(table.resolve(root, scoped).is_none());
    }

    #[test]
    fn test_redeclaration_replaces() {
        let (table, interner) = bind("function User() {}\nclass User {}");
        let binding = table
            .resolve(table.module_scope(), interner.lookup("User").unwrap())
            .unwrap();
        assert_eq!(binding.kind, BindingKind::Class);
    }

    #[test]
    fn test_hoist_scope_skips_class_bodies() {
        let (table, _) = bind("class User { greet() { return 1; } }");
        // Scopes in walk order: 0 module, 1 class body, 2 method body.
        assert_eq!(table.scope_count(), 3);
        assert_eq!(table.hoist_scope(ScopeId(1)), ScopeId(0));
        assert_eq!(table.hoist_scope(ScopeId(2)), ScopeId(2));
    }

    #[test]
    fn test_resolution_walks_outward() {
        let (table, interner) = bind("class Role {}\nclass User { role() { return 1; } }");
        let role = interner.lookup("Role").unwrap();
        // From the method body (scope 3), Role resolves through the class
        // scope to the module scope.
        assert!(table.is_safe_reference(ScopeId(3), role));
    }
}
