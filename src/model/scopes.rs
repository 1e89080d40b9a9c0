//! Symbol table and scope management for the model builder.
//!
//! Tracks local bindings and their scopes while walking a chunk. Lua's scoping rules
//! are simple but have two sharp edges the builder must honor:
//!
//! - A `local` is visible only *after* its declaring statement, so `local x = x`
//!   initializes the new `x` from the outer one.
//! - The condition of `repeat ... until cond` is evaluated in the body's scope, so
//!   `cond` can read locals declared inside the loop body.

use lumo_syntax::ast::Span;
use std::collections::HashMap;

/// Unique identifier for local symbols.
pub type SymbolId = usize;

/// What introduced a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    Function,
    Block,
    Loop,
    Repeat,
}

/// A local binding.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub span: Span,
    pub scope: usize,
}

#[derive(Debug)]
struct Scope {
    parent: Option<usize>,
    kind: ScopeKind,
    symbols: HashMap<String, SymbolId>,
}

impl Scope {
    fn new(parent: Option<usize>, kind: ScopeKind) -> Self {
        Self {
            parent,
            kind,
            symbols: HashMap::new(),
        }
    }
}

/// Symbol table with a parented scope chain.
///
/// Globals are deliberately not stored here; a name that fails lookup is a global by
/// definition in Lua, and the builder classifies it against the builtin registry.
#[derive(Debug)]
pub struct ScopeTable {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
    current_scope: usize,
}

impl Default for ScopeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTable {
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            scopes: vec![Scope::new(None, ScopeKind::Module)],
            current_scope: 0,
        }
    }

    /// Enter a new scope.
    pub fn enter_scope(&mut self, kind: ScopeKind) {
        let new_scope = Scope::new(Some(self.current_scope), kind);
        self.scopes.push(new_scope);
        self.current_scope = self.scopes.len() - 1;
    }

    /// Exit the current scope.
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current_scope].parent {
            self.current_scope = parent;
        }
    }

    /// Define a local in the current scope.
    ///
    /// Shadowing is allowed and simply rebinds the name; the shadowed symbol keeps
    /// its ID so references recorded earlier stay valid.
    pub fn define(&mut self, name: impl Into<String>, span: Span) -> SymbolId {
        let name = name.into();
        let id = self.symbols.len();
        self.scopes[self.current_scope].symbols.insert(name.clone(), id);
        self.symbols.push(Symbol {
            name,
            span,
            scope: self.current_scope,
        });
        id
    }

    /// Look up a name through the scope chain.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        let mut scope_idx = self.current_scope;
        loop {
            if let Some(&id) = self.scopes[scope_idx].symbols.get(name) {
                return Some(id);
            }
            match self.scopes[scope_idx].parent {
                Some(parent) => scope_idx = parent,
                None => return None,
            }
        }
    }

    /// Look up a name only in the current scope (no parent lookup).
    pub fn lookup_local(&self, name: &str) -> Option<SymbolId> {
        self.scopes[self.current_scope].symbols.get(name).copied()
    }

    /// Get a symbol by ID.
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    /// Kind of the current scope.
    pub fn current_scope_kind(&self) -> ScopeKind {
        self.scopes[self.current_scope].kind
    }

    /// `true` while inside a function body (at any nesting depth).
    pub fn in_function(&self) -> bool {
        let mut scope_idx = self.current_scope;
        loop {
            if self.scopes[scope_idx].kind == ScopeKind::Function {
                return true;
            }
            match self.scopes[scope_idx].parent {
                Some(parent) => scope_idx = parent,
                None => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_through_chain() {
        let mut table = ScopeTable::new();
        let outer = table.define("x", Span::new(0, 1));
        table.enter_scope(ScopeKind::Function);
        assert_eq!(table.lookup("x"), Some(outer));
        assert_eq!(table.lookup_local("x"), None);
        let inner = table.define("x", Span::new(10, 11));
        assert_eq!(table.lookup("x"), Some(inner));
        table.exit_scope();
        assert_eq!(table.lookup("x"), Some(outer));
    }

    #[test]
    fn test_unknown_name_is_global() {
        let table = ScopeTable::new();
        assert_eq!(table.lookup("print"), None);
    }

    #[test]
    fn test_in_function() {
        let mut table = ScopeTable::new();
        assert!(!table.in_function());
        table.enter_scope(ScopeKind::Function);
        table.enter_scope(ScopeKind::Block);
        assert!(table.in_function());
        assert_eq!(table.current_scope_kind(), ScopeKind::Block);
    }
}
