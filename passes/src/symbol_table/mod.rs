//! The scope tree and symbol bindings built up while walking declarations.
//! Wrapped in a `Mutex` so a `SymbolTable` can be shared across
//! threads the way `ErrorReporter` is, even though a single type-check run
//! is the table's only writer at a time.

mod scope;

pub use scope::{ScopeId, Symbol, SymbolKind};

use felangkit_ast::FeType;
use felangkit_span::SourcePosition;
use parking_lot::Mutex;

use scope::Scope;

struct Inner {
    arena: Vec<Scope>,
    current: ScopeId,
}

pub struct SymbolTable {
    inner: Mutex<Inner>,
}

/// Names and signatures of the built-in routines every program starts
/// with: I/O plus a handful of numeric/string conversions.
fn builtins() -> Vec<(&'static str, SymbolKind, FeType)> {
    use FeType::*;
    use SymbolKind::*;
    vec![
        ("readLine", Function, Function { parameters: vec![], return_type: Some(Box::new(Str)) }),
        ("writeLine", Procedure, Function { parameters: vec![Unknown], return_type: None }),
        ("write", Procedure, Function { parameters: vec![Unknown], return_type: None }),
        ("toString", Function, Function { parameters: vec![Unknown], return_type: Some(Box::new(Str)) }),
        ("toInteger", Function, Function { parameters: vec![Str], return_type: Some(Box::new(Integer)) }),
        ("toReal", Function, Function { parameters: vec![Str], return_type: Some(Box::new(Real)) }),
        ("sqrt", Function, Function { parameters: vec![Real], return_type: Some(Box::new(Real)) }),
        ("abs", Function, Function { parameters: vec![Real], return_type: Some(Box::new(Real)) }),
    ]
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut root = Scope::root();
        for (name, kind, ty) in builtins() {
            root.symbols.insert(name.to_string(), Symbol::new(name, kind, ty, SourcePosition::none()));
        }
        Self { inner: Mutex::new(Inner { arena: vec![root], current: ScopeId(0) }) }
    }

    pub fn global_scope(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn current_scope(&self) -> ScopeId {
        self.inner.lock().current
    }

    /// Opens a new child scope under the current one and makes it current.
    pub fn push_scope(&self) -> ScopeId {
        let mut inner = self.inner.lock();
        let parent = inner.current;
        inner.arena.push(Scope::child(parent));
        let id = ScopeId(inner.arena.len() - 1);
        inner.current = id;
        id
    }

    /// Returns to the parent of the current scope. No-op at the global
    /// scope.
    pub fn pop_scope(&self) {
        let mut inner = self.inner.lock();
        if let Some(parent) = inner.arena[inner.current.0].parent {
            inner.current = parent;
        }
    }

    /// Declares `name` in the current scope. Fails (without mutating
    /// anything) if the name already exists in *this* scope — shadowing an
    /// outer scope's binding is allowed, redeclaring within the same one
    /// is not.
    pub fn declare(&self, name: &str, kind: SymbolKind, ty: FeType, position: SourcePosition) -> Result<(), Symbol> {
        let mut inner = self.inner.lock();
        let current = inner.current;
        let scope = &mut inner.arena[current.0];
        if let Some(existing) = scope.symbols.get(name) {
            return Err(existing.clone());
        }
        scope.symbols.insert(name.to_string(), Symbol::new(name, kind, ty, position));
        Ok(())
    }

    pub fn exists_in_current_scope(&self, name: &str) -> bool {
        let inner = self.inner.lock();
        inner.arena[inner.current.0].symbols.contains_key(name)
    }

    /// Walks from the current scope up through parents looking for `name`.
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        let inner = self.inner.lock();
        let mut scope_id = Some(inner.current);
        while let Some(id) = scope_id {
            let scope = &inner.arena[id.0];
            if let Some(symbol) = scope.symbols.get(name) {
                return Some(symbol.clone());
            }
            scope_id = scope.parent;
        }
        None
    }

    pub fn mark_used(&self, name: &str) {
        let mut inner = self.inner.lock();
        let mut scope_id = Some(inner.current);
        while let Some(id) = scope_id {
            let scope = &mut inner.arena[id.0];
            if let Some(symbol) = scope.symbols.get_mut(name) {
                symbol.used = true;
                return;
            }
            scope_id = scope.parent;
        }
    }

    pub fn mark_initialized(&self, name: &str) {
        let mut inner = self.inner.lock();
        let mut scope_id = Some(inner.current);
        while let Some(id) = scope_id {
            let scope = &mut inner.arena[id.0];
            if let Some(symbol) = scope.symbols.get_mut(name) {
                symbol.initialized = true;
                return;
            }
            scope_id = scope.parent;
        }
    }

    pub fn symbols_in_scope(&self, scope: ScopeId) -> Vec<Symbol> {
        self.inner.lock().arena[scope.0].symbols.values().cloned().collect()
    }

    /// Every symbol declared anywhere in the table, across all scopes.
    /// Used by the diagnostic formatter's "did you mean" search, which has
    /// no notion of "current scope" once analysis has finished.
    pub fn all_symbols(&self) -> Vec<Symbol> {
        self.inner.lock().arena.iter().flat_map(|scope| scope.symbols.values().cloned()).collect()
    }

    /// Every declared variable/constant/parameter never marked `used`,
    /// across every scope. Functions and procedures are never reported as
    /// unused, and built-ins (which live only in the global scope and
    /// were never "declared" by user code) are skipped too.
    pub fn unused_symbols(&self) -> Vec<Symbol> {
        let inner = self.inner.lock();
        let builtin_names: std::collections::HashSet<&str> = builtins().into_iter().map(|(n, ..)| n).collect();
        inner
            .arena
            .iter()
            .enumerate()
            .flat_map(|(idx, scope)| {
                scope.symbols.values().filter(move |s| !(idx == 0 && builtin_names.contains(s.name.as_str()))).cloned()
            })
            .filter(|s| !s.used && !matches!(s.kind, SymbolKind::Function | SymbolKind::Procedure))
            .collect()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redeclaring_in_same_scope_fails_but_shadowing_outer_scope_succeeds() {
        let table = SymbolTable::new();
        table.declare("x", SymbolKind::Variable, FeType::Integer, SourcePosition::start()).unwrap();
        assert!(table.declare("x", SymbolKind::Variable, FeType::Integer, SourcePosition::start()).is_err());

        table.push_scope();
        assert!(table.declare("x", SymbolKind::Variable, FeType::Real, SourcePosition::start()).is_ok());
        assert_eq!(table.lookup("x").unwrap().ty, FeType::Real);
        table.pop_scope();
        assert_eq!(table.lookup("x").unwrap().ty, FeType::Integer);
    }

    #[test]
    fn lookup_walks_up_the_parent_chain() {
        let table = SymbolTable::new();
        table.declare("outer", SymbolKind::Constant, FeType::Boolean, SourcePosition::start()).unwrap();
        table.push_scope();
        assert!(table.lookup("outer").is_some());
        assert!(table.lookup("missing").is_none());
    }

    #[test]
    fn builtins_are_preregistered_and_excluded_from_unused_report() {
        let table = SymbolTable::new();
        assert!(table.lookup("writeLine").is_some());
        assert!(table.unused_symbols().is_empty());
    }

    #[test]
    fn unused_symbols_reports_undrawn_declarations() {
        let table = SymbolTable::new();
        table.declare("n", SymbolKind::Variable, FeType::Integer, SourcePosition::start()).unwrap();
        assert_eq!(table.unused_symbols().len(), 1);
        table.mark_used("n");
        assert!(table.unused_symbols().is_empty());
    }
}
