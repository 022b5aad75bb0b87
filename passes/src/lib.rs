//! Symbol table and type checker semantic analysis passes.

pub mod symbol_table;
pub mod type_checker;

pub use symbol_table::{ScopeId, Symbol, SymbolKind, SymbolTable};
pub use type_checker::{detect_cycle, is_assignable, TypeChecker};
