//! Bidirectional expression typing and statement checking.

mod cycles;
mod expr;
mod stmt;

pub use cycles::detect_cycle;
pub use expr::is_assignable;

use felangkit_ast::{FeType, Statement};
use felangkit_errors::ErrorReporter;

use crate::symbol_table::SymbolTable;

/// Walks a parsed program, declaring and type-checking against a shared
/// `SymbolTable`/`ErrorReporter` pair. One `TypeChecker` per
/// `validateWithSemantics` call; not reused across runs.
pub struct TypeChecker<'a> {
    symbols: &'a SymbolTable,
    reporter: &'a ErrorReporter,
    loop_depth: u32,
    /// `(name, return type)` of the callable currently being checked;
    /// `None` for a procedure's return type distinguishes "inside a
    /// procedure, no return value allowed" from "not inside any callable"
    /// (tracked by the outer `Option` instead).
    current_callable: Option<(String, Option<FeType>)>,
}

impl<'a> TypeChecker<'a> {
    pub fn new(symbols: &'a SymbolTable, reporter: &'a ErrorReporter) -> Self {
        Self { symbols, reporter, loop_depth: 0, current_callable: None }
    }

    /// Checks every top-level statement, first pre-declaring all
    /// function/procedure signatures so forward references and mutual
    /// recursion resolve.
    pub fn check_program(&mut self, statements: &[Statement]) {
        self.predeclare_callables(statements);
        for stmt in statements {
            self.check_statement(stmt);
        }
    }

    fn predeclare_callables(&mut self, statements: &[Statement]) {
        use crate::symbol_table::SymbolKind;
        use felangkit_errors::ErrorKind;

        for stmt in statements {
            let (decl, kind, return_type) = match stmt {
                Statement::FunctionDeclaration(decl) => (decl, SymbolKind::Function, decl.return_type.clone()),
                Statement::ProcedureDeclaration(decl) => (decl, SymbolKind::Procedure, None),
                _ => continue,
            };
            let signature = FeType::Function {
                parameters: decl.parameters.iter().map(|p| p.declared_type.clone()).collect(),
                return_type: return_type.map(Box::new),
            };
            if self.symbols.declare(&decl.name, kind, signature, decl.position).is_err() {
                self.reporter.collect_error(ErrorKind::FunctionAlreadyDeclared(decl.name.clone()), decl.position);
            }
        }
    }
}
