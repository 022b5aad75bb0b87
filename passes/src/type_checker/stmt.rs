use felangkit_ast::{AssignmentTarget, Block, CallableDeclaration, FeType, ForKind, Node, Statement};
use felangkit_errors::ErrorKind;

use crate::symbol_table::SymbolKind;

use super::expr::is_assignable;
use super::TypeChecker;

impl<'a> TypeChecker<'a> {
    pub fn check_block(&mut self, block: &Block) {
        let mut reported_unreachable = false;
        let mut terminated = false;
        for stmt in &block.statements {
            if terminated {
                if !reported_unreachable {
                    self.reporter.collect_error(ErrorKind::UnreachableCode, stmt.position());
                    reported_unreachable = true;
                }
                continue;
            }
            self.check_statement(stmt);
            if is_terminal(stmt) {
                terminated = true;
            }
        }
    }

    pub fn check_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::VariableDeclaration(decl) => {
                if let Some(init) = &decl.initializer {
                    self.check(init, &decl.declared_type);
                }
                if let Err(existing) = self.symbols.declare(
                    &decl.name,
                    SymbolKind::Variable,
                    decl.declared_type.clone(),
                    decl.position,
                ) {
                    let _ = existing;
                    self.reporter.collect_error(ErrorKind::VariableAlreadyDeclared(decl.name.clone()), decl.position);
                } else if decl.initializer.is_some() {
                    self.symbols.mark_initialized(&decl.name);
                }
            }
            Statement::ConstantDeclaration(decl) => {
                self.check(&decl.initializer, &decl.declared_type);
                if self
                    .symbols
                    .declare(&decl.name, SymbolKind::Constant, decl.declared_type.clone(), decl.position)
                    .is_err()
                {
                    self.reporter.collect_error(ErrorKind::VariableAlreadyDeclared(decl.name.clone()), decl.position);
                }
            }
            Statement::Assignment(assign) => {
                let target_ty = self.check_assignment_target(&assign.target);
                self.check(&assign.value, &target_ty);
                if let AssignmentTarget::Variable { name, .. } = &assign.target {
                    self.symbols.mark_initialized(name);
                }
            }
            Statement::If(if_stmt) => {
                let cond_ty = self.infer(&if_stmt.condition);
                if !cond_ty.is_error() && cond_ty != FeType::Boolean {
                    self.reporter.collect_error(
                        ErrorKind::TypeMismatch { expected: "boolean".to_string(), actual: cond_ty.to_string() },
                        if_stmt.condition.position(),
                    );
                }
                self.symbols.push_scope();
                self.check_block(&if_stmt.then_block);
                self.symbols.pop_scope();
                if let Some(else_block) = &if_stmt.else_block {
                    self.symbols.push_scope();
                    self.check_block(else_block);
                    self.symbols.pop_scope();
                }
            }
            Statement::While(while_stmt) => {
                let cond_ty = self.infer(&while_stmt.condition);
                if !cond_ty.is_error() && cond_ty != FeType::Boolean {
                    self.reporter.collect_error(
                        ErrorKind::TypeMismatch { expected: "boolean".to_string(), actual: cond_ty.to_string() },
                        while_stmt.condition.position(),
                    );
                }
                self.loop_depth += 1;
                self.symbols.push_scope();
                self.check_block(&while_stmt.body);
                self.symbols.pop_scope();
                self.loop_depth -= 1;
            }
            Statement::For(for_stmt) => {
                self.symbols.push_scope();
                match &for_stmt.kind {
                    ForKind::Range { variable, start, end, step } => {
                        self.check(start, &FeType::Integer);
                        self.check(end, &FeType::Integer);
                        if let Some(step) = step {
                            self.check(step, &FeType::Integer);
                        }
                        let _ = self.symbols.declare(variable, SymbolKind::Variable, FeType::Integer, for_stmt.position);
                        self.symbols.mark_initialized(variable);
                    }
                    ForKind::ForEach { variable, iterable } => {
                        let iterable_ty = self.infer(iterable);
                        let element_ty = match iterable_ty {
                            FeType::Array { element, .. } => *element,
                            FeType::Str => FeType::Character,
                            FeType::Error => FeType::Error,
                            other => {
                                self.reporter.collect_error(
                                    ErrorKind::TypeMismatch { expected: "array".to_string(), actual: other.to_string() },
                                    iterable.position(),
                                );
                                FeType::Error
                            }
                        };
                        let _ = self.symbols.declare(variable, SymbolKind::Variable, element_ty, for_stmt.position);
                        self.symbols.mark_initialized(variable);
                    }
                }
                self.loop_depth += 1;
                self.check_block(&for_stmt.body);
                self.loop_depth -= 1;
                self.symbols.pop_scope();
            }
            Statement::FunctionDeclaration(decl) => self.check_callable(decl, true),
            Statement::ProcedureDeclaration(decl) => self.check_callable(decl, false),
            Statement::Return(ret) => self.check_return(ret),
            Statement::Break(brk) => {
                if self.loop_depth == 0 {
                    self.reporter.collect_error(ErrorKind::BreakOutsideLoop, brk.position);
                }
            }
            Statement::ExpressionStatement(expr_stmt) => {
                self.infer(&expr_stmt.expression);
            }
            Statement::Block(block) => {
                self.symbols.push_scope();
                self.check_block(block);
                self.symbols.pop_scope();
            }
        }
    }

    fn check_callable(&mut self, decl: &CallableDeclaration, is_function: bool) {
        self.symbols.push_scope();
        for param in &decl.parameters {
            let _ = self.symbols.declare(&param.name, SymbolKind::Parameter, param.declared_type.clone(), param.position);
        }
        let previous_callable =
            std::mem::replace(&mut self.current_callable, Some((decl.name.clone(), decl.return_type.clone())));
        let previous_loop_depth = std::mem::replace(&mut self.loop_depth, 0);

        self.check_block(&decl.body);

        if is_function && decl.return_type.is_some() && !block_always_returns(&decl.body) {
            self.reporter.collect_error(ErrorKind::MissingReturnStatement(decl.name.clone()), decl.position);
        }

        self.loop_depth = previous_loop_depth;
        self.current_callable = previous_callable;
        self.symbols.pop_scope();
    }

    fn check_return(&mut self, ret: &felangkit_ast::ReturnStatement) {
        let Some((function, expected)) = self.current_callable.clone() else {
            self.reporter.collect_error(ErrorKind::ReturnOutsideFunction, ret.position);
            if let Some(value) = &ret.value {
                self.infer(value);
            }
            return;
        };

        match (expected, &ret.value) {
            (Some(expected), Some(value)) => {
                let actual = self.infer(value);
                if !is_assignable(&actual, &expected) {
                    self.reporter.collect_error(
                        ErrorKind::ReturnTypeMismatch { function, expected: expected.to_string(), actual: actual.to_string() },
                        ret.position,
                    );
                }
            }
            (Some(expected), None) => {
                self.reporter.collect_error(
                    ErrorKind::ReturnTypeMismatch { function, expected: expected.to_string(), actual: "void".to_string() },
                    ret.position,
                );
            }
            (None, Some(value)) => {
                self.infer(value);
                self.reporter.collect_error(ErrorKind::VoidFunctionReturnsValue(function), ret.position);
            }
            (None, None) => {}
        }
    }

    /// Validates the assignment target (constant reassignment, undeclared
    /// name) and returns the type the right-hand side must be assignable
    /// to. Each sub-expression making up the target (the array/record
    /// base, the indices) is inferred exactly once here — `check_statement`
    /// must not re-infer them afterward, or a single bad root cause (e.g.
    /// an undeclared array) would surface as two diagnostics instead of
    /// one.
    fn check_assignment_target(&mut self, target: &AssignmentTarget) -> FeType {
        match target {
            AssignmentTarget::Variable { name, position } => match self.symbols.lookup(name) {
                Some(symbol) if symbol.kind == SymbolKind::Constant => {
                    self.reporter.collect_error(ErrorKind::ConstantReassignment(name.clone()), *position);
                    symbol.ty
                }
                Some(symbol) => symbol.ty,
                None => {
                    self.reporter.collect_error(ErrorKind::UndeclaredVariable(name.clone()), *position);
                    FeType::Error
                }
            },
            AssignmentTarget::ArrayElement { array, indices, .. } => {
                let array_ty = self.infer(array);
                for index in indices {
                    let index_ty = self.infer(index);
                    if !index_ty.is_error() && index_ty != FeType::Integer {
                        self.reporter.collect_error(
                            ErrorKind::ArrayIndexTypeMismatch { expected: "integer".to_string(), actual: index_ty.to_string() },
                            index.position(),
                        );
                    }
                }
                match array_ty {
                    FeType::Array { element, .. } => *element,
                    FeType::Error => FeType::Error,
                    _ => {
                        self.reporter.collect_error(ErrorKind::InvalidArrayAccess, array.position());
                        FeType::Error
                    }
                }
            }
            AssignmentTarget::Field { record, field_name, .. } => match self.infer(record) {
                FeType::Record { name, fields } => match fields.get(field_name) {
                    Some(ty) => ty.clone(),
                    None => {
                        self.reporter.collect_error(
                            ErrorKind::UndeclaredField { field: field_name.clone(), record: name },
                            record.position(),
                        );
                        FeType::Error
                    }
                },
                FeType::Error => FeType::Error,
                _ => {
                    self.reporter.collect_error(ErrorKind::InvalidFieldAccess, record.position());
                    FeType::Error
                }
            },
        }
    }
}

/// Does `stmt` end every path running through it, for `unreachableCode`
/// purposes? Unlike `block_always_returns` (which cares specifically about
/// a non-void `return`), any `return`/`break` counts here, and the same
/// recursive `if`/`else` and nested-`Block` shapes apply.
fn is_terminal(stmt: &Statement) -> bool {
    match stmt {
        Statement::Return(_) | Statement::Break(_) => true,
        Statement::If(if_stmt) => match &if_stmt.else_block {
            Some(else_block) => block_is_terminal(&if_stmt.then_block) && block_is_terminal(else_block),
            None => false,
        },
        Statement::Block(inner) => block_is_terminal(inner),
        _ => false,
    }
}

fn block_is_terminal(block: &Block) -> bool {
    block.statements.last().map(is_terminal).unwrap_or(false)
}

/// Light-weight reachability check for missing-return detection: does every
/// path through `block` end in a `return`? Only looks at the trailing
/// statement and `if`/`else` branches, not general control flow.
fn block_always_returns(block: &Block) -> bool {
    match block.statements.last() {
        Some(Statement::Return(ret)) => ret.value.is_some(),
        Some(Statement::If(if_stmt)) => match &if_stmt.else_block {
            Some(else_block) => block_always_returns(&if_stmt.then_block) && block_always_returns(else_block),
            None => false,
        },
        Some(Statement::Block(inner)) => block_always_returns(inner),
        _ => false,
    }
}
