use felangkit_ast::{BinaryOp, Expression, FeType, Node, UnaryOp};
use felangkit_errors::ErrorKind;

use super::TypeChecker;

/// Two types are implicitly compatible for assignment/argument-passing
/// purposes when equal, when an `integer` flows into a `real` slot
/// (numeric widening), or when a `character` flows into a `string` slot.
/// Either side being `error` absorbs silently (invariant 4).
pub fn is_assignable(from: &FeType, to: &FeType) -> bool {
    if from.is_error() || to.is_error() {
        return true;
    }
    if from == to {
        return true;
    }
    matches!((from, to), (FeType::Integer, FeType::Real) | (FeType::Character, FeType::Str))
}

impl<'a> TypeChecker<'a> {
    /// Synthesizes a type for `expr` with no expected type in hand.
    pub fn infer(&mut self, expr: &Expression) -> FeType {
        match expr {
            Expression::Literal(lit) => self.infer_literal(lit),
            Expression::Identifier(ident) => self.infer_identifier(&ident.name, ident.position),
            Expression::Binary(bin) => self.infer_binary(bin),
            Expression::Unary(un) => self.infer_unary(un),
            Expression::ArrayAccess(access) => self.infer_array_access(access),
            Expression::FieldAccess(access) => self.infer_field_access(access),
            Expression::FunctionCall(call) => self.infer_call(call),
        }
    }

    /// Checks `expr` against an expected type, propagating the expectation
    /// into the expression where that can resolve ambiguity (bidirectional
    /// typing). Returns the type actually used (the widened
    /// expected type on a successful implicit conversion), or `error`.
    pub fn check(&mut self, expr: &Expression, expected: &FeType) -> FeType {
        let actual = self.infer(expr);
        if is_assignable(&actual, expected) {
            if actual.is_error() || expected.is_error() { actual } else { expected.clone() }
        } else {
            self.reporter.collect_error(ErrorKind::TypeMismatch {
                expected: expected.to_string(),
                actual: actual.to_string(),
            }, expr.position());
            FeType::Error
        }
    }

    fn infer_literal(&mut self, lit: &felangkit_ast::LiteralExpression) -> FeType {
        use felangkit_ast::LiteralValue::*;
        match &lit.value {
            Integer(_) => FeType::Integer,
            Real(_) => FeType::Real,
            Str(_) => FeType::Str,
            Character(_) => FeType::Character,
            Boolean(_) => FeType::Boolean,
        }
    }

    fn infer_identifier(&mut self, name: &str, position: felangkit_span::SourcePosition) -> FeType {
        match self.symbols.lookup(name) {
            Some(symbol) => {
                self.symbols.mark_used(name);
                if !symbol.initialized {
                    self.reporter.collect_error(ErrorKind::VariableNotInitialized(name.to_string()), position);
                }
                symbol.ty
            }
            None => {
                self.reporter.collect_error(ErrorKind::UndeclaredVariable(name.to_string()), position);
                FeType::Error
            }
        }
    }

    fn infer_binary(&mut self, bin: &felangkit_ast::BinaryExpression) -> FeType {
        let left = self.infer(&bin.left);
        let right = self.infer(&bin.right);
        let position = bin.position;

        match bin.op {
            BinaryOp::And | BinaryOp::Or => {
                self.expect_type(&left, &FeType::Boolean, bin.left.position());
                self.expect_type(&right, &FeType::Boolean, bin.right.position());
                FeType::Boolean
            }
            BinaryOp::Add if matches!(left, FeType::Str | FeType::Character) || matches!(right, FeType::Str | FeType::Character) => {
                // String concatenation via '+'; the
                // parser leaves this as `Add`, the checker just resolves
                // its type without rewriting the tree.
                if matches!(left, FeType::Str | FeType::Character) && matches!(right, FeType::Str | FeType::Character) {
                    FeType::Str
                } else {
                    self.incompatible(&left, &right, "+", position)
                }
            }
            BinaryOp::Add | BinaryOp::Subtract | BinaryOp::Multiply => {
                if left.is_error() || right.is_error() {
                    FeType::Error
                } else if !left.is_numeric() || !right.is_numeric() {
                    self.incompatible(&left, &right, op_symbol(bin.op), position)
                } else if left == FeType::Real || right == FeType::Real {
                    FeType::Real
                } else {
                    FeType::Integer
                }
            }
            // `/` always yields `real`, regardless of operand domain.
            BinaryOp::Divide => {
                if left.is_error() || right.is_error() {
                    FeType::Error
                } else if !left.is_numeric() || !right.is_numeric() {
                    self.incompatible(&left, &right, op_symbol(bin.op), position)
                } else {
                    FeType::Real
                }
            }
            // `%` requires both operands `integer`; reals are rejected
            // rather than promoted.
            BinaryOp::Modulo => {
                if left.is_error() || right.is_error() {
                    FeType::Error
                } else if left == FeType::Integer && right == FeType::Integer {
                    FeType::Integer
                } else {
                    self.incompatible(&left, &right, "modulo", position)
                }
            }
            BinaryOp::Equal | BinaryOp::NotEqual => {
                if left.is_error() || right.is_error() || left == right || (left.is_numeric() && right.is_numeric()) {
                    FeType::Boolean
                } else {
                    self.incompatible(&left, &right, op_symbol(bin.op), position);
                    FeType::Boolean
                }
            }
            BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => {
                if left.is_error() || right.is_error() {
                    FeType::Boolean
                } else if left.is_numeric() && right.is_numeric() {
                    FeType::Boolean
                } else {
                    self.incompatible(&left, &right, op_symbol(bin.op), position);
                    FeType::Boolean
                }
            }
            BinaryOp::Concatenate => FeType::Str,
        }
    }

    fn incompatible(&mut self, left: &FeType, right: &FeType, op: &str, position: felangkit_span::SourcePosition) -> FeType {
        self.reporter.collect_error(
            ErrorKind::IncompatibleTypes { left: left.to_string(), right: right.to_string(), operation: op.to_string() },
            position,
        );
        FeType::Error
    }

    fn expect_type(&mut self, actual: &FeType, expected: &FeType, position: felangkit_span::SourcePosition) {
        if !is_assignable(actual, expected) {
            self.reporter.collect_error(
                ErrorKind::TypeMismatch { expected: expected.to_string(), actual: actual.to_string() },
                position,
            );
        }
    }

    fn infer_unary(&mut self, un: &felangkit_ast::UnaryExpression) -> FeType {
        let operand = self.infer(&un.operand);
        match un.op {
            UnaryOp::Not => {
                self.expect_type(&operand, &FeType::Boolean, un.operand.position());
                FeType::Boolean
            }
            UnaryOp::Plus | UnaryOp::Minus => {
                if operand.is_error() {
                    FeType::Error
                } else if operand.is_numeric() {
                    operand
                } else {
                    self.reporter.collect_error(
                        ErrorKind::IncompatibleTypes {
                            left: operand.to_string(),
                            right: operand.to_string(),
                            operation: "unary -/+".to_string(),
                        },
                        un.position,
                    );
                    FeType::Error
                }
            }
        }
    }

    fn infer_array_access(&mut self, access: &felangkit_ast::ArrayAccessExpression) -> FeType {
        let array_ty = self.infer(&access.array);
        for index in &access.indices {
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
            FeType::Str => FeType::Character,
            FeType::Error => FeType::Error,
            _ => {
                self.reporter.collect_error(ErrorKind::InvalidArrayAccess, access.position);
                FeType::Error
            }
        }
    }

    fn infer_field_access(&mut self, access: &felangkit_ast::FieldAccessExpression) -> FeType {
        let record_ty = self.infer(&access.record);
        match record_ty {
            FeType::Record { name, fields } => match fields.get(&access.field_name) {
                Some(ty) => ty.clone(),
                None => {
                    self.reporter.collect_error(
                        ErrorKind::UndeclaredField { field: access.field_name.clone(), record: name },
                        access.position,
                    );
                    FeType::Error
                }
            },
            FeType::Error => FeType::Error,
            _ => {
                self.reporter.collect_error(ErrorKind::InvalidFieldAccess, access.position);
                FeType::Error
            }
        }
    }

    fn infer_call(&mut self, call: &felangkit_ast::FunctionCallExpression) -> FeType {
        let signature = self.symbols.lookup(&call.name);
        let Some(symbol) = signature else {
            self.reporter.collect_error(ErrorKind::UndeclaredFunction(call.name.clone()), call.position);
            for arg in &call.arguments {
                self.infer(arg);
            }
            return FeType::Error;
        };
        self.symbols.mark_used(&call.name);

        let FeType::Function { parameters, return_type } = symbol.ty else {
            self.reporter.collect_error(ErrorKind::UndeclaredFunction(call.name.clone()), call.position);
            return FeType::Error;
        };

        if parameters.len() != call.arguments.len() {
            self.reporter.collect_error(
                ErrorKind::IncorrectArgumentCount {
                    function: call.name.clone(),
                    expected: parameters.len(),
                    actual: call.arguments.len(),
                },
                call.position,
            );
        }

        for (index, arg) in call.arguments.iter().enumerate() {
            let actual = self.infer(arg);
            if let Some(expected) = parameters.get(index) {
                if *expected != FeType::Unknown && !is_assignable(&actual, expected) {
                    self.reporter.collect_error(
                        ErrorKind::ArgumentTypeMismatch {
                            function: call.name.clone(),
                            param_index: index,
                            expected: expected.to_string(),
                            actual: actual.to_string(),
                        },
                        arg.position(),
                    );
                }
            }
        }

        return_type.map(|t| *t).unwrap_or(FeType::Error)
    }
}

fn op_symbol(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Subtract => "-",
        BinaryOp::Multiply => "*",
        BinaryOp::Divide => "/",
        BinaryOp::Modulo => "%",
        BinaryOp::Equal => "=",
        BinaryOp::NotEqual => "≠",
        BinaryOp::Less => "<",
        BinaryOp::LessEqual => "≦",
        BinaryOp::Greater => ">",
        BinaryOp::GreaterEqual => "≧",
        BinaryOp::And => "and",
        BinaryOp::Or => "or",
        BinaryOp::Concatenate => "+",
    }
}
