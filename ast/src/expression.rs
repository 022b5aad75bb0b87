use felangkit_span::SourcePosition;

use crate::node::{simple_node_impl, Node};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum LiteralValue {
    Integer(i64),
    Real(f64),
    Str(String),
    Character(char),
    Boolean(bool),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
    /// Produced only by the type checker rewriting `binary.add` over
    /// string/character operands; the parser never
    /// emits this variant directly.
    Concatenate,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LiteralExpression {
    pub value: LiteralValue,
    pub position: SourcePosition,
}
simple_node_impl!(LiteralExpression);

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IdentifierExpression {
    pub name: String,
    pub position: SourcePosition,
}
simple_node_impl!(IdentifierExpression);

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BinaryExpression {
    pub op: BinaryOp,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub position: SourcePosition,
}
simple_node_impl!(BinaryExpression);

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnaryExpression {
    pub op: UnaryOp,
    pub operand: Box<Expression>,
    pub position: SourcePosition,
}
simple_node_impl!(UnaryExpression);

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArrayAccessExpression {
    pub array: Box<Expression>,
    pub indices: Vec<Expression>,
    pub position: SourcePosition,
}
simple_node_impl!(ArrayAccessExpression);

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldAccessExpression {
    pub record: Box<Expression>,
    pub field_name: String,
    pub position: SourcePosition,
}
simple_node_impl!(FieldAccessExpression);

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FunctionCallExpression {
    pub name: String,
    pub arguments: Vec<Expression>,
    pub position: SourcePosition,
}
simple_node_impl!(FunctionCallExpression);

/// The expression AST. `(expr)` grouping is not represented
/// as a node: the parser returns the inner expression directly (edge
/// case c), so this enum has no `Grouping` variant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Expression {
    Literal(LiteralExpression),
    Identifier(IdentifierExpression),
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    ArrayAccess(ArrayAccessExpression),
    FieldAccess(FieldAccessExpression),
    FunctionCall(FunctionCallExpression),
}

impl Node for Expression {
    fn position(&self) -> SourcePosition {
        match self {
            Expression::Literal(e) => e.position(),
            Expression::Identifier(e) => e.position(),
            Expression::Binary(e) => e.position(),
            Expression::Unary(e) => e.position(),
            Expression::ArrayAccess(e) => e.position(),
            Expression::FieldAccess(e) => e.position(),
            Expression::FunctionCall(e) => e.position(),
        }
    }
}

impl Expression {
    pub fn identifier_name(&self) -> Option<&str> {
        match self {
            Expression::Identifier(e) => Some(&e.name),
            _ => None,
        }
    }
}
