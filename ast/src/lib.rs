//! The FeLangKit abstract syntax tree and structural type system.

mod expression;
mod node;
mod statement;
mod ty;

pub use expression::{
    ArrayAccessExpression, BinaryExpression, BinaryOp, Expression, FieldAccessExpression, FunctionCallExpression,
    IdentifierExpression, LiteralExpression, LiteralValue, UnaryExpression, UnaryOp,
};
pub use node::Node;
pub use statement::{
    AssignmentStatement, AssignmentTarget, Block, BreakStatement, CallableDeclaration, ConstantDeclarationStatement,
    ExpressionStatement, ForKind, ForStatement, IfStatement, Parameter, ReturnStatement, Statement,
    VariableDeclarationStatement, WhileStatement,
};
pub use ty::FeType;
