use felangkit_ast::{AssignmentStatement, AssignmentTarget, Block, BreakStatement, CallableDeclaration};
use felangkit_ast::{ConstantDeclarationStatement, Expression, ExpressionStatement, ForKind, ForStatement};
use felangkit_ast::{IfStatement, Node, Parameter, ReturnStatement, Statement, VariableDeclarationStatement, WhileStatement};

use crate::parser::context::ParserContext;
use crate::parser::expression::parse_expression;
use crate::parser::type_syntax::parse_type;
use crate::tokenizer::TokenKind;

/// Parses zero or more statements until `eof` or a caller-supplied stop
/// token (e.g. `end` closing an enclosing block). One malformed statement
/// resyncs and does not abort the rest of the program.
pub fn parse_statements(ctx: &mut ParserContext, stop: impl Fn(&ParserContext) -> bool) -> Vec<Statement> {
    let mut statements = Vec::new();
    ctx.skip_separators();
    while ctx.has_next() && !stop(ctx) {
        let before = ctx.current_position();
        statements.push(parse_statement(ctx));
        if ctx.current_position() == before {
            // A statement parser that consumed nothing would loop forever;
            // force progress via resync instead.
            ctx.resync();
        }
        ctx.skip_separators();
    }
    statements
}

fn parse_block(ctx: &mut ParserContext) -> Block {
    let position = ctx.current_position();
    let statements = parse_statements(ctx, |ctx| ctx.check(TokenKind::End) || ctx.check(TokenKind::Else));
    Block { statements, position }
}

fn parse_statement(ctx: &mut ParserContext) -> Statement {
    match ctx.token.kind {
        TokenKind::VariableDecl => parse_variable_declaration(ctx),
        TokenKind::ConstantDecl => parse_constant_declaration(ctx),
        TokenKind::If => parse_if(ctx),
        TokenKind::While => parse_while(ctx),
        TokenKind::For => parse_for(ctx),
        TokenKind::Function => parse_callable(ctx, true),
        TokenKind::Procedure => parse_callable(ctx, false),
        TokenKind::Return => parse_return(ctx),
        TokenKind::Break => {
            let position = ctx.current_position();
            ctx.bump();
            Statement::Break(BreakStatement { position })
        }
        _ => parse_assignment_or_expression(ctx),
    }
}

fn parse_variable_declaration(ctx: &mut ParserContext) -> Statement {
    let position = ctx.current_position();
    ctx.bump(); // 'variable'/変数
    let name = ctx.expect_identifier().map(|(n, _)| n).unwrap_or_default();
    ctx.expect(TokenKind::Colon);
    let declared_type = parse_type(ctx);
    let initializer = if ctx.eat(TokenKind::Assign) { Some(parse_expression(ctx)) } else { None };
    Statement::VariableDeclaration(VariableDeclarationStatement { name, declared_type, initializer, position })
}

fn parse_constant_declaration(ctx: &mut ParserContext) -> Statement {
    let position = ctx.current_position();
    ctx.bump(); // 'constant'/定数
    let name = ctx.expect_identifier().map(|(n, _)| n).unwrap_or_default();
    ctx.expect(TokenKind::Colon);
    let declared_type = parse_type(ctx);
    ctx.expect(TokenKind::Assign);
    let initializer = parse_expression(ctx);
    Statement::ConstantDeclaration(ConstantDeclarationStatement { name, declared_type, initializer, position })
}

fn parse_if(ctx: &mut ParserContext) -> Statement {
    let position = ctx.current_position();
    ctx.bump(); // 'if'
    let condition = parse_expression(ctx);
    ctx.expect(TokenKind::Then);
    ctx.skip_separators();
    let then_block = parse_block(ctx);
    let else_block = if ctx.eat(TokenKind::Else) {
        ctx.skip_separators();
        Some(parse_block(ctx))
    } else {
        None
    };
    ctx.expect(TokenKind::End);
    ctx.eat(TokenKind::If);
    Statement::If(IfStatement { condition, then_block, else_block, position })
}

fn parse_while(ctx: &mut ParserContext) -> Statement {
    let position = ctx.current_position();
    ctx.bump(); // 'while'
    let condition = parse_expression(ctx);
    ctx.expect(TokenKind::Do);
    ctx.skip_separators();
    let body = parse_block(ctx);
    ctx.expect(TokenKind::End);
    ctx.eat(TokenKind::While);
    Statement::While(WhileStatement { condition, body, position })
}

/// Both `for V = start to end [step s] do ... end` and
/// `for V in iterable do ... end` shapes.
fn parse_for(ctx: &mut ParserContext) -> Statement {
    let position = ctx.current_position();
    ctx.bump(); // 'for'
    let variable = ctx.expect_identifier().map(|(n, _)| n).unwrap_or_default();

    let kind = if ctx.eat(TokenKind::In) {
        let iterable = parse_expression(ctx);
        ForKind::ForEach { variable, iterable }
    } else {
        ctx.expect(TokenKind::Assign);
        let start = parse_expression(ctx);
        ctx.expect(TokenKind::To);
        let end = parse_expression(ctx);
        let step = if ctx.eat(TokenKind::Step) { Some(parse_expression(ctx)) } else { None };
        ForKind::Range { variable, start, end, step }
    };

    ctx.expect(TokenKind::Do);
    ctx.skip_separators();
    let body = parse_block(ctx);
    ctx.expect(TokenKind::End);
    ctx.eat(TokenKind::For);
    Statement::For(ForStatement { kind, body, position })
}

fn parse_callable(ctx: &mut ParserContext, is_function: bool) -> Statement {
    let position = ctx.current_position();
    ctx.bump(); // 'function'/'procedure'
    let name = ctx.expect_identifier().map(|(n, _)| n).unwrap_or_default();
    let parameters = ctx.parse_list(TokenKind::LeftParen, TokenKind::RightParen, parse_parameter);
    let return_type = if is_function {
        ctx.expect(TokenKind::Colon);
        Some(parse_type(ctx))
    } else {
        None
    };
    ctx.skip_separators();
    let body = parse_block(ctx);
    ctx.expect(TokenKind::End);
    if is_function {
        ctx.eat(TokenKind::Function);
    } else {
        ctx.eat(TokenKind::Procedure);
    }

    // Local variable declarations are collected by walking the body rather
    // than tracked separately during parsing; the symbol table pass is what
    // actually needs this list, populated there.
    let local_variables = body
        .statements
        .iter()
        .filter_map(|s| match s {
            Statement::VariableDeclaration(v) => Some(v.clone()),
            _ => None,
        })
        .collect();

    let declaration = CallableDeclaration { name, parameters, return_type, local_variables, body, position };
    if is_function {
        Statement::FunctionDeclaration(declaration)
    } else {
        Statement::ProcedureDeclaration(declaration)
    }
}

fn parse_parameter(ctx: &mut ParserContext) -> Parameter {
    let position = ctx.current_position();
    let name = ctx.expect_identifier().map(|(n, _)| n).unwrap_or_default();
    ctx.expect(TokenKind::Colon);
    let declared_type = parse_type(ctx);
    Parameter { name, declared_type, position }
}

fn parse_return(ctx: &mut ParserContext) -> Statement {
    let position = ctx.current_position();
    ctx.bump(); // 'return'
    let value = if ctx.check(TokenKind::Newline) || ctx.check(TokenKind::Semicolon) || ctx.check(TokenKind::End) || !ctx.has_next() {
        None
    } else {
        Some(parse_expression(ctx))
    };
    Statement::Return(ReturnStatement { value, position })
}

/// With no dedicated assignment keyword, a leading expression is either an
/// lvalue followed by `←` (an assignment) or a bare expression statement
/// (typically a procedure call).
fn parse_assignment_or_expression(ctx: &mut ParserContext) -> Statement {
    let position = ctx.current_position();
    let expr = parse_expression(ctx);
    if ctx.eat(TokenKind::Assign) {
        let target = expression_to_target(ctx, expr);
        let value = parse_expression(ctx);
        Statement::Assignment(AssignmentStatement { target, value, position })
    } else {
        Statement::ExpressionStatement(ExpressionStatement { expression: expr, position })
    }
}

fn expression_to_target(ctx: &mut ParserContext, expr: Expression) -> AssignmentTarget {
    match expr {
        Expression::Identifier(identifier) => AssignmentTarget::Variable { name: identifier.name, position: identifier.position },
        Expression::ArrayAccess(access) => {
            AssignmentTarget::ArrayElement { array: access.array, indices: access.indices, position: access.position }
        }
        Expression::FieldAccess(access) => {
            AssignmentTarget::Field { record: access.record, field_name: access.field_name, position: access.position }
        }
        other => {
            let position = other.position();
            ctx.push_error(
                felangkit_errors::ErrorKind::UnexpectedToken {
                    expected: "an assignable expression".to_string(),
                    got: "a non-assignable expression".to_string(),
                },
                position,
            );
            AssignmentTarget::Variable { name: String::new(), position }
        }
    }
}
