use felangkit_ast::{BinaryExpression, BinaryOp, Expression, FieldAccessExpression, FunctionCallExpression};
use felangkit_ast::{ArrayAccessExpression, IdentifierExpression, LiteralExpression, LiteralValue};
use felangkit_ast::{Node, UnaryExpression, UnaryOp};
use felangkit_span::SourcePosition;

use crate::parser::context::ParserContext;
use crate::tokenizer::TokenKind;

/// Recursion-depth-guarded entry point; every nested sub-expression
/// (grouping, call argument, array index, assignment right-hand side) goes
/// back through this function rather than straight to `parse_or` so the
/// ceiling bounds real nesting, not just op chains.
pub fn parse_expression(ctx: &mut ParserContext) -> Expression {
    if ctx.enter_expr_depth() {
        return placeholder(ctx.current_position());
    }
    let result = parse_or(ctx);
    ctx.leave_expr_depth();
    result
}

fn placeholder(position: SourcePosition) -> Expression {
    Expression::Literal(LiteralExpression { value: LiteralValue::Integer(0), position })
}

fn parse_or(ctx: &mut ParserContext) -> Expression {
    let mut left = parse_and(ctx);
    while ctx.eat(TokenKind::Or) {
        let position = left.position();
        let right = parse_and(ctx);
        left = Expression::Binary(BinaryExpression {
            left: Box::new(left),
            op: BinaryOp::Or,
            right: Box::new(right),
            position,
        });
    }
    left
}

fn parse_and(ctx: &mut ParserContext) -> Expression {
    let mut left = parse_not(ctx);
    while ctx.eat(TokenKind::And) {
        let position = left.position();
        let right = parse_not(ctx);
        left = Expression::Binary(BinaryExpression {
            left: Box::new(left),
            op: BinaryOp::And,
            right: Box::new(right),
            position,
        });
    }
    left
}

fn parse_not(ctx: &mut ParserContext) -> Expression {
    if ctx.check(TokenKind::Not) {
        let position = ctx.current_position();
        ctx.bump();
        let operand = parse_not(ctx);
        return Expression::Unary(UnaryExpression { op: UnaryOp::Not, operand: Box::new(operand), position });
    }
    parse_equality(ctx)
}

/// Non-associative: at most one `=`/`≠` binds at this level, so `a = b = c`
/// does not parse as a single chained comparison.
fn parse_equality(ctx: &mut ParserContext) -> Expression {
    let left = parse_relational(ctx);
    let op = if ctx.check(TokenKind::Equal) {
        BinaryOp::Equal
    } else if ctx.check(TokenKind::NotEqual) {
        BinaryOp::NotEqual
    } else {
        return left;
    };
    let position = left.position();
    ctx.bump();
    let right = parse_relational(ctx);
    Expression::Binary(BinaryExpression { left: Box::new(left), op, right: Box::new(right), position })
}

/// Non-associative: at most one `< ≦ > ≧` binds at this level, so
/// `a < b < c` does not parse as a single chained comparison.
fn parse_relational(ctx: &mut ParserContext) -> Expression {
    let left = parse_additive(ctx);
    let op = if ctx.check(TokenKind::Less) {
        BinaryOp::Less
    } else if ctx.check(TokenKind::LessEqual) {
        BinaryOp::LessEqual
    } else if ctx.check(TokenKind::Greater) {
        BinaryOp::Greater
    } else if ctx.check(TokenKind::GreaterEqual) {
        BinaryOp::GreaterEqual
    } else {
        return left;
    };
    let position = left.position();
    ctx.bump();
    let right = parse_additive(ctx);
    Expression::Binary(BinaryExpression { left: Box::new(left), op, right: Box::new(right), position })
}

fn parse_additive(ctx: &mut ParserContext) -> Expression {
    let mut left = parse_multiplicative(ctx);
    loop {
        let op = if ctx.check(TokenKind::Plus) {
            BinaryOp::Add
        } else if ctx.check(TokenKind::Minus) {
            BinaryOp::Subtract
        } else {
            break;
        };
        let position = left.position();
        ctx.bump();
        let right = parse_multiplicative(ctx);
        left = Expression::Binary(BinaryExpression { left: Box::new(left), op, right: Box::new(right), position });
    }
    left
}

fn parse_multiplicative(ctx: &mut ParserContext) -> Expression {
    let mut left = parse_unary(ctx);
    loop {
        let op = if ctx.check(TokenKind::Star) {
            BinaryOp::Multiply
        } else if ctx.check(TokenKind::Slash) {
            BinaryOp::Divide
        } else if ctx.check(TokenKind::Percent) {
            BinaryOp::Modulo
        } else {
            break;
        };
        let position = left.position();
        ctx.bump();
        let right = parse_unary(ctx);
        left = Expression::Binary(BinaryExpression { left: Box::new(left), op, right: Box::new(right), position });
    }
    left
}

fn parse_unary(ctx: &mut ParserContext) -> Expression {
    let op = if ctx.check(TokenKind::Plus) {
        Some(UnaryOp::Plus)
    } else if ctx.check(TokenKind::Minus) {
        Some(UnaryOp::Minus)
    } else {
        None
    };
    if let Some(op) = op {
        let position = ctx.current_position();
        ctx.bump();
        let operand = parse_unary(ctx);
        return Expression::Unary(UnaryExpression { op, operand: Box::new(operand), position });
    }
    parse_postfix(ctx)
}

fn parse_postfix(ctx: &mut ParserContext) -> Expression {
    let mut expr = parse_primary(ctx);
    loop {
        if ctx.check(TokenKind::LeftBracket) {
            let position = expr.position();
            ctx.bump();
            let mut indices = vec![parse_expression(ctx)];
            while ctx.eat(TokenKind::Comma) {
                indices.push(parse_expression(ctx));
            }
            ctx.expect(TokenKind::RightBracket);
            expr = Expression::ArrayAccess(ArrayAccessExpression { array: Box::new(expr), indices, position });
        } else if ctx.check(TokenKind::Dot) {
            let position = expr.position();
            ctx.bump();
            let field_name = match ctx.expect_identifier() {
                Some((name, _)) => name,
                None => String::new(),
            };
            expr = Expression::FieldAccess(FieldAccessExpression { record: Box::new(expr), field_name, position });
        } else if ctx.check(TokenKind::LeftParen) {
            let position = expr.position();
            let name = match &expr {
                Expression::Identifier(identifier) => identifier.name.clone(),
                _ => {
                    let current = ctx.current_position();
                    ctx.push_error(
                        felangkit_errors::ErrorKind::UnexpectedToken {
                            expected: "a function name".to_string(),
                            got: TokenKind::LeftParen.to_string(),
                        },
                        current,
                    );
                    String::new()
                }
            };
            let arguments = ctx.parse_list(TokenKind::LeftParen, TokenKind::RightParen, |ctx| parse_expression(ctx));
            expr = Expression::FunctionCall(FunctionCallExpression { name, arguments, position });
        } else {
            break;
        }
    }
    expr
}

fn parse_primary(ctx: &mut ParserContext) -> Expression {
    let position = ctx.current_position();
    match ctx.token.kind {
        TokenKind::IntegerLiteral => {
            let lexeme = ctx.token.lexeme.clone();
            ctx.bump();
            let value = parse_integer_literal(&lexeme);
            Expression::Literal(LiteralExpression { value: LiteralValue::Integer(value), position })
        }
        TokenKind::RealLiteral => {
            let lexeme = ctx.token.lexeme.clone();
            ctx.bump();
            let value: f64 = lexeme.replace('_', "").parse().unwrap_or(0.0);
            Expression::Literal(LiteralExpression { value: LiteralValue::Real(value), position })
        }
        TokenKind::StringLiteral => {
            let lexeme = ctx.token.lexeme.clone();
            ctx.bump();
            Expression::Literal(LiteralExpression { value: LiteralValue::Str(unquote(&lexeme)), position })
        }
        TokenKind::CharacterLiteral => {
            let lexeme = ctx.token.lexeme.clone();
            ctx.bump();
            let decoded = unquote(&lexeme);
            let character = decoded.chars().next().unwrap_or('\0');
            Expression::Literal(LiteralExpression { value: LiteralValue::Character(character), position })
        }
        TokenKind::True => {
            ctx.bump();
            Expression::Literal(LiteralExpression { value: LiteralValue::Boolean(true), position })
        }
        TokenKind::False => {
            ctx.bump();
            Expression::Literal(LiteralExpression { value: LiteralValue::Boolean(false), position })
        }
        TokenKind::Identifier => {
            let name = ctx.token.lexeme.clone();
            ctx.bump();
            Expression::Identifier(IdentifierExpression { name, position })
        }
        TokenKind::LeftParen => {
            ctx.bump();
            // No separate grouping node: the inner
            // expression is returned as-is, precedence already resolved by
            // the recursive-descent structure itself.
            let inner = parse_expression(ctx);
            ctx.expect(TokenKind::RightParen);
            inner
        }
        _ => {
            let got = ctx.token.kind.to_string();
            ctx.push_error(
                felangkit_errors::ErrorKind::UnexpectedToken { expected: "an expression".to_string(), got },
                position,
            );
            if ctx.has_next() {
                ctx.bump();
            }
            placeholder(position)
        }
    }
}

/// Parses an integer literal lexeme, which may carry a `0x`/`0b`/`0o`
/// radix prefix and `_` digit separators.
fn parse_integer_literal(lexeme: &str) -> i64 {
    let cleaned: String = lexeme.chars().filter(|c| *c != '_').collect();
    if let Some(hex) = cleaned.strip_prefix("0x").or_else(|| cleaned.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).unwrap_or(0);
    }
    if let Some(bin) = cleaned.strip_prefix("0b").or_else(|| cleaned.strip_prefix("0B")) {
        return i64::from_str_radix(bin, 2).unwrap_or(0);
    }
    if let Some(oct) = cleaned.strip_prefix("0o").or_else(|| cleaned.strip_prefix("0O")) {
        return i64::from_str_radix(oct, 8).unwrap_or(0);
    }
    cleaned.parse().unwrap_or(0)
}

/// Strips the surrounding quote characters and decodes escapes from a raw
/// string/character literal lexeme.
fn unquote(raw: &str) -> String {
    let inner = raw.get(1..raw.len().saturating_sub(1)).unwrap_or("");
    let mut out = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let rest: String = chars.clone().collect();
        match crate::tokenizer::decode_escape(&rest) {
            Some((decoded, consumed)) => {
                out.push(decoded);
                for _ in 0..consumed {
                    chars.next();
                }
            }
            None => {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
        }
    }
    out
}
