use felangkit_ast::FeType;

use crate::parser::context::ParserContext;
use crate::tokenizer::TokenKind;

/// Parses a type annotation: a primitive keyword, `array of T`
/// with an optional bracketed dimension list, or `record NAME`.
pub fn parse_type(ctx: &mut ParserContext) -> FeType {
    match ctx.token.kind {
        TokenKind::IntegerType => {
            ctx.bump();
            FeType::Integer
        }
        TokenKind::RealType => {
            ctx.bump();
            FeType::Real
        }
        TokenKind::CharacterType => {
            ctx.bump();
            FeType::Character
        }
        TokenKind::StringType => {
            ctx.bump();
            FeType::Str
        }
        TokenKind::BooleanType => {
            ctx.bump();
            FeType::Boolean
        }
        TokenKind::ArrayType => {
            ctx.bump();
            ctx.expect(TokenKind::Of);
            let element = Box::new(parse_type(ctx));
            let mut dimensions = Vec::new();
            if ctx.eat(TokenKind::LeftBracket) {
                loop {
                    if ctx.check(TokenKind::IntegerLiteral) {
                        let size: u32 = ctx.token.lexeme.replace('_', "").parse().unwrap_or(0);
                        dimensions.push(size);
                        ctx.bump();
                    } else {
                        let position = ctx.current_position();
                        ctx.push_error(
                            felangkit_errors::ErrorKind::UnexpectedToken {
                                expected: "an array dimension".to_string(),
                                got: ctx.token.kind.to_string(),
                            },
                            position,
                        );
                    }
                    if !ctx.eat(TokenKind::Comma) {
                        break;
                    }
                }
                ctx.expect(TokenKind::RightBracket);
            }
            FeType::Array { element, dimensions }
        }
        TokenKind::RecordType => {
            ctx.bump();
            let name = match ctx.expect_identifier() {
                Some((name, _)) => name,
                None => String::new(),
            };
            FeType::Record { name, fields: indexmap::IndexMap::new() }
        }
        _ => {
            let position = ctx.current_position();
            ctx.push_error(
                felangkit_errors::ErrorKind::UnexpectedToken {
                    expected: "a type".to_string(),
                    got: ctx.token.kind.to_string(),
                },
                position,
            );
            FeType::Error
        }
    }
}
