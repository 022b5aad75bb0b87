//! Expression and statement parsers, operating over the token stream
//! produced by `tokenizer`.

mod context;
mod expression;
mod statement;
mod type_syntax;

use felangkit_ast::{Expression, Statement};
use felangkit_errors::Diagnostic;

use crate::tokenizer::{Token, TokenKind};

pub use context::ParserContext;

/// Maximum expression nesting depth before `nestingTooDeep` fires,
/// overridable via `ParseOptions`.
pub const DEFAULT_MAX_NESTING_DEPTH: u32 = 256;

/// `parseExpression(tokens) -> (expression, diagnostics)`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_expression(tokens: Vec<Token>, max_nesting_depth: u32) -> (Expression, Vec<Diagnostic>) {
    let mut ctx = ParserContext::new(tokens, max_nesting_depth);
    let expr = expression::parse_expression(&mut ctx);
    (expr, ctx.into_diagnostics())
}

/// `parseStatements(tokens) -> (statements, diagnostics)`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_statements(tokens: Vec<Token>, max_nesting_depth: u32) -> (Vec<Statement>, Vec<Diagnostic>) {
    let mut ctx = ParserContext::new(tokens, max_nesting_depth);
    let statements = statement::parse_statements(&mut ctx, |ctx| ctx.check(TokenKind::Eof));
    (statements, ctx.into_diagnostics())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{tokenize, TokenizerFlags};
    use felangkit_ast::Node;

    fn tokens_for(source: &str) -> Vec<Token> {
        tokenize(source, TokenizerFlags::default()).0
    }

    #[test]
    fn parses_simple_arithmetic_with_precedence() {
        let (expr, diagnostics) = parse_expression(tokens_for("1 + 2 * 3"), DEFAULT_MAX_NESTING_DEPTH);
        assert!(diagnostics.is_empty());
        match expr {
            Expression::Binary(b) => {
                assert_eq!(b.op, felangkit_ast::BinaryOp::Add);
                assert!(matches!(*b.right, Expression::Binary(ref r) if r.op == felangkit_ast::BinaryOp::Multiply));
            }
            other => panic!("expected binary expression, got {other:?}"),
        }
    }

    #[test]
    fn parenthesized_expression_has_no_grouping_node() {
        let (expr, diagnostics) = parse_expression(tokens_for("(1 + 2)"), DEFAULT_MAX_NESTING_DEPTH);
        assert!(diagnostics.is_empty());
        assert!(matches!(expr, Expression::Binary(_)));
    }

    #[test]
    fn deeply_nested_parens_trip_the_depth_ceiling() {
        let source = format!("{}1{}", "(".repeat(300), ")".repeat(300));
        let (_, diagnostics) = parse_expression(tokens_for(&source), DEFAULT_MAX_NESTING_DEPTH);
        assert!(diagnostics.iter().any(|d| matches!(d.kind, felangkit_errors::DiagnosticKind::Error(felangkit_errors::ErrorKind::NestingTooDeep))));
    }

    #[test]
    fn parses_variable_declaration_statement() {
        let (statements, diagnostics) = parse_statements(tokens_for("変数 x: 整数型 ← 1"), DEFAULT_MAX_NESTING_DEPTH);
        assert!(diagnostics.is_empty());
        assert_eq!(statements.len(), 1);
        assert!(matches!(statements[0], Statement::VariableDeclaration(_)));
    }

    #[test]
    fn parses_if_statement_with_else() {
        let source = "if x = 1 then\n  y ← 1\nelse\n  y ← 2\nend if";
        let (statements, diagnostics) = parse_statements(tokens_for(source), DEFAULT_MAX_NESTING_DEPTH);
        assert!(diagnostics.is_empty());
        assert_eq!(statements.len(), 1);
        match &statements[0] {
            Statement::If(s) => {
                assert_eq!(s.then_block.statements.len(), 1);
                assert!(s.else_block.is_some());
            }
            other => panic!("expected if statement, got {other:?}"),
        }
    }

    #[test]
    fn parses_numeric_for_loop() {
        let source = "for i ← 1 to 10 step 2 do\n  write(i)\nend for";
        let (statements, diagnostics) = parse_statements(tokens_for(source), DEFAULT_MAX_NESTING_DEPTH);
        assert!(diagnostics.is_empty());
        match &statements[0] {
            Statement::For(s) => assert!(matches!(s.kind, felangkit_ast::ForKind::Range { .. })),
            other => panic!("expected for statement, got {other:?}"),
        }
    }

    #[test]
    fn parses_function_declaration() {
        let source = "function add(a: 整数型, b: 整数型): 整数型\n  return a + b\nend function";
        let (statements, diagnostics) = parse_statements(tokens_for(source), DEFAULT_MAX_NESTING_DEPTH);
        assert!(diagnostics.is_empty());
        match &statements[0] {
            Statement::FunctionDeclaration(decl) => {
                assert_eq!(decl.name, "add");
                assert_eq!(decl.parameters.len(), 2);
                assert!(decl.return_type.is_some());
            }
            other => panic!("expected function declaration, got {other:?}"),
        }
    }

    #[test]
    fn distinguishes_assignment_from_expression_statement() {
        let (statements, diagnostics) = parse_statements(tokens_for("x ← 5\nwriteLine(x)"), DEFAULT_MAX_NESTING_DEPTH);
        assert!(diagnostics.is_empty());
        assert_eq!(statements.len(), 2);
        assert!(matches!(statements[0], Statement::Assignment(_)));
        assert!(matches!(statements[1], Statement::ExpressionStatement(_)));
    }

    #[test]
    fn missing_closing_paren_reports_unexpected_token_and_recovers() {
        let source = "変数 x: 整数型 ← (1 + 2\n変数 y: 整数型 ← 3";
        let (statements, diagnostics) = parse_statements(tokens_for(source), DEFAULT_MAX_NESTING_DEPTH);
        assert!(!diagnostics.is_empty());
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn array_access_expression_position_matches_base() {
        let (expr, _) = parse_expression(tokens_for("arr[1]"), DEFAULT_MAX_NESTING_DEPTH);
        assert_eq!(expr.position(), felangkit_span::SourcePosition::start());
    }
}
