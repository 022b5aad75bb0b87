//! Converts FE pseudo-language source text into a token stream.

mod escape;
mod lexer;
mod token;

pub use token::{Token, TokenKind};
pub(crate) use escape::decode_escape;

use felangkit_errors::Diagnostic;
use felangkit_span::{PositionTracker, SourcePosition};
use unicode_normalization::UnicodeNormalization;

/// Tokenizer-specific knobs from `ParseOptions`.
#[derive(Copy, Clone, Debug)]
pub struct TokenizerFlags {
    pub keep_trivia: bool,
    pub normalize_unicode: bool,
}

impl Default for TokenizerFlags {
    fn default() -> Self {
        Self { keep_trivia: false, normalize_unicode: true }
    }
}

/// `tokenize(source) -> (tokens, diagnostics)`. The returned stream
/// always ends in a single `Eof` token; trivia tokens are included only
/// when `flags.keep_trivia` is set.
#[tracing::instrument(level = "debug", skip_all)]
pub fn tokenize(source: &str, flags: TokenizerFlags) -> (Vec<Token>, Vec<Diagnostic>) {
    let normalized;
    let source = if flags.normalize_unicode {
        normalized = source.nfc().collect::<String>();
        normalized.as_str()
    } else {
        source
    };

    let mut tracker = PositionTracker::new(source);
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();

    while !tracker.is_eof() {
        let (token, diagnostic) = lexer::scan_token(&mut tracker);
        if let Some(d) = diagnostic {
            diagnostics.push(d);
        }
        if token.kind.is_trivia() && !flags.keep_trivia {
            continue;
        }
        tokens.push(token);
    }

    tokens.push(Token::new(TokenKind::Eof, "", tracker.position()));
    (tokens, diagnostics)
}

/// Convenience entry for callers who just want the eof-sentinel check or a
/// quick position lookup without re-tokenizing.
pub fn eof_position(tokens: &[Token]) -> SourcePosition {
    tokens.last().map(|t| t.position).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn tokenizes_a_variable_declaration() {
        let (tokens, diagnostics) = tokenize("変数 x: 整数型 ← 42", TokenizerFlags::default());
        assert!(diagnostics.is_empty());
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::VariableDecl,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::IntegerType,
                TokenKind::Assign,
                TokenKind::IntegerLiteral,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn english_and_japanese_keywords_agree() {
        let (english, _) = tokenize("variable", TokenizerFlags::default());
        let (japanese, _) = tokenize("変数", TokenizerFlags::default());
        assert_eq!(english[0].kind, TokenKind::VariableDecl);
        assert_eq!(japanese[0].kind, TokenKind::VariableDecl);
    }

    #[test]
    fn unterminated_string_reports_diagnostic_and_resyncs() {
        let (tokens, diagnostics) = tokenize("\"abc\nx", TokenizerFlags::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
        // scanning continues past the newline
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Identifier));
    }

    #[test]
    fn hex_binary_octal_integers() {
        let (tokens, diagnostics) = tokenize("0xFF 0b101 0o17", TokenizerFlags::default());
        assert!(diagnostics.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[1].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[2].kind, TokenKind::IntegerLiteral);
    }

    #[test]
    fn invalid_digit_for_base_becomes_single_invalid_token() {
        let (tokens, diagnostics) = tokenize("0b102", TokenizerFlags::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
    }

    #[test]
    fn unicode_identifier_is_nfc_normalized() {
        let (tokens, diagnostics) = tokenize("変数 データ: 整数型 ← 1", TokenizerFlags::default());
        assert!(diagnostics.is_empty());
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "データ");
    }

    #[test]
    fn trivia_is_skipped_by_default_but_kept_on_request() {
        let (default_tokens, _) = tokenize("1 // comment\n2", TokenizerFlags::default());
        assert!(!default_tokens.iter().any(|t| t.kind.is_trivia()));

        let flags = TokenizerFlags { keep_trivia: true, normalize_unicode: true };
        let (with_trivia, _) = tokenize("1 // comment\n2", flags);
        assert!(with_trivia.iter().any(|t| t.kind == TokenKind::Comment));
        assert!(with_trivia.iter().any(|t| t.kind == TokenKind::Newline));
    }
}
