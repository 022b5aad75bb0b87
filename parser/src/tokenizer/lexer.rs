use felangkit_errors::{Diagnostic, ErrorKind};
use felangkit_span::{lookup_keyword, PositionTracker, SourcePosition};

use crate::tokenizer::escape::decode_escape;
use crate::tokenizer::token::{Token, TokenKind};

/// Scans exactly one token starting at the tracker's current position,
/// advancing the tracker past it. Never fails to produce a token: malformed
/// input becomes a single `TokenKind::Invalid` token plus a diagnostic
/// rather than a hard error — the tokenizer never aborts.
pub(crate) fn scan_token(tracker: &mut PositionTracker) -> (Token, Option<Diagnostic>) {
    let start = tracker.position();

    let Some(c) = tracker.peek() else {
        return (Token::new(TokenKind::Eof, "", start), None);
    };

    if c == '\n' || c == '\r' {
        return scan_newline(tracker, start);
    }
    if c.is_whitespace() {
        return scan_whitespace(tracker, start);
    }
    if c == '/' && tracker.peek_at(1) == Some('/') {
        return scan_line_comment(tracker, start);
    }
    if c == '"' || c == '\'' {
        return scan_quoted(tracker, start, c);
    }
    if c.is_ascii_digit() {
        return scan_number(tracker, start);
    }
    if unicode_ident::is_xid_start(c) || c == '_' {
        return scan_identifier_or_keyword(tracker, start);
    }
    if let Some(kind) = single_char_operator(c) {
        tracker.bump();
        return (Token::new(kind, c.to_string(), start), None);
    }

    tracker.bump();
    (Token::new(TokenKind::Invalid, c.to_string(), start), Some(Diagnostic::error(ErrorKind::InvalidCharacter(c), start)))
}

fn single_char_operator(c: char) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match c {
        '+' => Plus,
        '-' => Minus,
        '*' => Star,
        '/' => Slash,
        '%' => Percent,
        '←' => Assign,
        '=' => Equal,
        '≠' => NotEqual,
        '<' => Less,
        '≦' => LessEqual,
        '>' => Greater,
        '≧' => GreaterEqual,
        '(' => LeftParen,
        ')' => RightParen,
        '[' => LeftBracket,
        ']' => RightBracket,
        '{' => LeftBrace,
        '}' => RightBrace,
        ',' => Comma,
        '.' => Dot,
        ';' => Semicolon,
        ':' => Colon,
        _ => return None,
    })
}

fn scan_newline(tracker: &mut PositionTracker, start: SourcePosition) -> (Token, Option<Diagnostic>) {
    let mut lexeme = String::new();
    let first = tracker.bump().unwrap();
    lexeme.push(first);
    // `\r\n` counts as a single line break.
    if first == '\r' && tracker.peek() == Some('\n') {
        lexeme.push(tracker.bump().unwrap());
    }
    (Token::new(TokenKind::Newline, lexeme, start), None)
}

fn scan_whitespace(tracker: &mut PositionTracker, start: SourcePosition) -> (Token, Option<Diagnostic>) {
    let mut lexeme = String::new();
    while let Some(c) = tracker.peek() {
        if c == '\n' || c == '\r' || !c.is_whitespace() {
            break;
        }
        lexeme.push(tracker.bump().unwrap());
    }
    (Token::new(TokenKind::Whitespace, lexeme, start), None)
}

fn scan_line_comment(tracker: &mut PositionTracker, start: SourcePosition) -> (Token, Option<Diagnostic>) {
    let mut lexeme = String::new();
    while let Some(c) = tracker.peek() {
        if c == '\n' || c == '\r' {
            break;
        }
        lexeme.push(tracker.bump().unwrap());
    }
    (Token::new(TokenKind::Comment, lexeme, start), None)
}

/// Handles both string (`"`) and character (`'`) literals; the delimiter
/// distinguishes which `TokenKind` is produced. Unterminated literals
/// resync at the next newline.
fn scan_quoted(tracker: &mut PositionTracker, start: SourcePosition, quote: char) -> (Token, Option<Diagnostic>) {
    let kind = if quote == '"' { TokenKind::StringLiteral } else { TokenKind::CharacterLiteral };
    let mut raw = String::new();
    raw.push(tracker.bump().unwrap()); // opening quote

    loop {
        match tracker.peek() {
            None | Some('\n') | Some('\r') => {
                return (
                    Token::new(TokenKind::Invalid, raw, start),
                    Some(Diagnostic::error(ErrorKind::UnterminatedString, start)),
                );
            }
            Some(q) if q == quote => {
                raw.push(tracker.bump().unwrap());
                return (Token::new(kind, raw, start), None);
            }
            Some('\\') => {
                raw.push(tracker.bump().unwrap());
                let rest = tracker.rest();
                match decode_escape(rest) {
                    Some((_, consumed)) => {
                        for _ in 0..consumed {
                            raw.push(tracker.bump().unwrap());
                        }
                    }
                    None => {
                        if let Some(c) = tracker.bump() {
                            raw.push(c);
                        }
                    }
                }
            }
            Some(_) => raw.push(tracker.bump().unwrap()),
        }
    }
}

fn scan_number(tracker: &mut PositionTracker, start: SourcePosition) -> (Token, Option<Diagnostic>) {
    let mut lexeme = String::new();
    lexeme.push(tracker.bump().unwrap());

    if lexeme == "0" {
        match tracker.peek() {
            Some('x') | Some('X') => return scan_radix_literal(tracker, start, lexeme, |c| c.is_ascii_hexdigit()),
            Some('b') | Some('B') => return scan_radix_literal(tracker, start, lexeme, |c| c == '0' || c == '1'),
            Some('o') | Some('O') => return scan_radix_literal(tracker, start, lexeme, |c| ('0'..='7').contains(&c)),
            _ => {}
        }
    }

    while let Some(c) = tracker.peek() {
        if c.is_ascii_digit() || c == '_' {
            lexeme.push(tracker.bump().unwrap());
        } else {
            break;
        }
    }

    let mut is_real = false;
    if tracker.peek() == Some('.') && tracker.peek_at(1).map(|c| c.is_ascii_digit()).unwrap_or(false) {
        is_real = true;
        lexeme.push(tracker.bump().unwrap());
        while let Some(c) = tracker.peek() {
            if c.is_ascii_digit() || c == '_' {
                lexeme.push(tracker.bump().unwrap());
            } else {
                break;
            }
        }
    }

    if matches!(tracker.peek(), Some('e') | Some('E')) {
        // Look ahead without consuming: only commit to an exponent once we
        // know it has at least one digit, otherwise `1e` followed by a
        // non-digit (e.g. `1e.foo`) must leave the `e` for the next token.
        let mut offset = 1usize;
        if matches!(tracker.peek_at(1), Some('+') | Some('-')) {
            offset = 2;
        }
        let mut digit_count = 0usize;
        while tracker.peek_at(offset + digit_count).map(|c| c.is_ascii_digit()).unwrap_or(false) {
            digit_count += 1;
        }
        if digit_count > 0 {
            is_real = true;
            for _ in 0..(offset + digit_count) {
                lexeme.push(tracker.bump().unwrap());
            }
        }
    }

    let kind = if is_real { TokenKind::RealLiteral } else { TokenKind::IntegerLiteral };
    (Token::new(kind, lexeme, start), None)
}

fn scan_radix_literal(
    tracker: &mut PositionTracker,
    start: SourcePosition,
    mut lexeme: String,
    is_digit: impl Fn(char) -> bool,
) -> (Token, Option<Diagnostic>) {
    lexeme.push(tracker.bump().unwrap()); // the x/b/o marker
    let mut digits = String::new();
    let mut saw_invalid = false;
    while let Some(c) = tracker.peek() {
        if c == '_' {
            lexeme.push(tracker.bump().unwrap());
            continue;
        }
        if is_digit(c) {
            digits.push(c);
            lexeme.push(tracker.bump().unwrap());
        } else if c.is_alphanumeric() {
            // Still part of the malformed literal run; consume it so the
            // whole thing becomes one `invalid` token.
            saw_invalid = true;
            lexeme.push(tracker.bump().unwrap());
        } else {
            break;
        }
    }

    if digits.is_empty() || saw_invalid {
        (
            Token::new(TokenKind::Invalid, lexeme.clone(), start),
            Some(Diagnostic::error(ErrorKind::MalformedNumber(lexeme), start)),
        )
    } else {
        (Token::new(TokenKind::IntegerLiteral, lexeme, start), None)
    }
}

fn scan_identifier_or_keyword(tracker: &mut PositionTracker, start: SourcePosition) -> (Token, Option<Diagnostic>) {
    let mut lexeme = String::new();
    lexeme.push(tracker.bump().unwrap());
    while let Some(c) = tracker.peek() {
        if unicode_ident::is_xid_continue(c) || c == '_' {
            lexeme.push(tracker.bump().unwrap());
        } else {
            break;
        }
    }

    let kind = match lookup_keyword(&lexeme) {
        Some(keyword) => TokenKind::from_keyword(keyword),
        None => TokenKind::Identifier,
    };
    (Token::new(kind, lexeme, start), None)
}
