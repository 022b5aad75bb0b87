use std::mem;

use felangkit_errors::{Diagnostic, ErrorKind};
use felangkit_span::SourcePosition;

use crate::tokenizer::{Token, TokenKind};

/// Token-cursor plus diagnostic sink shared by the expression and statement
/// parsers. A single parse invocation is single-threaded, so unlike
/// the semantic analysis passes this holds its diagnostics directly rather
/// than going through the (thread-safe) error reporter.
pub struct ParserContext {
    /// Remaining tokens, reversed so popping the next one is O(1).
    tokens: Vec<Token>,
    pub(crate) token: Token,
    pub(crate) prev_token: Token,
    diagnostics: Vec<Diagnostic>,
    depth: u32,
    max_depth: u32,
    depth_exceeded: bool,
}

impl ParserContext {
    pub fn new(mut tokens: Vec<Token>, max_nesting_depth: u32) -> Self {
        tokens.retain(|t| !t.kind.is_trivia());
        tokens.reverse();
        let eof_position = tokens.first().map(|t| t.position).unwrap_or_default();
        let dummy = Token::new(TokenKind::Eof, "", eof_position);
        let mut ctx = Self {
            tokens,
            prev_token: dummy.clone(),
            token: dummy,
            diagnostics: Vec::new(),
            depth: 0,
            max_depth: max_nesting_depth,
            depth_exceeded: false,
        };
        ctx.bump();
        ctx
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn push_error(&mut self, kind: ErrorKind, position: SourcePosition) {
        self.diagnostics.push(Diagnostic::error(kind, position));
    }

    pub fn current_position(&self) -> SourcePosition {
        self.token.position
    }

    /// Advances the cursor by one token.
    pub fn bump(&mut self) {
        let next = self.tokens.pop().unwrap_or_else(|| Token::new(TokenKind::Eof, "", self.token.position));
        self.prev_token = mem::replace(&mut self.token, next);
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.token.kind == kind
    }

    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub fn eat_any(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.contains(&self.token.kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub fn look_ahead<R>(&self, dist: usize, looker: impl FnOnce(&Token) -> R) -> R {
        if dist == 0 {
            return looker(&self.token);
        }
        match self.tokens.len().checked_sub(dist) {
            Some(idx) => looker(&self.tokens[idx]),
            None => looker(&self.token), // past the tail: same shape as hitting eof
        }
    }

    pub fn has_next(&self) -> bool {
        !matches!(self.token.kind, TokenKind::Eof)
    }

    /// Eats the expected token kind or emits `unexpectedToken` and returns
    /// `false`, leaving the cursor in place so callers can attempt resync.
    pub fn expect(&mut self, kind: TokenKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            let got = self.token.kind.to_string();
            let position = self.token.position;
            self.push_error(ErrorKind::UnexpectedToken { expected: kind.to_string(), got }, position);
            false
        }
    }

    /// Eats an identifier and returns its name/position, or emits
    /// `expectedIdentifier`.
    pub fn expect_identifier(&mut self) -> Option<(String, SourcePosition)> {
        if self.check(TokenKind::Identifier) {
            let name = self.token.lexeme.clone();
            let position = self.token.position;
            self.bump();
            Some((name, position))
        } else {
            let position = self.token.position;
            self.push_error(ErrorKind::ExpectedIdentifier, position);
            None
        }
    }

    /// Consumes tokens until a resync point: `newline`, `;`, a
    /// statement-introducing keyword, `end`, or `eof`.
    pub fn resync(&mut self) {
        loop {
            match self.token.kind {
                TokenKind::Eof
                | TokenKind::Newline
                | TokenKind::Semicolon
                | TokenKind::VariableDecl
                | TokenKind::ConstantDecl
                | TokenKind::If
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Function
                | TokenKind::Procedure
                | TokenKind::Return
                | TokenKind::Break
                | TokenKind::End => {
                    self.eat(TokenKind::Newline);
                    self.eat(TokenKind::Semicolon);
                    return;
                }
                _ => self.bump(),
            }
        }
    }

    /// Skips any number of statement-separator tokens (blank lines,
    /// stray `;`).
    pub fn skip_separators(&mut self) {
        while self.eat(TokenKind::Newline) || self.eat(TokenKind::Semicolon) {}
    }

    /// Increments the expression recursion depth, emitting `nestingTooDeep`
    /// exactly once the first time the ceiling is crossed. Returns `true`
    /// when the caller should stop descending and produce a placeholder.
    pub fn enter_expr_depth(&mut self) -> bool {
        if self.depth_exceeded {
            return true;
        }
        self.depth += 1;
        if self.depth > self.max_depth {
            self.depth_exceeded = true;
            let position = self.token.position;
            self.push_error(ErrorKind::NestingTooDeep, position);
            return true;
        }
        false
    }

    pub fn leave_expr_depth(&mut self) {
        if !self.depth_exceeded {
            self.depth = self.depth.saturating_sub(1);
        }
    }

    /// Parses a comma-separated list between `open`/`close` delimiters.
    /// Tolerates (with a diagnostic) a trailing
    /// comma before `close`.
    pub fn parse_list<T>(
        &mut self,
        open: TokenKind,
        close: TokenKind,
        mut inner: impl FnMut(&mut Self) -> T,
    ) -> Vec<T> {
        let mut items = Vec::new();
        self.expect(open);
        while !self.check(close) && self.has_next() {
            items.push(inner(self));
            if !self.eat(TokenKind::Comma) {
                break;
            }
            if self.check(close) {
                let position = self.prev_token.position;
                self.push_error(
                    ErrorKind::UnexpectedToken { expected: "an argument".to_string(), got: close.to_string() },
                    position,
                );
                break;
            }
        }
        self.expect(close);
        items
    }
}
