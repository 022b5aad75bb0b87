use std::cmp::Ordering;
use std::fmt;

/// A single point in a source file: a line/column pair plus the byte offset
/// it was derived from. Immutable once constructed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

impl SourcePosition {
    pub const fn new(line: u32, column: u32, offset: u32) -> Self {
        Self { line, column, offset }
    }

    /// The position of the very first character of a source file.
    pub const fn start() -> Self {
        Self::new(1, 1, 0)
    }

    /// Position used for diagnostics with no meaningful source location
    /// (e.g. `tooManyErrors`).
    pub const fn none() -> Self {
        Self::new(0, 0, 0)
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::start()
    }
}

impl Ord for SourcePosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl PartialOrd for SourcePosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Walks a source string one Unicode scalar value at a time, tracking
/// line/column/offset. `\n`, `\r\n`, and `\r` all count as a single line
/// break, per the source-format rules.
///
/// This is the single place that decides what a "character" is for
/// position-tracking purposes: we advance by `char`, not by grapheme
/// cluster, which matches how every other stage (tokenizer lexemes, AST
/// positions) indexes into the source.
#[derive(Clone)]
pub struct PositionTracker<'a> {
    source: &'a str,
    offset: u32,
    line: u32,
    column: u32,
}

impl<'a> PositionTracker<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, offset: 0, line: 1, column: 1 }
    }

    pub fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column, self.offset)
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn rest(&self) -> &'a str {
        &self.source[self.offset as usize..]
    }

    pub fn is_eof(&self) -> bool {
        self.offset as usize >= self.source.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn peek_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// Advances past a single `char`, updating line/column. Treats `\r\n`
    /// as one line break by having the caller skip the paired `\n` with
    /// `bump_raw` (see tokenizer whitespace handling) rather than counting
    /// it twice here.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8() as u32;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }
}
