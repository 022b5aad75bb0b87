use std::fmt;

use felangkit_span::SourcePosition;

use crate::kind::{ErrorKind, WarningKind};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DiagnosticKind {
    Error(ErrorKind),
    Warning(WarningKind),
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Error(e) => write!(f, "{e}"),
            DiagnosticKind::Warning(w) => write!(f, "{w}"),
        }
    }
}

/// A single collected diagnostic: a kind plus the position it was raised at.
/// `(kind, position)` is the deduplication key (see `ErrorReporter`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub position: SourcePosition,
}

impl Diagnostic {
    pub fn error(kind: ErrorKind, position: SourcePosition) -> Self {
        Self { kind: DiagnosticKind::Error(kind), position }
    }

    pub fn warning(kind: WarningKind, position: SourcePosition) -> Self {
        Self { kind: DiagnosticKind::Warning(kind), position }
    }

    pub fn severity(&self) -> Severity {
        match self.kind {
            DiagnosticKind::Error(_) => Severity::Error,
            DiagnosticKind::Warning(_) => Severity::Warning,
        }
    }

    /// The `(kind, position)` pair used by the reporter's deduplication.
    fn dedup_key(&self) -> (DiagnosticKind, SourcePosition) {
        (self.kind.clone(), self.position)
    }

    pub fn matches_for_dedup(&self, other: &Diagnostic) -> bool {
        self.dedup_key() == other.dedup_key()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.position)
    }
}
