use parking_lot::Mutex;

use felangkit_span::SourcePosition;

use crate::diagnostic::Diagnostic;
use crate::kind::{ErrorKind, WarningKind};

/// Tunables for an `ErrorReporter`. See `ErrorReportingProfile` in the
/// driver crate for the named profiles (`default`/`strict`/`fast`) built on
/// top of this.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ReporterConfig {
    pub max_error_count: usize,
    pub enable_deduplication: bool,
    pub enable_error_correlation: bool,
    pub verbose_output: bool,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self { max_error_count: 100, enable_deduplication: true, enable_error_correlation: false, verbose_output: false }
    }
}

impl ReporterConfig {
    pub fn strict() -> Self {
        Self { max_error_count: 10_000, enable_deduplication: true, enable_error_correlation: true, verbose_output: true }
    }

    pub fn fast() -> Self {
        Self { max_error_count: 20, enable_deduplication: false, enable_error_correlation: false, verbose_output: false }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Phase {
    Open,
    Full,
    Finalized,
}

struct ReporterState {
    phase: Phase,
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl ReporterState {
    fn new() -> Self {
        Self { phase: Phase::Open, errors: Vec::new(), warnings: Vec::new() }
    }
}

/// The outcome of a finalized reporter: everything a `SemanticAnalysisResult`
/// needs except the symbol table, which this crate has no business knowing
/// about (it lives in `felangkit-passes`; the driver combines the two).
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct FinalizedDiagnostics {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl FinalizedDiagnostics {
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Thread-safe accumulator for diagnostics produced during a single parse
/// or analysis invocation. All mutating paths take the internal lock; the
/// snapshot accessors (`errors`, `warnings`) clone out so callers never hold
/// the lock across other work.
pub struct ErrorReporter {
    config: ReporterConfig,
    state: Mutex<ReporterState>,
}

impl ErrorReporter {
    pub fn new(config: ReporterConfig) -> Self {
        Self { config, state: Mutex::new(ReporterState::new()) }
    }

    pub fn config(&self) -> ReporterConfig {
        self.config
    }

    /// Records an error at `position`. No-op once the reporter is `Full`
    /// or `Finalized`. Deduplicates against previously collected errors
    /// when `enable_deduplication` is set, keeping the earliest occurrence.
    pub fn collect_error(&self, kind: ErrorKind, position: SourcePosition) {
        let mut state = self.state.lock();
        if state.phase != Phase::Open {
            return;
        }
        let diagnostic = Diagnostic::error(kind, position);
        if self.config.enable_deduplication && state.errors.iter().any(|d| d.matches_for_dedup(&diagnostic)) {
            return;
        }
        state.errors.push(diagnostic);

        if state.errors.len() >= self.config.max_error_count {
            let count = state.errors.len();
            state.errors.push(Diagnostic::error(ErrorKind::TooManyErrors(count), SourcePosition::none()));
            state.phase = Phase::Full;
        }
    }

    /// Records a warning at `position`. Subject to the same phase gate as
    /// errors but never counts against `max_error_count` and is
    /// deduplicated independently of the error list.
    pub fn collect_warning(&self, kind: WarningKind, position: SourcePosition) {
        let mut state = self.state.lock();
        if state.phase != Phase::Open {
            return;
        }
        let diagnostic = Diagnostic::warning(kind, position);
        if self.config.enable_deduplication && state.warnings.iter().any(|d| d.matches_for_dedup(&diagnostic)) {
            return;
        }
        state.warnings.push(diagnostic);
    }

    pub fn is_full(&self) -> bool {
        self.state.lock().phase == Phase::Full
    }

    pub fn is_finalized(&self) -> bool {
        self.state.lock().phase == Phase::Finalized
    }

    pub fn error_count(&self) -> usize {
        self.state.lock().errors.len()
    }

    /// Snapshot copy of the errors collected so far.
    pub fn errors(&self) -> Vec<Diagnostic> {
        self.state.lock().errors.clone()
    }

    /// Snapshot copy of the warnings collected so far.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.state.lock().warnings.clone()
    }

    /// Moves the reporter to `Finalized`. Further `collect_*` calls become
    /// no-ops until `reset` is called.
    pub fn finalize(&self) -> FinalizedDiagnostics {
        let mut state = self.state.lock();
        let result = FinalizedDiagnostics { errors: state.errors.clone(), warnings: state.warnings.clone() };
        state.phase = Phase::Finalized;
        result
    }

    /// Clears all collected diagnostics and returns the reporter to `Open`.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        *state = ReporterState::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates_identical_kind_and_position() {
        let reporter = ErrorReporter::new(ReporterConfig::default());
        let pos = SourcePosition::new(1, 1, 0);
        reporter.collect_error(ErrorKind::UndeclaredVariable("x".into()), pos);
        reporter.collect_error(ErrorKind::UndeclaredVariable("x".into()), pos);
        assert_eq!(reporter.error_count(), 1);
    }

    #[test]
    fn distinct_positions_are_not_deduplicated() {
        let reporter = ErrorReporter::new(ReporterConfig::default());
        reporter.collect_error(ErrorKind::UndeclaredVariable("x".into()), SourcePosition::new(1, 1, 0));
        reporter.collect_error(ErrorKind::UndeclaredVariable("x".into()), SourcePosition::new(2, 1, 5));
        assert_eq!(reporter.error_count(), 2);
    }

    #[test]
    fn caps_at_max_error_count_with_trailing_too_many_errors() {
        let reporter = ErrorReporter::new(ReporterConfig { max_error_count: 2, enable_deduplication: false, ..ReporterConfig::default() });
        for i in 0..10 {
            reporter.collect_error(ErrorKind::UndeclaredVariable(format!("x{i}")), SourcePosition::new(1, 1, i));
        }
        let finalized = reporter.finalize();
        assert_eq!(finalized.errors.len(), 3); // 2 real errors + tooManyErrors
        assert!(matches!(finalized.errors.last().unwrap().kind, crate::diagnostic::DiagnosticKind::Error(ErrorKind::TooManyErrors(2))));
    }

    #[test]
    fn finalize_then_reset_reopens_reporter() {
        let reporter = ErrorReporter::new(ReporterConfig::default());
        reporter.collect_error(ErrorKind::BreakOutsideLoop, SourcePosition::start());
        let finalized = reporter.finalize();
        assert_eq!(finalized.errors.len(), 1);
        reporter.collect_error(ErrorKind::BreakOutsideLoop, SourcePosition::start());
        assert_eq!(reporter.error_count(), 1); // finalized: collect ignored

        reporter.reset();
        assert!(!reporter.is_finalized());
        assert_eq!(reporter.error_count(), 0);
    }
}
