//! Wires the tokenizer, parsers, and semantic analysis passes into the
//! public entry points, and provides the diagnostic formatter used by the CLI.

pub mod formatter;

use felangkit_ast::Expression;
use felangkit_ast::Statement;
use felangkit_errors::{Diagnostic, ErrorReporter, FinalizedDiagnostics, ReporterConfig};
use felangkit_parser::{parse_expression as parser_parse_expression, parse_statements as parser_parse_statements};
use felangkit_parser::{tokenize, TokenizerFlags, DEFAULT_MAX_NESTING_DEPTH};
use felangkit_passes::{SymbolTable, TypeChecker};

pub use formatter::format_diagnostic;

/// Named tunables for how aggressively semantic analysis reports errors.
/// Each maps onto a `ReporterConfig`.
#[derive(Copy, Clone, Debug)]
pub enum ErrorReportingProfile {
    /// `ReporterConfig::default()`: up to 100 errors, deduplicated,
    /// unused-symbol correlation off.
    Default,
    /// `ReporterConfig::strict()`: effectively unbounded, correlation on.
    Strict,
    /// `ReporterConfig::fast()`: stops after 20 errors, no deduplication —
    /// for quick syntax-only feedback loops.
    Fast,
    /// A caller-supplied configuration.
    Custom(ReporterConfig),
}

impl ErrorReportingProfile {
    fn into_config(self) -> ReporterConfig {
        match self {
            ErrorReportingProfile::Default => ReporterConfig::default(),
            ErrorReportingProfile::Strict => ReporterConfig::strict(),
            ErrorReportingProfile::Fast => ReporterConfig::fast(),
            ErrorReportingProfile::Custom(config) => config,
        }
    }
}

/// Knobs threaded through every public entry point.
#[derive(Copy, Clone, Debug)]
pub struct ParseOptions {
    pub max_nesting_depth: u32,
    pub keep_trivia: bool,
    pub normalize_unicode: bool,
    pub error_reporting: ErrorReportingProfileConfig,
}

/// `ErrorReportingProfile` doesn't implement `Copy`/`Debug` cleanly once it
/// carries a `ReporterConfig`'s nested fields inline in a public struct
/// literal, so `ParseOptions` stores the resolved config directly and
/// offers constructors for the named profiles.
pub type ErrorReportingProfileConfig = ReporterConfig;

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            keep_trivia: false,
            normalize_unicode: true,
            error_reporting: ReporterConfig::default(),
        }
    }
}

impl ParseOptions {
    pub fn with_profile(mut self, profile: ErrorReportingProfile) -> Self {
        self.error_reporting = profile.into_config();
        self
    }

    fn tokenizer_flags(&self) -> TokenizerFlags {
        TokenizerFlags { keep_trivia: self.keep_trivia, normalize_unicode: self.normalize_unicode }
    }
}

/// Result of a full parse-plus-semantic-analysis run.
pub struct AnalyzedProgram {
    pub statements: Vec<Statement>,
    pub symbols: SymbolTable,
    pub diagnostics: FinalizedDiagnostics,
}

impl AnalyzedProgram {
    pub fn is_successful(&self) -> bool {
        self.diagnostics.is_successful()
    }
}

/// `parseExpression(source) -> (expression, diagnostics)`.
pub fn parse_expression(source: &str, options: ParseOptions) -> (Expression, Vec<Diagnostic>) {
    let (tokens, mut diagnostics) = tokenize(source, options.tokenizer_flags());
    let (expr, parse_diagnostics) = parser_parse_expression(tokens, options.max_nesting_depth);
    diagnostics.extend(parse_diagnostics);
    (expr, diagnostics)
}

/// `parseStatements(source) -> (statements, diagnostics)`.
pub fn parse_statements(source: &str, options: ParseOptions) -> (Vec<Statement>, Vec<Diagnostic>) {
    let (tokens, mut diagnostics) = tokenize(source, options.tokenizer_flags());
    let (statements, parse_diagnostics) = parser_parse_statements(tokens, options.max_nesting_depth);
    diagnostics.extend(parse_diagnostics);
    (statements, diagnostics)
}

/// `parseWithAnalysis(source) -> AnalyzedProgram`: runs the tokenizer,
/// statement parser, and full semantic analysis in one call, folding
/// syntax-stage diagnostics into the same reporter as semantic ones so
/// callers see every error in declaration order.
pub fn parse_with_analysis(source: &str, options: ParseOptions) -> AnalyzedProgram {
    let (tokens, lexical_diagnostics) = tokenize(source, options.tokenizer_flags());
    let (statements, syntax_diagnostics) = parser_parse_statements(tokens, options.max_nesting_depth);

    let reporter = ErrorReporter::new(options.error_reporting);
    for diagnostic in lexical_diagnostics.into_iter().chain(syntax_diagnostics) {
        match diagnostic.kind {
            felangkit_errors::DiagnosticKind::Error(kind) => reporter.collect_error(kind, diagnostic.position),
            felangkit_errors::DiagnosticKind::Warning(kind) => reporter.collect_warning(kind, diagnostic.position),
        }
    }

    let symbols = SymbolTable::new();
    if !reporter.is_full() {
        let mut checker = TypeChecker::new(&symbols, &reporter);
        checker.check_program(&statements);
    }

    if options.error_reporting.enable_error_correlation {
        collect_unused_symbol_warnings(&symbols, &reporter);
    }

    let diagnostics = reporter.finalize();
    AnalyzedProgram { statements, symbols, diagnostics }
}

/// `validateWithSemantics(source) → bool`: runs the full pipeline and
/// reports only whether the program is free of errors, for callers that
/// don't need the statements, symbol table, or diagnostic detail back.
pub fn validate_with_semantics(source: &str, options: ParseOptions) -> bool {
    parse_with_analysis(source, options).is_successful()
}

/// Runs only the semantic passes over an already-parsed program, e.g. for
/// callers building their own pipeline in front of this one.
pub fn check_statements(statements: &[Statement], profile: ErrorReportingProfile) -> (SymbolTable, FinalizedDiagnostics) {
    let config = profile.into_config();
    let reporter = ErrorReporter::new(config);
    let symbols = SymbolTable::new();
    let mut checker = TypeChecker::new(&symbols, &reporter);
    checker.check_program(statements);
    if config.enable_error_correlation {
        collect_unused_symbol_warnings(&symbols, &reporter);
    }
    (symbols, reporter.finalize())
}

/// `collectAllErrors(source) -> Vec<Diagnostic>`: the simplest entry point,
/// for callers that only want a flat diagnostic list.
pub fn collect_all_errors(source: &str, options: ParseOptions) -> Vec<Diagnostic> {
    let analyzed = parse_with_analysis(source, options);
    analyzed
        .diagnostics
        .errors
        .into_iter()
        .chain(analyzed.diagnostics.warnings)
        .collect()
}

/// `enableErrorCorrelation`'s unused-variable sweep: this needs
/// `SymbolTable`, which `felangkit-errors` deliberately doesn't depend on,
/// so it lives here rather than inside `ErrorReporter` itself.
///
/// `SymbolTable::unused_symbols` already excludes functions/procedures
/// (unused-function detection stays off even with correlation enabled), so
/// every symbol reaching this loop is a variable or parameter.
fn collect_unused_symbol_warnings(symbols: &SymbolTable, reporter: &ErrorReporter) {
    use felangkit_errors::WarningKind;
    use felangkit_passes::SymbolKind;

    for symbol in symbols.unused_symbols() {
        if matches!(symbol.kind, SymbolKind::Constant) {
            continue;
        }
        reporter.collect_warning(WarningKind::UnusedVariable(symbol.name.clone()), symbol.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_analysis_reports_undeclared_variable() {
        let analyzed = parse_with_analysis("writeLine(toString(x))", ParseOptions::default());
        assert!(!analyzed.is_successful());
    }

    #[test]
    fn parse_with_analysis_accepts_a_well_typed_program() {
        let source = "変数 x: 整数型 ← 1\n変数 y: 整数型 ← x + 1\nwriteLine(toString(y))";
        let analyzed = parse_with_analysis(source, ParseOptions::default());
        assert!(analyzed.is_successful(), "unexpected errors: {:?}", analyzed.diagnostics.errors);
    }

    #[test]
    fn strict_profile_surfaces_unused_variable_warning() {
        let options = ParseOptions::default().with_profile(ErrorReportingProfile::Strict);
        let analyzed = parse_with_analysis("変数 x: 整数型 ← 1", options);
        assert!(analyzed.diagnostics.warnings.iter().any(|d| matches!(
            &d.kind,
            felangkit_errors::DiagnosticKind::Warning(felangkit_errors::WarningKind::UnusedVariable(n)) if n == "x"
        )));
    }

    #[test]
    fn collect_all_errors_is_flat_and_non_empty_on_bad_input() {
        let errors = collect_all_errors("変数 ← ", ParseOptions::default());
        assert!(!errors.is_empty());
    }

    #[test]
    fn validate_with_semantics_is_a_bool_shortcut() {
        let source = "変数 x: 整数型 ← 1\nwriteLine(toString(x))";
        assert!(validate_with_semantics(source, ParseOptions::default()));
        assert!(!validate_with_semantics("変数 x: 整数型 ← \"hello\"", ParseOptions::default()));
    }
}
