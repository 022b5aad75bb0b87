//! Pure rendering of a `Diagnostic` to human-readable text. Used by
//! the CLI and by golden-file tests; output is byte-stable for a given
//! diagnostic and symbol table.

use felangkit_errors::{Diagnostic, DiagnosticKind, ErrorKind};
use felangkit_passes::SymbolTable;

/// Renders a single diagnostic in the golden-file layout:
///
/// ```text
/// SemanticError: <primary message>
///   at line <L>, column <C>
///   <zero or more secondary lines>
/// ```
///
/// When `symbols` is given and the diagnostic is an `undeclaredVariable`,
/// appends a "did you mean" suggestion for any in-scope name within edit
/// distance 2.
pub fn format_diagnostic(diagnostic: &Diagnostic, symbols: Option<&SymbolTable>) -> String {
    let mut out = format!("SemanticError: {}\n", diagnostic.kind);
    out.push_str(&format!("  at line {}, column {}\n", diagnostic.position.line, diagnostic.position.column));

    if let (DiagnosticKind::Error(ErrorKind::UndeclaredVariable(name)), Some(symbols)) = (&diagnostic.kind, symbols) {
        if let Some(suggestion) = suggest_name(name, symbols) {
            out.push_str(&format!("  Suggestion: did you mean '{suggestion}'?\n"));
        }
    }

    out
}

/// Renders a full report: `Semantic Analysis Errors (N total):` followed
/// by an enumerated list of formatted diagnostics.
pub fn format_report(diagnostics: &[Diagnostic], symbols: Option<&SymbolTable>) -> String {
    let mut out = format!("Semantic Analysis Errors ({} total):\n", diagnostics.len());
    for (index, diagnostic) in diagnostics.iter().enumerate() {
        out.push_str(&format!("{}. {}", index + 1, format_diagnostic(diagnostic, symbols)));
    }
    out
}

/// The closest declared symbol name to `name` within edit distance 2, or
/// `None` if nothing qualifies. Ties break on declaration order (the
/// symbol table's own iteration order).
fn suggest_name(name: &str, symbols: &SymbolTable) -> Option<String> {
    let mut best: Option<(String, usize)> = None;
    for symbol in symbols.all_symbols() {
        if symbol.name == name {
            continue;
        }
        let distance = levenshtein(name, &symbol.name);
        if distance <= 2 {
            match &best {
                Some((_, best_distance)) if *best_distance <= distance => {}
                _ => best = Some((symbol.name.clone(), distance)),
            }
        }
    }
    best.map(|(name, _)| name)
}

/// Levenshtein edit distance over `char`s (sufficient since only
/// edit-distance <= 2 matters here, which doesn't need the
/// transposition-aware Damerau variant).
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.iter().enumerate() {
        let mut prev_diag = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let old_left = row[j + 1];
            row[j + 1] = if ca == cb {
                prev_diag
            } else {
                1 + prev_diag.min(row[j]).min(row[j + 1])
            };
            prev_diag = old_left;
        }
    }
    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use felangkit_errors::ErrorKind;
    use felangkit_passes::{SymbolKind, SymbolTable};
    use felangkit_span::SourcePosition;

    #[test]
    fn formats_primary_message_and_position() {
        let diagnostic = Diagnostic::error(ErrorKind::BreakOutsideLoop, SourcePosition::new(1, 1, 0));
        let rendered = format_diagnostic(&diagnostic, None);
        assert_eq!(rendered, "SemanticError: 'break' used outside of a loop\n  at line 1, column 1\n");
    }

    #[test]
    fn suggests_close_name_for_undeclared_variable() {
        let symbols = SymbolTable::new();
        symbols.declare("counter", SymbolKind::Variable, felangkit_ast::FeType::Integer, SourcePosition::start()).unwrap();
        let diagnostic = Diagnostic::error(ErrorKind::UndeclaredVariable("counte".to_string()), SourcePosition::start());
        let rendered = format_diagnostic(&diagnostic, Some(&symbols));
        assert!(rendered.contains("Suggestion: did you mean 'counter'?"));
    }

    #[test]
    fn no_suggestion_beyond_edit_distance_two() {
        let symbols = SymbolTable::new();
        symbols.declare("zzzzzzzz", SymbolKind::Variable, felangkit_ast::FeType::Integer, SourcePosition::start()).unwrap();
        let diagnostic = Diagnostic::error(ErrorKind::UndeclaredVariable("x".to_string()), SourcePosition::start());
        let rendered = format_diagnostic(&diagnostic, Some(&symbols));
        assert!(!rendered.contains("Suggestion"));
    }

    #[test]
    fn report_lists_every_diagnostic_with_a_header() {
        let diagnostics = vec![
            Diagnostic::error(ErrorKind::BreakOutsideLoop, SourcePosition::new(1, 1, 0)),
            Diagnostic::error(ErrorKind::ReturnOutsideFunction, SourcePosition::new(2, 1, 5)),
        ];
        let rendered = format_report(&diagnostics, None);
        assert!(rendered.starts_with("Semantic Analysis Errors (2 total):\n"));
        assert!(rendered.contains("1. SemanticError"));
        assert!(rendered.contains("2. SemanticError"));
    }
}
