//! Inline snapshot tests for the diagnostic formatter, using `expect-test`:
//! the expected text lives right next to the assertion instead of in a
//! separate golden file, and `UPDATE_EXPECT=1 cargo test` rewrites it in
//! place after an intentional formatting change.

use expect_test::{expect, Expect};

use felangkit::formatter::{format_diagnostic, format_report};
use felangkit::{parse_with_analysis, ErrorReportingProfile, ParseOptions};

fn check(actual: &str, expected: Expect) {
    expected.assert_eq(actual);
}

#[test]
fn type_mismatch_diagnostic_snapshot() {
    let analyzed = parse_with_analysis(r#"変数 x: 整数型 ← "hello""#, ParseOptions::default());
    let rendered = format_diagnostic(&analyzed.diagnostics.errors[0], Some(&analyzed.symbols));
    check(
        &rendered,
        expect![[r#"
            SemanticError: expected type integer, found string
              at line 1, column 13
        "#]],
    );
}

#[test]
fn multi_error_report_snapshot() {
    let source = "add(1)\nbreak";
    let analyzed = parse_with_analysis(source, ParseOptions::default());
    let all: Vec<_> = analyzed.diagnostics.errors.iter().chain(&analyzed.diagnostics.warnings).cloned().collect();
    let rendered = format_report(&all, Some(&analyzed.symbols));
    check(
        &rendered,
        expect![[r#"
            Semantic Analysis Errors (2 total):
            1. SemanticError: undeclared function 'add'
              at line 1, column 1
            2. SemanticError: 'break' used outside of a loop
              at line 2, column 1
        "#]],
    );
}

#[test]
fn strict_profile_unused_variable_snapshot() {
    let options = ParseOptions::default().with_profile(ErrorReportingProfile::Strict);
    let analyzed = parse_with_analysis("変数 unused: 整数型 ← 1", options);
    let rendered = format_diagnostic(&analyzed.diagnostics.warnings[0], Some(&analyzed.symbols));
    check(
        &rendered,
        expect![[r#"
            SemanticError: unused variable 'unused'
              at line 1, column 1
        "#]],
    );
}
