//! End-to-end scenarios exercising the public entry points end to end
//! rather than any single stage in isolation.

use felangkit::formatter::format_diagnostic;
use felangkit::{collect_all_errors, parse_statements, parse_with_analysis, ErrorReportingProfile, ParseOptions};
use felangkit_ast::{Node, Statement};
use felangkit_errors::{DiagnosticKind, ErrorKind};

#[test]
fn happy_path_declaration() {
    let analyzed = parse_with_analysis("変数 x: 整数型 ← 42", ParseOptions::default());
    assert_eq!(analyzed.statements.len(), 1);
    match &analyzed.statements[0] {
        Statement::VariableDeclaration(decl) => {
            assert_eq!(decl.name, "x");
            assert_eq!(decl.declared_type, felangkit_ast::FeType::Integer);
        }
        other => panic!("expected a variable declaration, got {other:?}"),
    }
    assert!(analyzed.is_successful());
    assert!(analyzed.diagnostics.warnings.is_empty());
    let symbol = analyzed.symbols.lookup("x").expect("x should be declared");
    assert!(symbol.initialized);
}

#[test]
fn type_mismatch_on_initializer() {
    let analyzed = parse_with_analysis(r#"変数 x: 整数型 ← "hello""#, ParseOptions::default());
    assert!(!analyzed.is_successful());
    assert_eq!(analyzed.diagnostics.errors.len(), 1);
    assert!(matches!(
        &analyzed.diagnostics.errors[0].kind,
        DiagnosticKind::Error(ErrorKind::TypeMismatch { expected, actual })
            if expected == "integer" && actual == "string"
    ));
}

#[test]
fn constant_reassignment() {
    let source = "定数 PI: 実数型 ← 3.14159\nPI ← 3.14";
    let analyzed = parse_with_analysis(source, ParseOptions::default());
    let errors = &analyzed.diagnostics.errors;
    assert_eq!(errors.len(), 1);
    match &errors[0].kind {
        DiagnosticKind::Error(ErrorKind::ConstantReassignment(name)) => {
            assert_eq!(name, "PI");
            assert_eq!(errors[0].position.line, 2);
        }
        other => panic!("expected constantReassignment, got {other:?}"),
    }
}

#[test]
fn break_outside_loop() {
    let analyzed = parse_with_analysis("break", ParseOptions::default());
    assert_eq!(analyzed.diagnostics.errors.len(), 1);
    assert!(matches!(analyzed.diagnostics.errors[0].kind, DiagnosticKind::Error(ErrorKind::BreakOutsideLoop)));
    assert_eq!(analyzed.diagnostics.errors[0].position.line, 1);
    assert_eq!(analyzed.diagnostics.errors[0].position.column, 1);
}

#[test]
fn function_with_missing_return() {
    let source = "function f(): 整数型\n  変数 y: 整数型 ← 0\nend function";
    let analyzed = parse_with_analysis(source, ParseOptions::default());
    assert!(analyzed
        .diagnostics
        .errors
        .iter()
        .any(|d| matches!(&d.kind, DiagnosticKind::Error(ErrorKind::MissingReturnStatement(name)) if name == "f")));
}

#[test]
fn argument_count_and_type_mismatches() {
    let preamble = "function add(a: 整数型, b: 整数型): 整数型\n  return a + b\nend function\n";

    let too_few = format!("{preamble}add(1)");
    let analyzed = parse_with_analysis(&too_few, ParseOptions::default());
    assert!(analyzed.diagnostics.errors.iter().any(|d| matches!(
        &d.kind,
        DiagnosticKind::Error(ErrorKind::IncorrectArgumentCount { function, expected: 2, actual: 1 })
            if function == "add"
    )));

    let wrong_type = format!(r#"{preamble}add(1, "x")"#);
    let analyzed = parse_with_analysis(&wrong_type, ParseOptions::default());
    assert!(analyzed.diagnostics.errors.iter().any(|d| matches!(
        &d.kind,
        DiagnosticKind::Error(ErrorKind::ArgumentTypeMismatch { function, param_index: 1, expected, actual })
            if function == "add" && expected == "integer" && actual == "string"
    )));
}

#[test]
fn deduplication_collapses_identical_position_but_not_distinct_ones() {
    // Assigning through an undeclared array base infers it exactly once
    // (see `check_assignment_target`), so this must not produce the same
    // `undeclaredVariable` diagnostic twice at the same position even
    // though both target-validation and right-hand-side checking touch it.
    let same_root_cause = "arr[0] ← 1";
    let analyzed = parse_with_analysis(same_root_cause, ParseOptions::default());
    let undeclared: Vec<_> = analyzed
        .diagnostics
        .errors
        .iter()
        .filter(|d| matches!(&d.kind, DiagnosticKind::Error(ErrorKind::UndeclaredVariable(n)) if n == "arr"))
        .collect();
    assert_eq!(undeclared.len(), 1);

    let distinct_positions = "writeLine(x)\nwriteLine(x)";
    let analyzed = parse_with_analysis(distinct_positions, ParseOptions::default());
    let undeclared: Vec<_> = analyzed
        .diagnostics
        .errors
        .iter()
        .filter(|d| matches!(&d.kind, DiagnosticKind::Error(ErrorKind::UndeclaredVariable(n)) if n == "x"))
        .collect();
    assert_eq!(undeclared.len(), 2);
}

#[test]
fn expression_depth_guard_does_not_crash() {
    let source = format!("{}1{}", "(".repeat(300), ")".repeat(300));
    let options = ParseOptions { max_nesting_depth: 256, ..ParseOptions::default() };
    let (_, diagnostics) = parse_statements(&format!("writeLine({source})"), options);
    assert!(diagnostics.iter().any(|d| matches!(d.kind, DiagnosticKind::Error(ErrorKind::NestingTooDeep))));
}

#[test]
fn unicode_identifier_round_trips_through_analysis() {
    let analyzed = parse_with_analysis("変数 データ: 整数型 ← 1", ParseOptions::default());
    assert!(analyzed.is_successful());
    assert!(analyzed.symbols.lookup("データ").is_some());
}

#[test]
fn collect_all_errors_is_flat_across_syntax_and_semantic_stages() {
    let errors = collect_all_errors("変数 x: 整数型 ← (1 + \nbreak", ParseOptions::default());
    assert!(!errors.is_empty());
}

#[test]
fn idempotent_across_repeated_runs() {
    let source = "変数 x: 整数型 ← \"oops\"\nbreak";
    let first = parse_with_analysis(source, ParseOptions::default());
    let second = parse_with_analysis(source, ParseOptions::default());
    assert_eq!(first.diagnostics.errors.len(), second.diagnostics.errors.len());
    for (a, b) in first.diagnostics.errors.iter().zip(second.diagnostics.errors.iter()) {
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.position, b.position);
    }
}

#[test]
fn strict_profile_reports_unused_variable_warning_golden_text() {
    let options = ParseOptions::default().with_profile(ErrorReportingProfile::Strict);
    let analyzed = parse_with_analysis("変数 unused: 整数型 ← 1", options);
    let warning = analyzed.diagnostics.warnings.first().expect("expected an unused-variable warning");
    let rendered = format_diagnostic(warning, Some(&analyzed.symbols));
    assert_eq!(rendered, "SemanticError: unused variable 'unused'\n  at line 1, column 1\n");
}

#[test]
fn every_ast_node_position_lies_within_source_span() {
    let source = "変数 x: 整数型 ← 1 + 2 * 3";
    let (statements, diagnostics) = parse_statements(source, ParseOptions::default());
    assert!(diagnostics.is_empty());
    let char_count = source.chars().count() as u32;
    for statement in &statements {
        assert!(statement.position().offset <= char_count);
    }
}

#[test]
fn character_literal_widens_into_a_string_slot() {
    let analyzed = parse_with_analysis("変数 x: 文字列型 ← 'a'", ParseOptions::default());
    assert!(analyzed.is_successful(), "unexpected errors: {:?}", analyzed.diagnostics.errors);
}

#[test]
fn concatenating_two_characters_yields_a_string() {
    let analyzed = parse_with_analysis("変数 x: 文字列型 ← 'a' + 'b'", ParseOptions::default());
    assert!(analyzed.is_successful(), "unexpected errors: {:?}", analyzed.diagnostics.errors);
}

#[test]
fn string_is_indexable_and_iterable_with_character_elements() {
    let indexing = "変数 s: 文字列型 ← \"hi\"\n変数 c: 文字型 ← s[0]";
    let analyzed = parse_with_analysis(indexing, ParseOptions::default());
    assert!(analyzed.is_successful(), "unexpected errors: {:?}", analyzed.diagnostics.errors);

    let for_each = "変数 s: 文字列型 ← \"hi\"\nfor ch in s do\n  write(ch)\nend for";
    let analyzed = parse_with_analysis(for_each, ParseOptions::default());
    assert!(analyzed.is_successful(), "unexpected errors: {:?}", analyzed.diagnostics.errors);
}

#[test]
fn builtin_with_unknown_typed_parameter_still_checks_argument_count() {
    let analyzed = parse_with_analysis("writeLine()", ParseOptions::default());
    assert!(analyzed.diagnostics.errors.iter().any(|d| matches!(
        &d.kind,
        DiagnosticKind::Error(ErrorKind::IncorrectArgumentCount { function, expected: 1, actual: 0 })
            if function == "writeLine"
    )));
}

#[test]
fn unreachable_code_after_an_if_where_both_branches_terminate() {
    let source = "function f(): 整数型\n  if true then\n    return 1\n  else\n    return 2\n  end if\n  writeLine(\"x\")\nend function";
    let analyzed = parse_with_analysis(source, ParseOptions::default());
    assert!(analyzed.diagnostics.errors.iter().any(|d| matches!(&d.kind, DiagnosticKind::Error(ErrorKind::UnreachableCode))));
}

#[test]
fn chained_comparisons_do_not_parse_as_a_single_expression() {
    let (_, diagnostics) = parse_statements("writeLine(1 < 2 < 3)", ParseOptions::default());
    assert!(!diagnostics.is_empty());
}
