use super::*;
use crate::diagnostics::error_codes;
use crate::exercise::{self, Expectation};
use crate::interpreter::Value;
use crate::probe::Probe;

#[test]
fn correct_square_submission_passes() {
    let report = verify("fn square(x) { return x * x }", &exercise::square())
        .expect("exercise content is sound");
    assert!(report.passed);
    assert!(report.probes_run);
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.probes.len(), 1);
    assert!(report.probes[0].passed);
}

#[test]
fn syntax_error_yields_load_report_with_no_probes() {
    let report = verify("fn square( {", &exercise::square()).expect("no harness fault");
    assert!(!report.passed);
    assert!(!report.probes_run);
    assert!(report.probes.is_empty());
    assert!(!report.diagnostics.is_empty());
    assert!(report.diagnostics[0].code.starts_with("E0"));
}

#[test]
fn initial_run_failure_yields_load_report() {
    let report = verify("let x = nope + 1", &exercise::square()).expect("no harness fault");
    assert!(!report.probes_run);
    assert_eq!(
        report.diagnostics[0].code,
        error_codes::load::INITIAL_RUN_FAILED
    );
}

#[test]
fn structural_failures_gate_probes_off() {
    // parses and loads, but square is missing
    let report = verify("fn cube(x) { return x * x * x }", &exercise::square())
        .expect("no harness fault");
    assert!(!report.passed);
    assert!(!report.probes_run);
    assert!(report.probes.is_empty());
    let messages: Vec<&str> = report
        .diagnostics
        .iter()
        .map(|d| d.message.as_str())
        .collect();
    assert!(messages.contains(&"You need to define the square function"));
    assert!(report
        .diagnostics
        .iter()
        .all(|d| d.code == error_codes::analysis::RULE_FAILED));
}

#[test]
fn probe_failure_is_reported_not_raised() {
    let report = verify("fn square(x) { return x + x }", &exercise::square())
        .expect("no harness fault");
    assert!(!report.passed);
    assert!(report.probes_run);
    assert!(!report.probes[0].passed);
}

#[test]
fn probes_can_run_despite_structural_failures_when_configured() {
    let lenient = exercise::Exercise::builder("lenient")
        .rules(
            crate::analysis::RuleSet::new().rule("impossible", "never satisfied", |_| false),
        )
        .probe(
            Probe::new("check", "fn check() { return double(2) }"),
            "",
            Expectation::Returns(Value::Int(4)),
        )
        .probe_despite_structural_failures()
        .build();
    let report =
        verify("fn double(x) { return x * 2 }", &lenient).expect("no harness fault");
    assert!(report.probes_run);
    assert!(report.probes[0].passed);
    // the structural diagnostic still fails the attempt overall
    assert!(!report.passed);
    assert_eq!(report.diagnostics.len(), 1);
}

#[test]
fn broken_probe_content_is_a_harness_error() {
    let broken = exercise::Exercise::builder("broken")
        .probe(
            Probe::new("check", "fn check( {"),
            "",
            Expectation::DoesNotRaise,
        )
        .build();
    let err = verify("fn square(x) { return x * x }", &broken).expect_err("should fail");
    assert_eq!(err.code(), error_codes::harness::PROBE_PARSE_FAILED);
}

#[test]
fn verification_is_idempotent() {
    let source = "fn square(x) { return x * x }";
    let first = verify(source, &exercise::square()).expect("first run");
    let second = verify(source, &exercise::square()).expect("second run");
    assert_eq!(first.passed, second.passed);
    assert_eq!(first.probes_run, second.probes_run);
    assert_eq!(first.probes.len(), second.probes.len());
    for (a, b) in first.probes.iter().zip(&second.probes) {
        assert_eq!(a.passed, b.passed);
        assert_eq!(a.result.stdout, b.result.stdout);
        assert_eq!(a.result.outcome, b.result.outcome);
    }
}

#[test]
fn json_report_is_well_formed() {
    let report = verify("fn square(x) { return x * x }", &exercise::square())
        .expect("no harness fault");
    let json: serde_json::Value =
        serde_json::from_str(&report.to_json()).expect("report JSON should parse");
    assert_eq!(json["passed"], serde_json::Value::Bool(true));
    assert_eq!(json["probes"][0]["outcome"]["kind"], "returned");
    assert_eq!(json["probes"][0]["outcome"]["value"], "16");
}

#[test]
fn summary_mentions_the_verdict() {
    let source = "fn square(x) { return x * x }";
    let report = verify(source, &exercise::square()).expect("no harness fault");
    let summary = report.summary(source);
    assert!(summary.contains("check check_square: ok"));
    assert!(summary.trim_end().ends_with("result: PASS"));
}

#[test]
fn interactive_exercise_checks_stdout() {
    let good = "fn greet() { let name = input(\"Name: \")\nprintln(\"Hello, \" + name + \"!\") }";
    let report = verify(good, &exercise::greet()).expect("no harness fault");
    assert!(report.passed, "summary:\n{}", report.summary(good));

    let silent = "fn greet() { let name = input(\"Name: \") }";
    let report = verify(silent, &exercise::greet()).expect("no harness fault");
    assert!(!report.passed);
    assert!(report.probes_run);
}
