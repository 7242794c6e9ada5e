use std::path::PathBuf;

use super::*;

fn write_submission(dir: &tempfile::TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, source).expect("write submission");
    path
}

#[test]
fn verify_command_reports_pass() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_submission(&dir, "good.tut", "fn square(x) { return x * x }");
    let passed = verify_cmd::run_verify("square", &path, false).expect("command should run");
    assert!(passed);
}

#[test]
fn verify_command_reports_failure_without_erroring() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_submission(&dir, "bad.tut", "fn square(x) { return x + x }");
    let passed = verify_cmd::run_verify("square", &path, true).expect("command should run");
    assert!(!passed);
}

#[test]
fn verify_command_rejects_unknown_exercise() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_submission(&dir, "good.tut", "fn square(x) { return x * x }");
    assert!(verify_cmd::run_verify("nope", &path, false).is_err());
}

#[test]
fn verify_command_rejects_missing_file() {
    let missing = PathBuf::from("/definitely/not/here.tut");
    assert!(verify_cmd::run_verify("square", &missing, false).is_err());
}

#[test]
fn run_command_executes_a_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_submission(&dir, "prog.tut", "let x = 1 + 1");
    run_cmd::run_program(&path).expect("program should run");
}

#[test]
fn run_command_surfaces_runtime_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_submission(&dir, "boom.tut", "let x = 1 / 0");
    assert!(run_cmd::run_program(&path).is_err());
}

#[test]
fn cli_parses_verify_with_json_flag() {
    let cli = Cli::try_parse_from(["tutorkit", "verify", "square", "sub.tut", "--json"])
        .expect("args should parse");
    assert!(cli.json);
    match cli.command {
        Command::Verify { exercise, file } => {
            assert_eq!(exercise, "square");
            assert_eq!(file, PathBuf::from("sub.tut"));
        }
        other => panic!("expected verify, got {:?}", other),
    }
}
