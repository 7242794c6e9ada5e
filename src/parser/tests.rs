use super::*;
use crate::diagnostics::error_codes;

#[test]
fn test_parse_empty_program() {
    let result = parse_source("", "submission.tut");
    assert!(result.is_ok(), "Parse error: {:?}", result.err());
    assert!(result.unwrap().body.is_empty());
}

#[test]
fn test_parse_simple_function() {
    let source = r#"
fn add(a, b) {
  return a + b
}
"#;
    let result = parse_source(source, "submission.tut");
    assert!(result.is_ok(), "Parse error: {:?}", result.err());
    let program = result.unwrap();
    if let Stmt::Fn(def) = &program.body[0] {
        assert_eq!(def.name, "add");
        assert_eq!(def.params.len(), 2);
        assert_eq!(def.params[0].name, "a");
    } else {
        panic!("expected fn def");
    }
}

#[test]
fn test_parse_top_level_statements() {
    let source = r#"
let x = 3
println(x * 2)
"#;
    let program = parse_source(source, "submission.tut").unwrap();
    assert_eq!(program.body.len(), 2);
    assert!(matches!(program.body[0], Stmt::Let { .. }));
    assert!(matches!(program.body[1], Stmt::Expr { .. }));
}

#[test]
fn test_parse_assignment() {
    let source = r#"
let x = 1
x = x + 1
"#;
    let program = parse_source(source, "submission.tut").unwrap();
    match &program.body[1] {
        Stmt::Assign { target, .. } => assert_eq!(target, "x"),
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_bare_return() {
    let source = r#"
fn noop() {
  return
}
"#;
    let program = parse_source(source, "submission.tut").unwrap();
    if let Stmt::Fn(def) = &program.body[0] {
        assert!(matches!(def.body[0], Stmt::Return { value: None, .. }));
    } else {
        panic!("expected fn def");
    }
}

#[test]
fn test_parse_if_else_chain() {
    let source = r#"
fn sign(n) {
  if n > 0 {
    return 1
  } else if n < 0 {
    return -1
  } else {
    return 0
  }
}
"#;
    let program = parse_source(source, "submission.tut").unwrap();
    if let Stmt::Fn(def) = &program.body[0] {
        match &def.body[0] {
            Stmt::If { else_body, .. } => {
                let else_body = else_body.as_ref().expect("else branch");
                assert!(matches!(else_body[0], Stmt::If { .. }));
            }
            other => panic!("expected if, got {:?}", other),
        }
    } else {
        panic!("expected fn def");
    }
}

#[test]
fn test_parse_loops() {
    let source = r#"
fn count(items) {
  let total = 0
  for item in items {
    total = total + 1
  }
  while total > 10 {
    total = total - 1
  }
  return total
}
"#;
    let result = parse_source(source, "submission.tut");
    assert!(result.is_ok(), "Parse error: {:?}", result.err());
}

#[test]
fn test_parse_precedence() {
    let program = parse_source("let x = 1 + 2 * 3", "submission.tut").unwrap();
    if let Stmt::Let { value, .. } = &program.body[0] {
        match value.as_ref() {
            Expr::Binary { op, right, .. } => {
                assert_eq!(*op, BinaryOp::Add);
                assert!(matches!(
                    right.as_ref(),
                    Expr::Binary {
                        op: BinaryOp::Mul,
                        ..
                    }
                ));
            }
            other => panic!("expected binary expr, got {:?}", other),
        }
    } else {
        panic!("expected let");
    }
}

#[test]
fn test_parse_call_and_index() {
    let source = "let first = items(3)[0]";
    let program = parse_source(source, "submission.tut").unwrap();
    if let Stmt::Let { value, .. } = &program.body[0] {
        assert!(matches!(value.as_ref(), Expr::Index { .. }));
    } else {
        panic!("expected let");
    }
}

#[test]
fn test_parse_nested_fn() {
    let source = r#"
fn outer() {
  fn inner() {
    return 1
  }
  return inner()
}
"#;
    let program = parse_source(source, "submission.tut").unwrap();
    if let Stmt::Fn(def) = &program.body[0] {
        assert!(matches!(def.body[0], Stmt::Fn(_)));
    } else {
        panic!("expected fn def");
    }
}

#[test]
fn test_parse_error_reports_diagnostic() {
    let result = parse_source("fn square( {", "submission.tut");
    let bag = result.expect_err("expected parse failure");
    assert!(bag.has_errors());
}

#[test]
fn test_parse_error_recovers_past_bad_stmt() {
    // Both bad statements should be reported, not just the first
    let result = parse_source("let = 1\nlet = 2", "submission.tut");
    let bag = result.expect_err("expected parse failure");
    assert!(bag.error_count() >= 2);
}

#[test]
fn test_truncated_input_reports_unexpected_eof() {
    let result = parse_source("let x = (1 + 2", "submission.tut");
    let bag = result.expect_err("expected parse failure");
    assert!(bag
        .diagnostics()
        .iter()
        .any(|d| d.code == error_codes::syntax::UNEXPECTED_EOF));
}

#[test]
fn test_mismatched_delimiter_reports_its_own_code() {
    let result = parse_source("let x = (1 + 2]", "submission.tut");
    let bag = result.expect_err("expected parse failure");
    assert!(bag
        .diagnostics()
        .iter()
        .any(|d| d.code == error_codes::syntax::MISSING_DELIMITER));
}
