use std::rc::Rc;

use super::*;
use crate::parser::parse_source;

/// Run a program against a capture console and return (env, console)
fn run(source: &str, input: &str) -> (Environment, Rc<CaptureConsole>) {
    let program = parse_source(source, "test").expect("program should parse");
    let console = Rc::new(CaptureConsole::new(input));
    let mut interp = Interpreter::new(console.clone());
    interp.run_program(&program).expect("program should run");
    (interp.into_env(), console)
}

fn run_err(source: &str) -> RuntimeError {
    let program = parse_source(source, "test").expect("program should parse");
    let console = Rc::new(CaptureConsole::new(""));
    let mut interp = Interpreter::new(console);
    interp
        .run_program(&program)
        .expect_err("program should fail")
}

fn lookup_int(env: &Environment, name: &str) -> i64 {
    match env.lookup(name) {
        Some(Value::Int(n)) => *n,
        other => panic!("{} should be an Int, got {:?}", name, other),
    }
}

#[test]
fn arithmetic_and_precedence() {
    let (env, _) = run("let x = 2 + 3 * 4\nlet y = (2 + 3) * 4\nlet z = 10 % 3", "");
    assert_eq!(lookup_int(&env, "x"), 14);
    assert_eq!(lookup_int(&env, "y"), 20);
    assert_eq!(lookup_int(&env, "z"), 1);
}

#[test]
fn string_concat_and_comparison() {
    let (env, _) = run(
        "let s = \"ab\" + \"cd\"\nlet t = \"ab\" < \"cd\"",
        "",
    );
    assert_eq!(env.lookup("s"), Some(&Value::Str("abcd".to_string())));
    assert_eq!(env.lookup("t"), Some(&Value::Bool(true)));
}

#[test]
fn function_call_returns_value() {
    let (env, _) = run(
        "fn square(x) { return x * x }\nlet n = square(7)",
        "",
    );
    assert_eq!(lookup_int(&env, "n"), 49);
}

#[test]
fn function_without_return_yields_unit() {
    let (env, _) = run("fn noop(x) { let y = x }\nlet r = noop(1)", "");
    assert_eq!(env.lookup("r"), Some(&Value::Unit));
}

#[test]
fn recursion() {
    let (env, _) = run(
        "fn fact(n) { if n <= 1 { return 1 } return n * fact(n - 1) }\nlet f = fact(6)",
        "",
    );
    assert_eq!(lookup_int(&env, "f"), 720);
}

#[test]
fn while_loop_with_break_and_continue() {
    let source = "\
let total = 0
let i = 0
while true {
    i = i + 1
    if i > 10 { break }
    if i % 2 == 0 { continue }
    total = total + i
}";
    let (env, _) = run(source, "");
    assert_eq!(lookup_int(&env, "total"), 25);
}

#[test]
fn for_loop_over_range() {
    let (env, _) = run(
        "let total = 0\nfor i in range(1, 5) { total = total + i }",
        "",
    );
    assert_eq!(lookup_int(&env, "total"), 10);
}

#[test]
fn for_loop_over_string_chars() {
    let (env, _) = run(
        "let count = 0\nfor c in \"abc\" { count = count + 1 }",
        "",
    );
    assert_eq!(lookup_int(&env, "count"), 3);
}

#[test]
fn print_and_println_capture() {
    let (_, console) = run("print(\"a\", 1)\nprintln(\"b\")\nprintln(2)", "");
    assert_eq!(console.stdout(), "a 1b\n2\n");
}

#[test]
fn input_reads_lines_and_records_prompts() {
    let (env, console) = run(
        "let name = input(\"Name? \")\nlet age = int(input(\"Age? \"))",
        "Alice\n42\n",
    );
    assert_eq!(env.lookup("name"), Some(&Value::Str("Alice".to_string())));
    assert_eq!(lookup_int(&env, "age"), 42);
    assert_eq!(console.prompts(), "Name? Age? ");
    assert_eq!(console.stdout(), "");
}

#[test]
fn input_exhausted_is_an_error() {
    let program = parse_source("let a = input()\nlet b = input()", "test").expect("parses");
    let console = Rc::new(CaptureConsole::new("only one line\n"));
    let mut interp = Interpreter::new(console);
    let err = interp
        .run_program(&program)
        .expect_err("second input() should fail");
    assert_eq!(
        err.code,
        crate::diagnostics::error_codes::runtime::END_OF_INPUT
    );
}

#[test]
fn undefined_variable_error() {
    let err = run_err("let x = y + 1");
    assert_eq!(
        err.code,
        crate::diagnostics::error_codes::runtime::UNDEFINED_VARIABLE
    );
}

#[test]
fn assignment_to_undefined_name_is_an_error() {
    let err = run_err("x = 1");
    assert_eq!(
        err.code,
        crate::diagnostics::error_codes::runtime::UNDEFINED_VARIABLE
    );
}

#[test]
fn division_by_zero_error() {
    let err = run_err("let x = 1 / 0");
    assert_eq!(
        err.code,
        crate::diagnostics::error_codes::runtime::DIVISION_BY_ZERO
    );
}

#[test]
fn arity_mismatch_error() {
    let err = run_err("fn f(a, b) { return a }\nf(1)");
    assert_eq!(
        err.code,
        crate::diagnostics::error_codes::runtime::ARITY_MISMATCH
    );
    assert!(err.message.contains("f"));
}

#[test]
fn unknown_function_error() {
    let err = run_err("mystery(1)");
    assert_eq!(
        err.code,
        crate::diagnostics::error_codes::runtime::UNKNOWN_FUNCTION
    );
}

#[test]
fn return_at_top_level_is_an_error() {
    let err = run_err("return 1");
    assert_eq!(
        err.code,
        crate::diagnostics::error_codes::runtime::RETURN_OUTSIDE_FUNCTION
    );
}

#[test]
fn break_at_top_level_is_an_error() {
    let err = run_err("break");
    assert_eq!(
        err.code,
        crate::diagnostics::error_codes::runtime::BREAK_OUTSIDE_LOOP
    );
    // the signal was converted into a real error at the top level
    assert!(!err.is_control_flow());
}

#[test]
fn list_builtins() {
    let (env, _) = run(
        "let xs = push(push([1], 2), 3)\nlet n = len(xs)\nlet last = xs[-1]",
        "",
    );
    assert_eq!(lookup_int(&env, "n"), 3);
    assert_eq!(lookup_int(&env, "last"), 3);
}

#[test]
fn index_out_of_bounds_error() {
    let err = run_err("let xs = [1, 2]\nlet y = xs[5]");
    assert_eq!(
        err.code,
        crate::diagnostics::error_codes::runtime::INDEX_OUT_OF_BOUNDS
    );
}

#[test]
fn user_definition_shadows_builtin() {
    let (env, console) = run(
        "fn len(x) { return 99 }\nlet n = len(\"abcd\")",
        "",
    );
    assert_eq!(lookup_int(&env, "n"), 99);
    assert_eq!(console.stdout(), "");
}

#[test]
fn short_circuit_and_or() {
    // the right-hand side would raise if evaluated
    let (env, _) = run(
        "fn boom() { return 1 / 0 }\nlet a = false and boom() == 1\nlet b = true or boom() == 1",
        "",
    );
    assert_eq!(env.lookup("a"), Some(&Value::Bool(false)));
    assert_eq!(env.lookup("b"), Some(&Value::Bool(true)));
}

#[test]
fn call_sees_caller_bindings_but_writes_stay_local() {
    let (env, _) = run(
        "let g = 10\nfn f() { let g = 99\nreturn g }\nlet r = f()\nlet after = g",
        "",
    );
    assert_eq!(lookup_int(&env, "r"), 99);
    assert_eq!(lookup_int(&env, "after"), 10);
}
