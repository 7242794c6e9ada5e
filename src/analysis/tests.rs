use super::*;
use crate::parser::parse_source;

fn facts(source: &str) -> FactTable {
    let program = parse_source(source, "test").expect("source should parse");
    FactTable::from_program(&program)
}

#[test]
fn records_definitions_and_params() {
    let table = facts("fn square(x) { return x * x }\nlet limit = 10");
    let square = table.function("square");
    assert!(square.defined);
    assert_eq!(square.params, vec!["x"]);
    assert_eq!(square.param_count(), 1);
    assert!(square.has_return);
    assert!(table.has_variable("limit"));
    assert!(!table.has_variable("square"));
}

#[test]
fn absent_function_yields_default_fact() {
    let table = facts("let x = 1");
    let ghost = table.function("ghost");
    assert!(!ghost.defined);
    assert_eq!(ghost.param_count(), 0);
    assert!(!ghost.has_return);
}

#[test]
fn return_in_nested_block_counts() {
    let table = facts("fn f(x) { if x > 0 { while true { return x } } }");
    assert!(table.function("f").has_return);
    assert!(table.function("f").uses_loop);
}

#[test]
fn return_in_nested_fn_does_not_count_for_the_outer_fn() {
    let table = facts("fn outer() { fn inner() { return 1 } }");
    assert!(!table.function("outer").has_return);
    assert!(table.function("inner").defined);
    assert!(table.function("inner").has_return);
}

#[test]
fn calls_and_recursion() {
    let table = facts(
        "fn fact(n) { if n <= 1 { return 1 } return n * fact(n - 1) }\n\
         fn driver() { return fact(5) }",
    );
    assert!(table.function("fact").is_recursive);
    assert!(!table.function("driver").is_recursive);
    assert!(table.function("driver").calls("fact"));
    assert!(!table.function("fact").calls("driver"));
    assert_eq!(table.function_names(), vec!["driver", "fact"]);
}

#[test]
fn collector_sees_function_definitions() {
    struct FnCounter {
        count: usize,
    }
    impl Collector for FnCounter {
        fn visit_fn(&mut self, _def: &crate::parser::ast::FnDef) {
            self.count += 1;
        }
    }

    let program =
        parse_source("fn a() { }\nfn b() { fn c() { } }", "test").expect("source should parse");
    let mut counter = FnCounter { count: 0 };
    FactTable::from_program_with(&program, &mut counter);
    assert_eq!(counter.count, 3);
}

mod rule_evaluation {
    use super::*;

    fn square_rules() -> RuleSet {
        RuleSet::new()
            .rule(
                "defined",
                "You need to define the square function",
                |t: &FactTable| t.function("square").defined,
            )
            .chained(
                "one-arg",
                "defined",
                "square should accept exactly one argument",
                |t: &FactTable| t.function("square").param_count() == 1,
            )
            .rule(
                "has-return",
                "You need a return statement",
                |t: &FactTable| t.function("square").has_return,
            )
    }

    #[test]
    fn all_rules_pass_on_a_correct_submission() {
        let result = square_rules().evaluate(&facts("fn square(x) { return x * x }"));
        assert!(result.passed());
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.status_of("one-arg"), Some(RuleStatus::Passed));
    }

    #[test]
    fn missing_function_skips_the_chained_rule_but_not_independents() {
        let result = square_rules().evaluate(&facts("let x = 1"));
        assert_eq!(
            result.diagnostics,
            vec![
                "You need to define the square function".to_string(),
                "You need a return statement".to_string(),
            ]
        );
        assert_eq!(result.status_of("defined"), Some(RuleStatus::Failed));
        assert_eq!(result.status_of("one-arg"), Some(RuleStatus::Skipped));
        assert_eq!(result.status_of("has-return"), Some(RuleStatus::Failed));
    }

    #[test]
    fn wrong_arity_fails_only_the_chained_rule() {
        let result = square_rules().evaluate(&facts("fn square(x, y) { return x * y }"));
        assert_eq!(
            result.diagnostics,
            vec!["square should accept exactly one argument".to_string()]
        );
        assert!(!result.passed());
    }

    #[test]
    fn missing_return_fails_the_independent_rule() {
        let result = square_rules().evaluate(&facts("fn square(x) { let y = x * x }"));
        assert_eq!(
            result.diagnostics,
            vec!["You need a return statement".to_string()]
        );
    }

    #[test]
    fn chain_to_a_failed_rule_never_fires_its_message() {
        let rules = RuleSet::new()
            .rule("base", "base failed", |_| false)
            .chained("dependent", "base", "dependent failed", |_| false);
        let result = rules.evaluate(&facts("let x = 1"));
        assert_eq!(result.diagnostics, vec!["base failed".to_string()]);
        assert_eq!(result.status_of("dependent"), Some(RuleStatus::Skipped));
    }

    #[test]
    fn chain_to_a_skipped_rule_is_also_skipped() {
        let rules = RuleSet::new()
            .rule("a", "a failed", |_| false)
            .chained("b", "a", "b failed", |_| true)
            .chained("c", "b", "c failed", |_| false);
        let result = rules.evaluate(&facts("let x = 1"));
        assert_eq!(result.status_of("b"), Some(RuleStatus::Skipped));
        assert_eq!(result.status_of("c"), Some(RuleStatus::Skipped));
        assert_eq!(result.diagnostics, vec!["a failed".to_string()]);
    }
}
