//! Exercise content: structural rules plus probes with expectations.
//!
//! An exercise bundles everything needed to check one submission. The
//! built-in exercises double as executable documentation of the
//! authoring surface; a real deployment would load these from a content
//! database.

use crate::analysis::RuleSet;
use crate::interpreter::{values_equal, Value};
use crate::probe::{HarnessError, Probe, ProbeResult, ProbeValue};

/// What a probe's captured result must look like to pass
#[derive(Debug, Clone)]
pub enum Expectation {
    /// The probe returns a value equal to this one
    Returns(Value),
    /// The probe's captured stdout is exactly this text
    StdoutIs(String),
    /// The probe's captured stdout contains this text
    StdoutContains(String),
    /// The probe merely completes without raising
    DoesNotRaise,
}

impl Expectation {
    /// Whether the captured result satisfies this expectation.
    /// A raised probe satisfies nothing.
    pub fn check(&self, result: &ProbeResult) -> bool {
        match self {
            Expectation::Returns(expected) => match &result.outcome {
                ProbeValue::Returned(got) => values_equal(got, expected),
                ProbeValue::Raised(_) => false,
            },
            Expectation::StdoutIs(expected) => {
                !result.outcome.raised() && result.stdout == *expected
            }
            Expectation::StdoutContains(needle) => {
                !result.outcome.raised() && result.stdout.contains(needle.as_str())
            }
            Expectation::DoesNotRaise => !result.outcome.raised(),
        }
    }
}

/// One probe plus the stdin it runs with and what must hold afterwards
#[derive(Debug, Clone)]
pub struct ProbeSpec {
    pub probe: Probe,
    pub input: String,
    pub expectation: Expectation,
}

/// A complete checkable exercise
pub struct Exercise {
    /// Exercise name, as used on the command line
    pub name: String,
    /// Structural rules evaluated before any probe runs
    pub rules: RuleSet,
    /// Probes in declaration order
    pub probes: Vec<ProbeSpec>,
    /// When true, structural failures keep probes from running at all
    pub require_structural_pass: bool,
}

impl Exercise {
    pub fn builder(name: impl Into<String>) -> ExerciseBuilder {
        ExerciseBuilder {
            name: name.into(),
            rules: RuleSet::new(),
            probes: Vec::new(),
            require_structural_pass: true,
        }
    }
}

/// Builder for exercises
pub struct ExerciseBuilder {
    name: String,
    rules: RuleSet,
    probes: Vec<ProbeSpec>,
    require_structural_pass: bool,
}

impl ExerciseBuilder {
    /// Set the structural rule set
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Add a probe with its stdin text and expectation
    pub fn probe(
        mut self,
        probe: Probe,
        input: impl Into<String>,
        expectation: Expectation,
    ) -> Self {
        self.probes.push(ProbeSpec {
            probe,
            input: input.into(),
            expectation,
        });
        self
    }

    /// Let probes run even when structural rules fail
    pub fn probe_despite_structural_failures(mut self) -> Self {
        self.require_structural_pass = false;
        self
    }

    pub fn build(self) -> Exercise {
        Exercise {
            name: self.name,
            rules: self.rules,
            probes: self.probes,
            require_structural_pass: self.require_structural_pass,
        }
    }
}

/// The reference exercise: write `fn square(x)` returning `x * x`
pub fn square() -> Exercise {
    Exercise::builder("square")
        .rules(
            RuleSet::new()
                .rule(
                    "square-defined",
                    "You need to define the square function",
                    |t| t.function("square").defined,
                )
                .chained(
                    "square-one-arg",
                    "square-defined",
                    "square should accept exactly one argument",
                    |t| t.function("square").param_count() == 1,
                )
                .rule(
                    "square-has-return",
                    "You need a return statement",
                    |t| t.function("square").has_return,
                ),
        )
        .probe(
            Probe::new("check_square", "fn check_square() { return square(4) }"),
            "",
            Expectation::Returns(Value::Int(16)),
        )
        .build()
}

/// Interactive exercise: `fn greet()` reads a name and says hello
pub fn greet() -> Exercise {
    Exercise::builder("greet")
        .rules(
            RuleSet::new()
                .rule(
                    "greet-defined",
                    "You need to define the greet function",
                    |t| t.function("greet").defined,
                )
                .chained(
                    "greet-no-args",
                    "greet-defined",
                    "greet should take no arguments; read the name with input()",
                    |t| t.function("greet").param_count() == 0,
                ),
        )
        .probe(
            Probe::new("drive_greet", "fn drive_greet() { greet() }"),
            "World\n",
            Expectation::StdoutIs("Hello, World!\n".to_string()),
        )
        .probe(
            Probe::new("drive_greet", "fn drive_greet() { greet() }"),
            "Ada\n",
            Expectation::StdoutContains("Ada".to_string()),
        )
        .build()
}

/// Look up a built-in exercise by name
pub fn find(name: &str) -> Result<Exercise, HarnessError> {
    match name {
        "square" => Ok(square()),
        "greet" => Ok(greet()),
        _ => Err(HarnessError::UnknownExercise(name.to_string())),
    }
}

/// Names of all built-in exercises
pub fn names() -> &'static [&'static str] {
    &["square", "greet"]
}
