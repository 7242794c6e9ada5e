//! Dynamic probe execution.
//!
//! A probe is instructor-authored source defining one zero-argument
//! function. The runner executes it against a clone of the submission's
//! bindings with capture buffers installed for exactly the duration of
//! the call, so probes observe the submission but never each other.
//!
//! Probes carry no timeout: a probe that loops forever blocks the run.
//! Exercise content is trusted instructor code, so a watchdog has not
//! been worth its cost yet.

use std::rc::Rc;

use thiserror::Error;

use crate::diagnostics::error_codes::harness;
use crate::interpreter::{CaptureConsole, Console, Environment, Interpreter, Value};
use crate::loader::Submission;
use crate::parser::parse_source;

/// Instructor-authored probe: source text defining `fn <name>() { ... }`
#[derive(Debug, Clone)]
pub struct Probe {
    /// Name of the function the source must define
    pub name: String,
    /// Probe source text
    pub source: String,
}

impl Probe {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// What the probe call produced. A probe that raises is data, not a
/// harness failure; sibling probes still run.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeValue {
    /// The probe returned normally
    Returned(Value),
    /// The probe raised a runtime error (message text)
    Raised(String),
}

impl ProbeValue {
    pub fn raised(&self) -> bool {
        matches!(self, ProbeValue::Raised(_))
    }
}

/// Captured result of one probe run
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// Probe name
    pub name: String,
    /// Everything the probe wrote to stdout
    pub stdout: String,
    /// Everything the probe wrote to stderr
    pub stderr: String,
    /// Concatenated `input()` prompts, in order
    pub prompts: String,
    /// Return value or raised error
    pub outcome: ProbeValue,
}

/// Authoring bugs in exercise content. These abort the run and are meant
/// for maintainers, never for learner feedback.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("probe '{name}' failed to parse:\n{details}")]
    ProbeParseFailed { name: String, details: String },

    #[error("probe '{name}' failed while being injected: {error}")]
    ProbeInjectFailed { name: String, error: String },

    #[error("probe source for '{name}' does not define a function named '{name}'")]
    ProbeNotCallable { name: String },

    #[error("probe '{name}' must take no arguments, but takes {count}")]
    ProbeTakesArguments { name: String, count: usize },

    #[error("unknown exercise '{0}'")]
    UnknownExercise(String),
}

impl HarnessError {
    /// Stable error code for reports and logs
    pub fn code(&self) -> &'static str {
        match self {
            HarnessError::ProbeParseFailed { .. } => harness::PROBE_PARSE_FAILED,
            HarnessError::ProbeInjectFailed { .. } => harness::PROBE_INJECT_FAILED,
            HarnessError::ProbeNotCallable { .. } => harness::PROBE_NOT_CALLABLE,
            HarnessError::ProbeTakesArguments { .. } => harness::PROBE_TAKES_ARGUMENTS,
            HarnessError::UnknownExercise(_) => harness::UNKNOWN_EXERCISE,
        }
    }
}

/// Runs probes against a submission's frozen bindings
pub struct ProbeRunner<'a> {
    baseline: &'a Environment,
}

impl<'a> ProbeRunner<'a> {
    /// Runner over a loaded submission
    pub fn new(submission: &'a Submission) -> Self {
        Self {
            baseline: &submission.bindings,
        }
    }

    /// Runner over bare bindings (used by tests and tooling)
    pub fn with_bindings(baseline: &'a Environment) -> Self {
        Self { baseline }
    }

    /// Execute one probe with the given stdin text and capture its streams.
    ///
    /// The baseline bindings are cloned per run, so probes cannot observe
    /// each other and the same probe always sees the same starting state.
    pub fn run(&self, probe: &Probe, input_text: &str) -> Result<ProbeResult, HarnessError> {
        let program =
            parse_source(&probe.source, &probe.name).map_err(|bag| HarnessError::ProbeParseFailed {
                name: probe.name.clone(),
                details: bag.format_text(&probe.source),
            })?;

        // Injection window: the probe's top-level statements run with a
        // throwaway console, so nothing they print lands in the capture
        let mut interp = Interpreter::with_env(
            self.baseline.clone(),
            Rc::new(CaptureConsole::new("")),
        );
        interp
            .run_program(&program)
            .map_err(|error| HarnessError::ProbeInjectFailed {
                name: probe.name.clone(),
                error: error.to_string(),
            })?;

        let callee = match interp.env.lookup(&probe.name).cloned() {
            Some(value @ Value::Function { .. }) => value,
            _ => {
                return Err(HarnessError::ProbeNotCallable {
                    name: probe.name.clone(),
                })
            }
        };
        if let Value::Function { ref params, .. } = callee {
            if !params.is_empty() {
                return Err(HarnessError::ProbeTakesArguments {
                    name: probe.name.clone(),
                    count: params.len(),
                });
            }
        }

        // Capture window: exactly the probe call
        let capture = Rc::new(CaptureConsole::new(input_text));
        interp.set_console(capture.clone());
        let outcome = match interp.call_function(callee, Vec::new()) {
            Ok(value) => ProbeValue::Returned(value),
            Err(error) => {
                // a raise lands on the probe's stderr channel as well,
                // the way a traceback would; Display carries the code
                let text = error.to_string();
                capture.write_err(&text);
                capture.write_err("\n");
                ProbeValue::Raised(text)
            }
        };

        Ok(ProbeResult {
            name: probe.name.clone(),
            stdout: capture.stdout(),
            stderr: capture.stderr(),
            prompts: capture.prompts(),
            outcome,
        })
    }
}
