//! Verification orchestrator.
//!
//! Ties the pipeline together: load the submission, evaluate the
//! exercise's structural rules, then run its probes and check each
//! expectation. Learner mistakes come back inside the report; authoring
//! bugs in exercise content come back as `Err(HarnessError)` so tooling
//! can alert maintainers instead of blaming the learner.

use serde::Serialize;

use crate::analysis::FactTable;
use crate::diagnostics::{error_codes, Diagnostic};
use crate::exercise::Exercise;
use crate::interpreter::format_value;
use crate::loader::{load, LoadError};
use crate::probe::{HarnessError, ProbeResult, ProbeRunner, ProbeValue};

/// One probe's captured result plus its expectation verdict
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub result: ProbeResult,
    pub passed: bool,
}

/// Everything a caller learns from one verification run
#[derive(Debug, Clone)]
pub struct VerificationReport {
    /// Load failures and structural findings, in order
    pub diagnostics: Vec<Diagnostic>,
    /// Per-probe results, empty when probes did not run
    pub probes: Vec<ProbeOutcome>,
    /// False when loading failed or structural rules gated probes off
    pub probes_run: bool,
    /// True iff there are no diagnostics and every probe met its
    /// expectation
    pub passed: bool,
}

impl VerificationReport {
    fn load_failure(error: LoadError) -> Self {
        Self {
            diagnostics: error.into_diagnostics(),
            probes: Vec::new(),
            probes_run: false,
            passed: false,
        }
    }

    /// Human-readable summary, one line per finding and probe
    pub fn summary(&self, source: &str) -> String {
        let mut out = String::new();
        for diag in &self.diagnostics {
            out.push_str(&diag.to_human_readable(source));
            out.push('\n');
        }
        if !self.probes_run {
            out.push_str("checks: not run\n");
        }
        for outcome in &self.probes {
            let verdict = if outcome.passed { "ok" } else { "FAILED" };
            out.push_str(&format!("check {}: {}\n", outcome.result.name, verdict));
            if let ProbeValue::Raised(message) = &outcome.result.outcome {
                out.push_str(&format!("  raised: {}\n", message));
            }
        }
        out.push_str(if self.passed {
            "result: PASS\n"
        } else {
            "result: FAIL\n"
        });
        out
    }

    /// Machine-readable report for the `--json` flag
    pub fn to_json(&self) -> String {
        let probes: Vec<JsonProbe> = self
            .probes
            .iter()
            .map(|outcome| JsonProbe {
                name: outcome.result.name.clone(),
                passed: outcome.passed,
                stdout: outcome.result.stdout.clone(),
                stderr: outcome.result.stderr.clone(),
                prompts: outcome.result.prompts.clone(),
                outcome: match &outcome.result.outcome {
                    ProbeValue::Returned(value) => JsonOutcome::Returned {
                        value: format_value(value),
                    },
                    ProbeValue::Raised(message) => JsonOutcome::Raised {
                        message: message.clone(),
                    },
                },
            })
            .collect();
        let report = JsonReport {
            passed: self.passed,
            probes_run: self.probes_run,
            diagnostics: &self.diagnostics,
            probes,
        };
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    passed: bool,
    probes_run: bool,
    diagnostics: &'a [Diagnostic],
    probes: Vec<JsonProbe>,
}

#[derive(Serialize)]
struct JsonProbe {
    name: String,
    passed: bool,
    stdout: String,
    stderr: String,
    prompts: String,
    outcome: JsonOutcome,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum JsonOutcome {
    Returned { value: String },
    Raised { message: String },
}

/// Verify one submission against one exercise.
///
/// Learner-visible failures land in the report; `Err` means the exercise
/// content itself is broken.
pub fn verify(source: &str, exercise: &Exercise) -> Result<VerificationReport, HarnessError> {
    let submission = match load(source, &exercise.name) {
        Ok(submission) => submission,
        Err(error) => return Ok(VerificationReport::load_failure(error)),
    };

    let facts = FactTable::from_program(&submission.program);
    let analysis = exercise.rules.evaluate(&facts);
    let diagnostics: Vec<Diagnostic> = analysis
        .diagnostics
        .iter()
        .map(|message| {
            Diagnostic::error(error_codes::analysis::RULE_FAILED)
                .message(message.clone())
                .build()
        })
        .collect();

    if exercise.require_structural_pass && !analysis.passed() {
        return Ok(VerificationReport {
            diagnostics,
            probes: Vec::new(),
            probes_run: false,
            passed: false,
        });
    }

    let runner = ProbeRunner::new(&submission);
    let mut probes = Vec::with_capacity(exercise.probes.len());
    for spec in &exercise.probes {
        let result = runner.run(&spec.probe, &spec.input)?;
        let passed = spec.expectation.check(&result);
        probes.push(ProbeOutcome { result, passed });
    }

    let passed = diagnostics.is_empty() && probes.iter().all(|p| p.passed);
    Ok(VerificationReport {
        diagnostics,
        probes,
        probes_run: true,
        passed,
    })
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
