//! Handler for the `tutorkit verify` subcommand.

use std::path::Path;

use crate::exercise;
use crate::verify::verify;

/// Verify one submission file against a named exercise.
/// Returns `Ok(passed)`; harness and I/O failures are `Err`.
pub(crate) fn run_verify(
    exercise_name: &str,
    file: &Path,
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let exercise = exercise::find(exercise_name)?;
    let source = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {:?}: {}", file, e))?;

    let report = verify(&source, &exercise)?;
    if json {
        println!("{}", report.to_json());
    } else {
        print!("{}", report.summary(&source));
    }
    Ok(report.passed)
}
