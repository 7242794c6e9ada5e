//! Submission loading.
//!
//! A submission is parsed and then executed once so that its top-level
//! definitions land in an environment. That environment is the baseline
//! every probe later runs against; the probe harness clones it rather
//! than re-running the submission. Output produced during the initial
//! run is discarded, and any `input()` call during it fails immediately,
//! so submissions are expected to keep interactive work inside functions.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;

use crate::diagnostics::{error_codes, Diagnostic, DiagnosticBag};
use crate::interpreter::{CaptureConsole, Environment, Interpreter, RuntimeError};
use crate::parser::ast::Program;
use crate::parser::parse_source;

/// A parsed and initialized submission
#[derive(Debug)]
pub struct Submission {
    /// The source text as given
    pub source: String,
    /// The parse tree
    pub program: Program,
    /// Environment after the one-time initial run
    pub bindings: Environment,
}

/// Why a submission could not be loaded
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source did not parse
    #[error("submission failed to parse ({} error(s))", .0.error_count())]
    Parse(DiagnosticBag),
    /// The one-time initial run raised
    #[error("submission failed during its initial run: {0}")]
    Runtime(RuntimeError),
    /// The source file could not be read
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Flatten into learner-facing diagnostics
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        match self {
            LoadError::Parse(bag) => bag.into_diagnostics(),
            LoadError::Runtime(err) => {
                let mut builder = Diagnostic::error(error_codes::load::INITIAL_RUN_FAILED)
                    .message(format!("your program failed before checking began: {}", err));
                if let Some(span) = err.span.clone() {
                    builder = builder.span(span);
                }
                vec![builder.build()]
            }
            LoadError::Unreadable { path, source } => vec![Diagnostic::error(
                error_codes::load::UNREADABLE_FILE,
            )
            .message(format!("cannot read {}: {}", path.display(), source))
            .build()],
        }
    }
}

/// Parse a submission and run it once to collect its definitions
pub fn load(source: &str, name: &str) -> Result<Submission, LoadError> {
    let program = parse_source(source, name).map_err(LoadError::Parse)?;

    // Initial-run output is discarded; empty input makes any top-level
    // input() call fail rather than hang
    let console = Rc::new(CaptureConsole::new(""));
    let mut interp = Interpreter::new(console);
    interp.run_program(&program).map_err(LoadError::Runtime)?;

    Ok(Submission {
        source: source.to_string(),
        program,
        bindings: interp.into_env(),
    })
}

/// Load a submission from a file on disk
pub fn load_file(path: &Path) -> Result<Submission, LoadError> {
    let source = std::fs::read_to_string(path).map_err(|e| LoadError::Unreadable {
        path: path.to_path_buf(),
        source: e,
    })?;
    load(&source, &path.display().to_string())
}
