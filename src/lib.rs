//! Tutorkit - a verification engine for tutorial submissions
//!
//! Learner programs written in a small teaching language are loaded
//! once, analysed structurally, and exercised by instructor-authored
//! probes whose console traffic is captured and checked.

pub mod analysis;
pub mod cli;
pub mod diagnostics;
pub mod exercise;
pub mod interpreter;
pub mod loader;
pub mod parser;
pub mod probe;
pub mod verify;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analysis::{FactTable, RuleSet};
    pub use crate::diagnostics::{Diagnostic, Severity, Span};
    pub use crate::exercise::{Exercise, Expectation};
    pub use crate::interpreter::Value;
    pub use crate::loader::{load, Submission};
    pub use crate::probe::{Probe, ProbeResult, ProbeRunner};
    pub use crate::verify::{verify, VerificationReport};
}
