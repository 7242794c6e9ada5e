//! Diagnostic reporting for the tutor-language toolchain
//!
//! Provides structured error reporting with stable error codes, source
//! spans, and machine-readable JSON output. Parse failures in learner and
//! probe code travel through this module before being rendered into
//! learner-facing text.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod error_codes;
pub use error_codes::*;

/// A source location span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Source file path (synthetic for submissions and probes)
    pub file: PathBuf,

    /// Start byte offset (0-indexed)
    pub start: usize,

    /// End byte offset (0-indexed, exclusive)
    pub end: usize,

    /// Start line (1-indexed)
    pub start_line: usize,

    /// Start column (1-indexed)
    pub start_col: usize,

    /// End line (1-indexed)
    pub end_line: usize,

    /// End column (1-indexed)
    pub end_col: usize,
}

impl Span {
    /// Create a new span
    pub fn new(
        file: PathBuf,
        start: usize,
        end: usize,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            file,
            start,
            end,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Create a span for an entire file
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: path.into(),
            start: 0,
            end: 0,
            start_line: 1,
            start_col: 1,
            end_line: 1,
            end_col: 1,
        }
    }

    /// Merge two spans into one that covers both
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            file: self.file.clone(),
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            start_line: self.start_line.min(other.start_line),
            start_col: if self.start_line <= other.start_line {
                self.start_col
            } else {
                other.start_col
            },
            end_line: self.end_line.max(other.end_line),
            end_col: if self.end_line >= other.end_line {
                self.end_col
            } else {
                other.end_col
            },
        }
    }
}

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A compiler diagnostic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable error code (e.g., "E0001")
    pub code: String,

    /// Severity level
    pub severity: Severity,

    /// Primary message
    pub message: String,

    /// Primary source span
    pub span: Span,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder {
            code: code.into(),
            severity: Severity::Error,
            message: String::new(),
            span: None,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder {
            code: code.into(),
            severity: Severity::Warning,
            message: String::new(),
            span: None,
        }
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Format as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format as human-readable string with source context
    pub fn to_human_readable(&self, source: &str) -> String {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };

        let mut output = format!(
            "{}[{}]: {}\n  --> line {}:{}\n",
            severity, self.code, self.message, self.span.start_line, self.span.start_col
        );

        // Show source context
        let lines: Vec<&str> = source.lines().collect();
        if self.span.start_line > 0 && self.span.start_line <= lines.len() {
            let line = lines[self.span.start_line - 1];
            output.push_str(&format!(
                "   |\n{:>3} | {}\n   |",
                self.span.start_line, line
            ));

            // Underline the error
            let underline_start = self.span.start_col.saturating_sub(1);
            let underline_len = if self.span.end_line == self.span.start_line {
                self.span.end_col.saturating_sub(self.span.start_col).max(1)
            } else {
                line.len().saturating_sub(underline_start)
            };

            output.push_str(&format!(
                " {}{}\n",
                " ".repeat(underline_start),
                "^".repeat(underline_len)
            ));
        }

        output
    }
}

/// Builder for constructing diagnostics
pub struct DiagnosticBuilder {
    code: String,
    severity: Severity,
    message: String,
    span: Option<Span>,
}

impl DiagnosticBuilder {
    /// Set the message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the primary span
    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Build the diagnostic
    pub fn build(self) -> Diagnostic {
        Diagnostic {
            code: self.code,
            severity: self.severity,
            message: self.message,
            span: self.span.unwrap_or_else(|| Span::file("")),
        }
    }
}

/// A collection of diagnostics
#[derive(Debug, Default, Clone)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    /// Create a new empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }

    /// Count errors
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Consume the bag, keeping its diagnostics
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Merge another bag into this one
    pub fn merge(&mut self, other: DiagnosticBag) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Get the number of diagnostics
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Check if the bag is empty
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Format all diagnostics as JSON
    pub fn to_json(&self) -> String {
        let json_array: Vec<String> = self.diagnostics.iter().map(|d| d.to_json()).collect();
        format!("[{}]", json_array.join(","))
    }

    /// Format all diagnostics as human-readable text
    pub fn format_text(&self, source: &str) -> String {
        self.diagnostics
            .iter()
            .map(|d| d.to_human_readable(source))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl From<Diagnostic> for DiagnosticBag {
    fn from(diagnostic: Diagnostic) -> Self {
        let mut bag = DiagnosticBag::new();
        bag.push(diagnostic);
        bag
    }
}
