//! Runtime error types for the tutor-language interpreter.

use std::fmt;

use super::value::Value;

/// Runtime error with error code and message.
///
/// Control flow (return, break, continue) also travels through this type
/// so that statement evaluation can unwind through nested blocks.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    /// Error code (E4xxx series for runtime errors)
    pub code: &'static str,
    /// Human-readable error message
    pub message: String,
    /// Return value carried by a return signal
    pub return_value: Option<Box<Value>>,
    /// Loop break signal
    pub is_break: bool,
    /// Loop continue signal
    pub is_continue: bool,
    /// Function return signal
    pub is_return: bool,
    /// Source location where the error occurred
    pub span: Option<crate::diagnostics::Span>,
}

impl RuntimeError {
    /// Create a new runtime error
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            return_value: None,
            is_break: false,
            is_continue: false,
            is_return: false,
            span: None,
        }
    }

    /// Attach a source location
    pub fn with_span(mut self, span: crate::diagnostics::Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Create a break signal
    pub fn loop_break() -> Self {
        Self {
            code: "BREAK",
            message: String::new(),
            return_value: None,
            is_break: true,
            is_continue: false,
            is_return: false,
            span: None,
        }
    }

    /// Create a continue signal
    pub fn loop_continue() -> Self {
        Self {
            code: "CONTINUE",
            message: String::new(),
            return_value: None,
            is_break: false,
            is_continue: true,
            is_return: false,
            span: None,
        }
    }

    /// Create a function return signal
    pub fn function_return(value: Value) -> Self {
        Self {
            code: "RETURN",
            message: String::new(),
            return_value: Some(Box::new(value)),
            is_break: false,
            is_continue: false,
            is_return: true,
            span: None,
        }
    }

    /// Check if this is a control flow signal (break/continue/return)
    pub fn is_control_flow(&self) -> bool {
        self.is_break || self.is_continue || self.is_return
    }

    /// Get the carried return value
    pub fn get_return_value(self) -> Option<Value> {
        self.return_value.map(|v| *v)
    }

    /// Undefined variable error
    pub fn undefined_variable(name: &str) -> Self {
        Self::new(
            crate::diagnostics::runtime::UNDEFINED_VARIABLE,
            format!("undefined variable: {}", name),
        )
    }

    /// Type mismatch error
    pub fn type_mismatch(expected: &str, got: &str) -> Self {
        Self::new(
            crate::diagnostics::runtime::TYPE_MISMATCH,
            format!("type mismatch: expected {}, got {}", expected, got),
        )
    }

    /// Division by zero error
    pub fn division_by_zero() -> Self {
        Self::new(
            crate::diagnostics::runtime::DIVISION_BY_ZERO,
            "division by zero",
        )
    }

    /// Not callable error
    pub fn not_callable(got: &str) -> Self {
        Self::new(
            crate::diagnostics::runtime::NOT_CALLABLE,
            format!("value of type {} is not callable", got),
        )
    }

    /// Arity mismatch error
    pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> Self {
        Self::new(
            crate::diagnostics::runtime::ARITY_MISMATCH,
            format!("{}() expects {} arguments, got {}", name, expected, got),
        )
    }

    /// Unknown function error
    pub fn unknown_function(name: &str) -> Self {
        Self::new(
            crate::diagnostics::runtime::UNKNOWN_FUNCTION,
            format!("unknown function: {}", name),
        )
    }

    /// Standard input was exhausted by a call to `input`
    pub fn end_of_input() -> Self {
        Self::new(
            crate::diagnostics::runtime::END_OF_INPUT,
            "input(): no more input available",
        )
    }

    /// Return statement outside any function
    pub fn return_outside_function() -> Self {
        Self::new(
            crate::diagnostics::runtime::RETURN_OUTSIDE_FUNCTION,
            "return outside of a function",
        )
    }

    /// Break or continue outside any loop
    pub fn break_outside_loop() -> Self {
        Self::new(
            crate::diagnostics::runtime::BREAK_OUTSIDE_LOOP,
            "break or continue outside of a loop",
        )
    }

    /// List index out of bounds
    pub fn index_out_of_bounds(index: i64, len: usize) -> Self {
        Self::new(
            crate::diagnostics::runtime::INDEX_OUT_OF_BOUNDS,
            format!("index {} out of bounds for length {}", index, len),
        )
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(span) = &self.span {
            write!(
                f,
                "[{}] {} (line {}:{})",
                self.code, self.message, span.start_line, span.start_col
            )
        } else {
            write!(f, "[{}] {}", self.code, self.message)
        }
    }
}

impl std::error::Error for RuntimeError {}

/// Check that `args` has exactly `expected` elements, returning an arity
/// error if not.
pub fn check_arity<T>(name: &str, args: &[T], expected: usize) -> Result<(), RuntimeError> {
    if args.len() != expected {
        Err(RuntimeError::arity_mismatch(name, expected, args.len()))
    } else {
        Ok(())
    }
}
