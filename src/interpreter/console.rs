//! Console seam for the tutor-language interpreter.
//!
//! All standard-stream interaction goes through the `Console` trait, so the
//! probe harness can swap the real process streams for capture buffers for
//! exactly the duration of one probe call. `input` prompts are recorded on
//! their own channel, separate from stdout, so that diagnostics about
//! prompt text do not depend on output interleaving.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Write;

/// Console interface used by the interpreter for stdin/stdout/stderr
pub trait Console {
    /// Write to standard output (no newline added)
    fn write_out(&self, text: &str);
    /// Write to standard error (no newline added)
    fn write_err(&self, text: &str);
    /// Show a prompt and read one line of standard input, without the
    /// trailing newline; `None` at end of input
    fn read_line(&self, prompt: &str) -> Option<String>;
}

/// Console backed by the process's real standard streams
pub struct SystemConsole;

impl Console for SystemConsole {
    fn write_out(&self, text: &str) {
        print!("{}", text);
        let _ = std::io::stdout().flush();
    }

    fn write_err(&self, text: &str) {
        eprint!("{}", text);
    }

    fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        match std::io::stdin().read_line(&mut line) {
            Ok(0) => None, // EOF
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
            Err(_) => None,
        }
    }
}

/// Console that captures all output and answers input requests from
/// pre-supplied text. One instance backs exactly one execution window.
#[derive(Default)]
pub struct CaptureConsole {
    input: RefCell<VecDeque<String>>,
    stdout: RefCell<String>,
    stderr: RefCell<String>,
    prompts: RefCell<String>,
}

impl CaptureConsole {
    /// Create a capture console fed by `input_text` (one `input()` answer
    /// per line; empty text means input is immediately exhausted)
    pub fn new(input_text: &str) -> Self {
        Self {
            input: RefCell::new(input_text.lines().map(str::to_string).collect()),
            ..Default::default()
        }
    }

    /// Captured standard output so far
    pub fn stdout(&self) -> String {
        self.stdout.borrow().clone()
    }

    /// Captured standard error so far
    pub fn stderr(&self) -> String {
        self.stderr.borrow().clone()
    }

    /// Captured input prompts so far
    pub fn prompts(&self) -> String {
        self.prompts.borrow().clone()
    }
}

impl Console for CaptureConsole {
    fn write_out(&self, text: &str) {
        self.stdout.borrow_mut().push_str(text);
    }

    fn write_err(&self, text: &str) {
        self.stderr.borrow_mut().push_str(text);
    }

    fn read_line(&self, prompt: &str) -> Option<String> {
        self.prompts.borrow_mut().push_str(prompt);
        self.input.borrow_mut().pop_front()
    }
}
