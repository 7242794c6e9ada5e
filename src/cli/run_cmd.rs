//! Handler for the `tutorkit run` subcommand.

use std::path::Path;
use std::rc::Rc;

use crate::interpreter::{Interpreter, SystemConsole};
use crate::parser::parse_source;

/// Run a tutor-language file against the real process streams.
pub(crate) fn run_program(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {:?}: {}", file, e))?;

    let program = parse_source(&source, &file.display().to_string())
        .map_err(|bag| format!("Parse error:\n{}", bag.format_text(&source)))?;

    let mut interpreter = Interpreter::new(Rc::new(SystemConsole));
    interpreter
        .run_program(&program)
        .map_err(|e| format!("Runtime error: {}", e))?;
    Ok(())
}
