//! Command-line interface for the tutorkit engine
//!
//! Provides commands: verify, run, exercises

mod run_cmd;
mod verify_cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tutorkit - tutorial submission verification
#[derive(Parser, Debug)]
#[command(name = "tutorkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output reports as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a submission against an exercise
    Verify {
        /// Exercise name (see `tutorkit exercises`)
        exercise: String,

        /// Submission file
        file: PathBuf,
    },

    /// Run a submission on the real console
    Run {
        /// File to run
        file: PathBuf,
    },

    /// List the built-in exercises
    Exercises,
}

/// Dispatch a parsed command line. `Ok(false)` means the command ran but
/// the submission did not pass.
pub fn execute(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    match cli.command {
        Command::Verify { exercise, file } => {
            verify_cmd::run_verify(&exercise, &file, cli.json)
        }
        Command::Run { file } => run_cmd::run_program(&file).map(|()| true),
        Command::Exercises => {
            for name in crate::exercise::names() {
                println!("{}", name);
            }
            Ok(true)
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
