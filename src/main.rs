//! Tutorkit CLI - verification engine for tutorial submissions

use std::process::ExitCode;

use clap::Parser;

use tutorkit::cli::{execute, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(true) => ExitCode::SUCCESS,
        // the command ran, the submission did not pass
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
