//! `shelf` - Library catalog manager
//!
//! Tracks books, loans and waitlists for a small library in a single JSON
//! file. One command per run, or `shelf shell` for an interactive session.

use std::process::ExitCode;

use shelf::run;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
