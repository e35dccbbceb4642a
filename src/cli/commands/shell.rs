//! Interactive session.
//!
//! Loads the catalog once, then reads one command per line from stdin.
//! Each line is split with shell quoting rules and parsed with the same
//! clap definitions as the one-shot CLI, so `add "The Hobbit" Tolkien`
//! works in both. Rejected commands print an error and the loop goes on;
//! a failed save ends the session.

use std::io::{self, BufRead, IsTerminal, Write};

use clap::Parser;

use crate::cli::{Commands, run_command};
use crate::config::CatalogContext;
use crate::error::Result;

/// What the loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellStep {
    Continue,
    Quit,
}

/// One line of shell input.
#[derive(Parser, Debug)]
#[command(name = "shelf", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Commands,
}

/// Execute the shell command.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or the catalog cannot be saved.
pub fn execute(ctx: &mut CatalogContext, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        println!(
            "shelf: {} book(s) loaded. Type 'help' for commands, 'quit' to leave.",
            ctx.catalog.len()
        );
    }

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("shelf> ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        if run_line(&line?, ctx, json)? == ShellStep::Quit {
            break;
        }
    }

    ctx.flush()?;
    if interactive {
        println!("Bye.");
    }
    Ok(())
}

/// Run a single line of shell input.
///
/// # Errors
///
/// Returns fatal errors only (including a failed write of clap's usage
/// message); parse errors and rejections are printed.
pub fn run_line(line: &str, ctx: &mut CatalogContext, json: bool) -> Result<ShellStep> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(ShellStep::Continue);
    }
    if matches!(trimmed, "quit" | "exit") {
        return Ok(ShellStep::Quit);
    }

    let words = match shell_words::split(trimmed) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(ShellStep::Continue);
        }
    };

    let parsed = match ShellLine::try_parse_from(&words) {
        Ok(parsed) => parsed,
        Err(e) => {
            // Help and usage errors alike; clap picks the stream.
            e.print()?;
            return Ok(ShellStep::Continue);
        }
    };

    match parsed.command {
        Commands::Version => println!("shelf {}", env!("CARGO_PKG_VERSION")),
        command if !command.uses_catalog() => {
            eprintln!("Error: '{}' is not available inside the shell", command.name());
        }
        command => {
            run_command(&command, ctx, json)?;
        }
    }
    Ok(ShellStep::Continue)
}
