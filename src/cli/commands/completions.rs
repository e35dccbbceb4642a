use std::io;

use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs};

/// Print a completion script for the requested shell to stdout.
pub fn execute(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "shelf", &mut io::stdout());
}
