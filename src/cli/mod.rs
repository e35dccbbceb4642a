//! Command-line interface for `shelf`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::{self, CatalogContext, CliOverrides, CorruptPolicy};
use crate::error::ShelfError;
use crate::logging;

/// Exit status for a command the catalog refused (unknown key, duplicate, ...).
pub const EXIT_REJECTED: u8 = 2;

/// `shelf` - Library catalog manager.
#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(
    author,
    version,
    about = "Track a small library's books, loans and waitlists",
    long_about = None,
    after_help = "State lives in one JSON file (default .shelf/catalog.json)."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Catalog file to use instead of .shelf/catalog.json
    #[arg(long, global = true, env = config::DATA_ENV, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Config file to use instead of .shelf/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// What to do when the catalog file is corrupt
    #[arg(long, global = true, value_enum, value_name = "POLICY")]
    pub on_corrupt: Option<CorruptPolicy>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            data: self.data.clone(),
            config: self.config.clone(),
            on_corrupt: self.on_corrupt,
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a shelf workspace in the current directory
    Init(InitArgs),

    /// Add a book to the catalog
    Add(AddArgs),

    /// Borrow a book, or join its waitlist if it is out (alias: checkout)
    #[command(alias = "checkout")]
    Borrow(BorrowArgs),

    /// Return a book; the next person waiting gets it (alias: checkin)
    #[command(alias = "checkin")]
    Return(ReturnArgs),

    /// List books (alias: ls)
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one book with its waitlist
    Show(ShowArgs),

    /// Search by key, title or author (alias: find)
    #[command(alias = "find")]
    Search(SearchArgs),

    /// Change a book's title or author
    Edit(EditArgs),

    /// Remove a book that is not on loan (alias: rm)
    #[command(alias = "rm")]
    Remove(RemoveArgs),

    /// Write a human-readable catalog report
    Export(ExportArgs),

    /// Run commands interactively until `quit`
    Shell,

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Show version information
    Version,
}

#[derive(Args, Debug, Default, Clone)]
pub struct InitArgs {
    /// Rewrite config.yaml even if it exists (the catalog is never overwritten)
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug, Default, Clone)]
pub struct AddArgs {
    /// Book title (also the key unless --key is given)
    pub title: String,

    /// Book author
    pub author: String,

    /// Explicit catalog key (e.g. an ISBN)
    #[arg(long, short = 'k')]
    pub key: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct BorrowArgs {
    /// Book key
    pub key: String,

    /// Who is borrowing
    pub requester: String,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ReturnArgs {
    /// Book key
    pub key: String,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    /// Only books on the shelf
    #[arg(long, short = 'a', conflicts_with = "borrowed")]
    pub available: bool,

    /// Only books on loan
    #[arg(long, short = 'b')]
    pub borrowed: bool,

    /// Filter by author (substring, case-insensitive)
    #[arg(long)]
    pub author: Option<String>,

    /// Sort field: key, title or author (aliases: id, name)
    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,

    /// Reverse sort order
    #[arg(long, short = 'r')]
    pub reverse: bool,

    /// Maximum number of books to show
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ShowArgs {
    /// Book key
    pub key: String,
}

#[derive(Args, Debug, Default, Clone)]
pub struct SearchArgs {
    /// Text to look for
    pub term: String,
}

#[derive(Args, Debug, Default, Clone)]
pub struct EditArgs {
    /// Book key
    pub key: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New author
    #[arg(long)]
    pub author: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct RemoveArgs {
    /// Book key
    pub key: String,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ExportArgs {
    /// Output file
    #[arg(default_value = "catalog.txt")]
    pub path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// How a single catalog command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Done,
    Rejected,
}

impl CommandStatus {
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Done => ExitCode::SUCCESS,
            Self::Rejected => ExitCode::from(EXIT_REJECTED),
        }
    }
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error for fatal conditions: bad configuration, an unreadable
/// or corrupt catalog, or a catalog that cannot be saved.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let overrides = cli.overrides();
    let Some(command) = cli.command else {
        println!("shelf - library catalog manager. Use --help for usage.");
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Version => {
            print_version();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions(args) => {
            commands::completions::execute(&args);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init(args) => {
            commands::init::execute(&args, &overrides)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Shell => {
            let mut ctx = config::open_catalog_with_cli(&overrides)?;
            commands::shell::execute(&mut ctx, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        command => {
            let mut ctx = config::open_catalog_with_cli(&overrides)?;
            let status = run_command(&command, &mut ctx, cli.json)?;
            Ok(status.exit_code())
        }
    }
}

/// Execute one catalog command against `ctx`, then save if it changed state.
///
/// Rejections are reported on stderr and leave the catalog untouched.
///
/// # Errors
///
/// Returns fatal errors only (I/O, serialization, save failure).
pub fn run_command(
    command: &Commands,
    ctx: &mut CatalogContext,
    json: bool,
) -> crate::error::Result<CommandStatus> {
    let status = match dispatch(command, ctx, json) {
        Ok(()) => CommandStatus::Done,
        Err(err) if err.is_rejection() => {
            tracing::debug!(command = command.name(), "Command rejected: {err}");
            eprintln!("Error: {err}");
            CommandStatus::Rejected
        }
        Err(err) => return Err(err),
    };

    if ctx.flush()? {
        tracing::debug!("Saved catalog to {}", ctx.config.data_file.display());
    }
    Ok(status)
}

fn dispatch(command: &Commands, ctx: &mut CatalogContext, json: bool) -> crate::error::Result<()> {
    match command {
        Commands::Add(args) => commands::add::execute(args, ctx, json),
        Commands::Borrow(args) => commands::borrow::execute(args, ctx, json),
        Commands::Return(args) => commands::return_book::execute(args, ctx, json),
        Commands::List(args) => commands::list::execute(args, ctx, json),
        Commands::Show(args) => commands::show::execute(args, ctx, json),
        Commands::Search(args) => commands::search::execute(args, ctx, json),
        Commands::Edit(args) => commands::edit::execute(args, ctx, json),
        Commands::Remove(args) => commands::remove::execute(args, ctx, json),
        Commands::Export(args) => commands::export::execute(args, ctx, json),
        Commands::Init(_) | Commands::Shell | Commands::Completions(_) | Commands::Version => {
            Err(ShelfError::validation(
                "command",
                format!("'{}' does not operate on an open catalog", command.name()),
            ))
        }
    }
}

fn print_version() {
    println!("shelf {}", env!("CARGO_PKG_VERSION"));
}

impl Commands {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::Add(_) => "add",
            Self::Borrow(_) => "borrow",
            Self::Return(_) => "return",
            Self::List(_) => "list",
            Self::Show(_) => "show",
            Self::Search(_) => "search",
            Self::Edit(_) => "edit",
            Self::Remove(_) => "remove",
            Self::Export(_) => "export",
            Self::Shell => "shell",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }

    /// True for commands that open the catalog.
    #[must_use]
    pub const fn uses_catalog(&self) -> bool {
        !matches!(
            self,
            Self::Init(_) | Self::Shell | Self::Completions(_) | Self::Version
        )
    }
}
