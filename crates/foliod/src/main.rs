//! Command line interface for the folio reading and planning library.
//!
//! This crate provides a CLI tool for managing a local library of books using the
//! `folio` library. It supports operations like:
//! - Configuration and library initialization
//! - Importing text, HTML and PDF files
//! - Listing books and their chapters
//! - Reading pages by number, chapter or branch
//! - Planning alternate story branches
//! - Showing the characters, places and events met while reading
//!
//! # Usage
//!
//! ```bash
//! # Create a configuration and library
//! folio init
//!
//! # Import every text file in a directory
//! folio import "novels/*.txt"
//!
//! # Show the chapters of a book
//! folio chapters pride-and-prejudice
//!
//! # Read the first page of a chapter
//! folio read pride-and-prejudice --chapter chapter-12
//!
//! # Show who and what has been met so far
//! folio knowledge pride-and-prejudice
//!
//! # Rewrite page 12
//! folio edit pride-and-prejudice --page 12 --content page-12.txt
//!
//! # Plan a branch diverging at page 40
//! folio branch pride-and-prejudice --name "Darcy stays" --at 40 --content darcy.txt
//! ```
//!
//! Page numbers on the command line start at 1. The CLI provides colored output and
//! interactive confirmations for destructive operations, and supports various verbosity
//! levels through the `-v` flag.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use folio::{
  config::Config,
  format,
  library::Library,
  prelude::*,
  session::{ReadingSession, Timeline},
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Read, plan and branch the books in your library")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. If not specified, uses the default
  /// platform-specific configuration directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

impl Cli {
  /// Path of the configuration file in use.
  pub fn config_path(&self) -> PathBuf { self.config.clone().unwrap_or_else(Config::default_path) }
}

/// Configures the logging system based on the verbosity level
///
/// # Arguments
///
/// * `verbosity` - Number of times the verbose flag was used
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// `RUST_LOG` takes precedence when set. Logs go to stderr so they never mix with
/// page output.
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Entry point for the folio CLI application
///
/// Handles command line argument parsing, sets up logging, loads the configuration and
/// executes the requested command.
///
/// # Errors
///
/// Returns [`FoliodError`] for various failure conditions including:
/// - Unknown books, chapters or branches
/// - Pages outside the book
/// - Files that cannot be read or imported
/// - User interaction errors
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let config_path = cli.config_path();
  match cli.command.clone() {
    Commands::Init(options) => init(&cli, &config_path, options).await,
    Commands::Import(args) => import(&cli, &config_path, args).await.map(|_| ()),
    Commands::List => list(&cli, &config_path).await,
    Commands::Chapters { book } => chapters(&cli, &config_path, &book).await,
    Commands::Read(args) => read(&cli, &config_path, args).await,
    Commands::Branch(args) => branch(&cli, &config_path, args).await,
    Commands::Knowledge { book } => knowledge(&cli, &config_path, &book).await,
    Commands::Edit(args) => edit(&cli, &config_path, args).await,
    Commands::Remove { book } => remove(&cli, &config_path, &book).await,
  }
}
