//! CLI module for the lumo source model builder.
//!
//! ## Commands
//!
//! - `check <file>` - Analyze a file and report diagnostics
//! - `outline <file>` - Print the declaration outline (`--json` for the full model)
//! - `tokens <file>` - Dump the token stream (debug)
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Lua source model builder for editor and indexing tooling
#[derive(Parser, Debug)]
#[command(name = "lumo")]
#[command(version = VERSION)]
#[command(about = "Lua source model builder for editor and indexing tooling", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to check (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a file and report diagnostics
    Check {
        /// Lua source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Module search path for require() resolution (repeatable)
        #[arg(long = "search-path", value_name = "DIR")]
        search_paths: Vec<PathBuf>,
    },

    /// Print the declaration outline
    Outline {
        /// Lua source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Emit the full source model as JSON
        #[arg(long)]
        json: bool,
        /// Module search path for require() resolution (repeatable)
        #[arg(long = "search-path", value_name = "DIR")]
        search_paths: Vec<PathBuf>,
    },

    /// Dump the token stream (debug)
    Tokens {
        /// Lua source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Some(Command::Check { file, search_paths }) => commands::check_file(&file, search_paths),
        Some(Command::Outline {
            file,
            json,
            search_paths,
        }) => commands::outline_file(&file, json, search_paths),
        Some(Command::Tokens { file }) => commands::dump_tokens(&file),
        None => {
            // Default: check the file if provided
            if let Some(file) = cli.file {
                commands::check_file(&file, Vec::new())
            } else {
                Err(CliError::failure("no input file (try `lumo --help`)"))
            }
        }
    }
}
