//! CLI argument definitions for vaultrc.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vaultrc - inspect and validate the Vault CLI client configuration.
#[derive(Parser, Debug)]
#[command(name = "vaultrc")]
#[command(author, version, about = "Inspect and validate the Vault CLI client configuration", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Configuration file to use instead of $VAULT_CLIENT_CONFIG_PATH or ~/.vaultrc.
    /// The path is used literally (no ~ expansion).
    #[arg(short = 'c', long = "config", global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve and print the client configuration
    Show,

    /// Print which configuration file would be read, and why
    Path,

    /// Parse and validate a configuration file
    ///
    /// Fails if the file is missing, has a syntax error, or contains
    /// keys other than `token_helper`.
    Check {
        /// File to check
        file: PathBuf,
    },
}
