//! vaultrc - client configuration loading for the Vault CLI.
//!
//! This library locates, parses and validates the user's `~/.vaultrc`,
//! which tells the CLI which external token helper to use. See the
//! [`config`] module for the resolution rules and [`syntax`] for the
//! accepted file format.

pub mod cli;
pub mod commands;
pub mod config;
pub mod syntax;

use std::path::PathBuf;

pub use config::validation::InvalidKey;


/// Library-level error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot expand '{}': home directory could not be determined", path.display())]
    HomeDirectory { path: PathBuf },

    #[error("error reading client config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("{}", config::validation::format_invalid_keys(.0))]
    InvalidKeys(Vec<InvalidKey>),

    #[error("invalid value in client configuration: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias for vaultrc operations.
pub type Result<T> = std::result::Result<T, Error>;
