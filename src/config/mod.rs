//! Client configuration for the Vault CLI.
//!
//! ## ~/.vaultrc
//!
//! A single, optional file telling the CLI which external program manages
//! the authentication token:
//!
//! ```text
//! token_helper = "/usr/local/bin/vault-token-helper"
//! ```
//!
//! The file may also be plain JSON. Any top-level key other than
//! `token_helper` is rejected, with every offending key and its line listed
//! in one error.
//!
//! ## Precedence
//!
//! Explicit path > `VAULT_CLIENT_CONFIG_PATH` > `~/.vaultrc`. A missing file
//! means the default configuration.
//!
//! Use [`ConfigResolver`] for one-off loads and [`CachedClientConfig`] for
//! the process-wide current configuration.

pub mod cache;
pub mod resolver;
pub mod schema;
pub mod validation;

pub use cache::{CachedClientConfig, ConfigOrigin};
pub use resolver::{
    CLIENT_CONFIG_PATH_ENV, ConfigResolver, DEFAULT_CLIENT_CONFIG_PATH, LoadedConfig, PathSource,
    ResolvedPath,
};
pub use schema::{ClientConfig, parse_client_config};
pub use validation::{InvalidKey, check_keys};
