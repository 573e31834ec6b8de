//! Locating and loading the client configuration file.
//!
//! ## Path precedence (highest to lowest)
//!
//! 1. An explicit, non-empty path from the caller (used verbatim)
//! 2. `VAULT_CLIENT_CONFIG_PATH` environment variable, if set and non-empty
//! 3. `~/.vaultrc`
//!
//! Paths from 2 and 3 have a leading `~` expanded to the home directory.
//! A missing file is not an error: it resolves to the default configuration.

use crate::config::schema::{ClientConfig, parse_client_config};
use crate::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default location of the client configuration file.
pub const DEFAULT_CLIENT_CONFIG_PATH: &str = "~/.vaultrc";

/// Environment variable that overrides the configuration file location.
pub const CLIENT_CONFIG_PATH_ENV: &str = "VAULT_CLIENT_CONFIG_PATH";

/// Tracks where a configuration path came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSource {
    /// Path passed in by the caller
    Explicit,
    /// Path from an environment variable
    EnvVar(String),
    /// Built-in default path
    Default,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::Explicit => write!(f, "explicit"),
            PathSource::EnvVar(name) => write!(f, "env:{}", name),
            PathSource::Default => write!(f, "default"),
        }
    }
}

/// A configuration path with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Path after tilde expansion
    pub path: PathBuf,
    /// Where the path came from
    pub source: PathSource,
}

/// Outcome of loading the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub path: ResolvedPath,
    /// Whether a file existed at `path`
    pub found: bool,
    pub config: ClientConfig,
}

/// Resolves and loads the client configuration.
///
/// The environment override and home directory are captured when the
/// resolver is built, so tests can construct one with [`ConfigResolver::new`]
/// and the `with_*` builders instead of touching process state.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    env_path: Option<PathBuf>,
    home_dir: Option<PathBuf>,
}

impl ConfigResolver {
    /// Create a resolver with no environment override and no home directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver from the process environment.
    pub fn from_env() -> Self {
        Self {
            env_path: std::env::var_os(CLIENT_CONFIG_PATH_ENV).map(PathBuf::from),
            home_dir: dirs::home_dir(),
        }
    }

    /// Set the value seen for `VAULT_CLIENT_CONFIG_PATH`.
    pub fn with_env_path(mut self, path: Option<PathBuf>) -> Self {
        self.env_path = path;
        self
    }

    /// Set the home directory used for `~` expansion.
    pub fn with_home_dir(mut self, home: Option<PathBuf>) -> Self {
        self.home_dir = home;
        self
    }

    /// Determine which file to read without reading it.
    pub fn config_path(&self, explicit: Option<&Path>) -> Result<ResolvedPath> {
        if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
            return Ok(ResolvedPath {
                path: path.to_path_buf(),
                source: PathSource::Explicit,
            });
        }

        if let Some(path) = self.env_path.as_deref().filter(|p| !p.as_os_str().is_empty()) {
            return Ok(ResolvedPath {
                path: self.expand_tilde(path)?,
                source: PathSource::EnvVar(CLIENT_CONFIG_PATH_ENV.to_string()),
            });
        }

        Ok(ResolvedPath {
            path: self.expand_tilde(Path::new(DEFAULT_CLIENT_CONFIG_PATH))?,
            source: PathSource::Default,
        })
    }

    /// Load the configuration, reporting which file was used.
    pub fn load(&self, explicit: Option<&Path>) -> Result<LoadedConfig> {
        let path = self.config_path(explicit)?;
        tracing::debug!(path = %path.path.display(), source = %path.source, "resolved client config path");

        match read_config_file(&path.path)? {
            Some(contents) => {
                let config = parse_client_config(&contents)?;
                Ok(LoadedConfig {
                    path,
                    found: true,
                    config,
                })
            }
            None => {
                tracing::debug!(path = %path.path.display(), "no client config file; using defaults");
                Ok(LoadedConfig {
                    path,
                    found: false,
                    config: ClientConfig::default(),
                })
            }
        }
    }

    /// Load the configuration from `explicit`, the environment override or
    /// the default path, in that order.
    ///
    /// Parse and validation errors are returned as produced by the parser.
    pub fn resolve(&self, explicit: Option<&Path>) -> Result<ClientConfig> {
        self.load(explicit).map(|loaded| loaded.config)
    }

    /// Parse configuration text that the caller already holds.
    pub fn parse(contents: &str) -> Result<ClientConfig> {
        parse_client_config(contents)
    }

    /// Expand a leading `~` or `~/` to the home directory.
    ///
    /// `~user` forms are left untouched.
    fn expand_tilde(&self, path: &Path) -> Result<PathBuf> {
        let Some(path_str) = path.to_str() else {
            return Ok(path.to_path_buf());
        };

        let rest = if path_str == "~" {
            ""
        } else if let Some(rest) = strip_home_prefix(path_str) {
            rest
        } else {
            return Ok(path.to_path_buf());
        };

        let home = self.home_dir.as_ref().ok_or_else(|| Error::HomeDirectory {
            path: path.to_path_buf(),
        })?;

        if rest.is_empty() {
            Ok(home.clone())
        } else {
            Ok(home.join(rest))
        }
    }
}

/// Strip a leading `~/`.
#[cfg(not(windows))]
fn strip_home_prefix(path: &str) -> Option<&str> {
    path.strip_prefix("~/")
}

/// Strip a leading `~/` or `~\`.
#[cfg(windows)]
fn strip_home_prefix(path: &str) -> Option<&str> {
    path.strip_prefix("~/")
        .or_else(|| path.strip_prefix("~\\"))
}

/// Read the file at `path`; `Ok(None)` when it does not exist.
fn read_config_file(path: &Path) -> Result<Option<String>> {
    tracing::trace!(path = %path.display(), "reading client config");
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}
