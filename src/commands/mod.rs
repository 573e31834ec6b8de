//! Command implementations for the vaultrc CLI.
//!
//! - `show` - Resolve the configuration and print it
//! - `path` - Report which file would be read
//! - `check` - Validate a specific file

use crate::config::{CachedClientConfig, ClientConfig, ConfigResolver, LoadedConfig, ResolvedPath};
use crate::{Error, Result};
use serde::Serialize;
use std::io;
use std::path::Path;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

const BUILTIN_STORE: &str = "(built-in token store)";

/// Result of `vaultrc show`.
#[derive(Debug, Serialize)]
pub struct ShowResult {
    pub path: String,
    pub source: String,
    pub found: bool,
    pub token_helper: Option<String>,
}

impl ShowResult {
    fn new(path: &ResolvedPath, found: bool, config: &ClientConfig) -> Self {
        Self {
            path: path.path.display().to_string(),
            source: path.source.to_string(),
            found,
            token_helper: config.token_helper().map(str::to_string),
        }
    }
}

impl From<&LoadedConfig> for ShowResult {
    fn from(loaded: &LoadedConfig) -> Self {
        Self::new(&loaded.path, loaded.found, &loaded.config)
    }
}

impl Output for ShowResult {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let helper = self.token_helper.as_deref().unwrap_or(BUILTIN_STORE);
        let found = if self.found { "" } else { ", not found" };
        format!(
            "token_helper: {}\nconfig file:  {} ({}{})",
            helper, self.path, self.source, found
        )
    }
}

/// Resolve the configuration.
///
/// Without an explicit path this goes through the process cache, so the
/// file is read at most once per process.
pub fn show(cache: &CachedClientConfig, explicit: Option<&Path>) -> Result<ShowResult> {
    let resolver = cache.resolver();
    if explicit.is_some_and(|p| !p.as_os_str().is_empty()) {
        let loaded = resolver.load(explicit)?;
        return Ok(ShowResult::from(&loaded));
    }

    let (config, origin) = cache.current_with_origin()?;
    Ok(ShowResult::new(&origin.path, origin.found, &config))
}

/// Result of `vaultrc path`.
#[derive(Debug, Serialize)]
pub struct PathResult {
    pub path: String,
    pub source: String,
    pub exists: bool,
}

impl Output for PathResult {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let exists = if self.exists { "" } else { ", not found" };
        format!("{} ({}{})", self.path, self.source, exists)
    }
}

/// Report which file would be read, without parsing it.
pub fn path(resolver: &ConfigResolver, explicit: Option<&Path>) -> Result<PathResult> {
    let resolved = resolver.config_path(explicit)?;
    Ok(PathResult {
        exists: resolved.path.exists(),
        path: resolved.path.display().to_string(),
        source: resolved.source.to_string(),
    })
}

/// Result of `vaultrc check`.
#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub path: String,
    pub valid: bool,
    pub token_helper: Option<String>,
}

impl Output for CheckResult {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let helper = self.token_helper.as_deref().unwrap_or(BUILTIN_STORE);
        format!("{}: valid (token_helper: {})", self.path, helper)
    }
}

/// Parse and validate `file`, which must exist.
pub fn check(resolver: &ConfigResolver, file: &Path) -> Result<CheckResult> {
    let loaded = resolver.load(Some(file))?;
    if !loaded.found {
        return Err(Error::ConfigRead {
            path: file.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "file does not exist"),
        });
    }
    Ok(CheckResult {
        path: file.display().to_string(),
        valid: true,
        token_helper: loaded.config.token_helper().map(str::to_string),
    })
}
