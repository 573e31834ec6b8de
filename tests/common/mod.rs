//! Common test utilities for vaultrc integration tests.
//!
//! Provides `TestEnv` so tests never read the real `~/.vaultrc`.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// A test environment with an isolated home directory.
///
/// The `vaultrc()` method returns a `Command` with `HOME` pointed at the
/// temporary directory and `VAULT_CLIENT_CONFIG_PATH` cleared, per command,
/// so tests can run in parallel.
pub struct TestEnv {
    pub home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the vaultrc binary in this environment.
    pub fn vaultrc(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_vaultrc"));
        cmd.current_dir(self.home.path());
        cmd.env("HOME", self.home.path());
        cmd.env_remove("VAULT_CLIENT_CONFIG_PATH");
        cmd.env_remove("VAULTRC_LOG");
        cmd
    }

    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// Write a file relative to the home directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.home.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, contents).expect("Failed to write config file");
        path
    }

    /// Write `~/.vaultrc`.
    pub fn write_vaultrc(&self, contents: &str) -> PathBuf {
        self.write_file(".vaultrc", contents)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
