//! Common test utilities for chkconfig integration tests.
//!
//! Provides `TestEnv` for isolated flag directories that never touch the
//! built-in state and default directories.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
pub use tempfile::TempDir;

/// A test environment with isolated state and default directories.
///
/// The `chkconfig()` method returns a `Command` pointed at both directories
/// through the environment, so tests stay parallel-safe.
pub struct TestEnv {
    pub state_dir: TempDir,
    pub default_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with empty directories.
    pub fn new() -> Self {
        Self {
            state_dir: TempDir::new().unwrap(),
            default_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the chkconfig binary using this environment's directories.
    pub fn chkconfig(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_chkconfig"));
        cmd.env("CHKCONFIG_STATE_DIRECTORY", self.state_path());
        cmd.env("CHKCONFIG_DEFAULT_DIRECTORY", self.default_path());
        cmd.env_remove("CHKCONFIG_LOG");
        cmd
    }

    /// Get the path to the state directory.
    pub fn state_path(&self) -> &Path {
        self.state_dir.path()
    }

    /// Get the path to the default directory.
    pub fn default_path(&self) -> &Path {
        self.default_dir.path()
    }

    /// Write a backing file into the state directory.
    pub fn write_state(&self, flag: &str, content: &str) {
        fs::write(self.state_path().join(flag), content).expect("Failed to write state flag");
    }

    /// Write a backing file into the default directory.
    pub fn write_default(&self, flag: &str, content: &str) {
        fs::write(self.default_path().join(flag), content).expect("Failed to write default flag");
    }

    /// Read a backing file from the state directory.
    pub fn read_state(&self, flag: &str) -> String {
        fs::read_to_string(self.state_path().join(flag)).expect("Failed to read state flag")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
