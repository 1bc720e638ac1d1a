//! Option storage and the typed option setter.

use std::path::{Path, PathBuf};

/// Built-in read-write flag state directory, fixed at build time.
pub const BUILTIN_STATE_DIRECTORY: &str = env!("CHKCONFIG_STATEDIR");

/// Built-in read-only fallback default directory, fixed at build time.
pub const BUILTIN_DEFAULT_DIRECTORY: &str = env!("CHKCONFIG_DEFAULTDIR");

/// Environment variable name for the state directory override.
pub const STATE_DIRECTORY_ENV: &str = "CHKCONFIG_STATE_DIRECTORY";

/// Environment variable name for the default directory override.
pub const DEFAULT_DIRECTORY_ENV: &str = "CHKCONFIG_DEFAULT_DIRECTORY";

/// A single option assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Read-write flag state directory
    StateDirectory(PathBuf),
    /// Read-only fallback default directory
    DefaultDirectory(PathBuf),
    /// Create backing files that do not exist yet when setting a flag
    ForceState(bool),
    /// Fall back to the default directory for flags missing from the state directory
    UseDefaultDirectory(bool),
}

/// Runtime options consumed by a [`Context`](crate::Context).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    state_directory: PathBuf,
    default_directory: Option<PathBuf>,
    force_state: bool,
    use_default_directory: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            state_directory: PathBuf::from(BUILTIN_STATE_DIRECTORY),
            default_directory: Some(PathBuf::from(BUILTIN_DEFAULT_DIRECTORY)),
            force_state: false,
            use_default_directory: false,
        }
    }
}

impl Options {
    /// Create options holding the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one option, replacing its previous value.
    pub fn set(&mut self, value: OptionValue) {
        tracing::debug!(?value, "setting option");

        match value {
            OptionValue::StateDirectory(path) => self.state_directory = path,
            OptionValue::DefaultDirectory(path) => {
                self.default_directory = (!path.as_os_str().is_empty()).then_some(path)
            }
            OptionValue::ForceState(force) => self.force_state = force,
            OptionValue::UseDefaultDirectory(use_default) => {
                self.use_default_directory = use_default
            }
        }
    }

    /// Builder form of [`Options::set`].
    pub fn with(mut self, value: OptionValue) -> Self {
        self.set(value);
        self
    }

    /// The read-write flag state directory.
    pub fn state_directory(&self) -> &Path {
        &self.state_directory
    }

    /// The read-only fallback directory, if one is configured.
    pub fn default_directory(&self) -> Option<&Path> {
        self.default_directory.as_deref()
    }

    /// Whether setting a flag may create its backing file.
    pub fn force_state(&self) -> bool {
        self.force_state
    }

    /// Whether the fallback directory was requested.
    pub fn use_default_directory(&self) -> bool {
        self.use_default_directory
    }

    /// The fallback directory, only when it is both requested and configured.
    pub fn fallback_directory(&self) -> Option<&Path> {
        if self.use_default_directory {
            self.default_directory()
        } else {
            None
        }
    }
}
