//! chkconfig - A library for managing on/off configuration flags.
//!
//! Every flag is a small backing file named after the flag whose content is
//! `on` or `off`. Flags live in a read-write state directory and, optionally,
//! a read-only default directory consulted as a fallback. This library
//! provides the resolution and listing logic behind the `chkconfig` CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod models;
pub mod storage;

pub use config::{OptionValue, Options};
pub use context::Context;
pub use models::{
    FlagStateTuple, Origin, compare_by_flag, compare_by_state, flag_state_tuples, state_from_str,
    state_to_str,
};


/// Library-level error type for chkconfig operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No such flag file: {}", .0.display())]
    NoSuchEntry(std::path::PathBuf),

    #[error("Overflow: {0}")]
    Overflow(String),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<std::path::PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error only signals an absent backing file.
    pub fn is_no_such_entry(&self) -> bool {
        matches!(self, Error::NoSuchEntry(_))
    }
}

/// Result type alias for chkconfig operations.
pub type Result<T> = std::result::Result<T, Error>;
