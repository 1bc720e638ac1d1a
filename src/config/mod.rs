//! Runtime options for chkconfig.
//!
//! Options select the two flag directories and two behaviors:
//!
//! - `state-directory` - Read-write directory holding explicitly set flags
//! - `default-directory` - Read-only directory consulted as a fallback
//! - `force-state` - Create missing backing files when setting a flag
//! - `use-default-directory` - Enable the default directory fallback
//!
//! ## Precedence
//!
//! For directories: CLI flag > environment variable > built-in default
//!
//! The built-in directories are fixed at build time (see `build.rs`). The
//! CLI layer applies flags and environment variables on top of them.

pub mod options;

pub use options::{
    BUILTIN_DEFAULT_DIRECTORY, BUILTIN_STATE_DIRECTORY, DEFAULT_DIRECTORY_ENV, OptionValue,
    Options, STATE_DIRECTORY_ENV,
};
