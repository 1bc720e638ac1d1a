//! CLI argument definitions for chkconfig.

use crate::config::{DEFAULT_DIRECTORY_ENV, STATE_DIRECTORY_ENV};
use crate::models::state_from_str;
use clap::Parser;
use std::path::PathBuf;

/// Version string including the commit the binary was built from.
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CHKCONFIG_GIT_COMMIT"),
    ")"
);

/// chkconfig - Check, get, set, and list configuration flags.
///
/// With no flag, list every flag. With a flag, print its state. With a
/// flag and a state, set it.
#[derive(Parser, Debug)]
#[command(name = "chkconfig")]
#[command(version = VERSION, about = "Check, get, set, and list on/off configuration flags", long_about = None)]
pub struct Cli {
    /// Work silently, even if an error occurs
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose operation and log output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Output in JSON format instead of a human-readable table
    #[arg(long)]
    pub json: bool,

    /// Use DIR as the read-only fallback default directory
    #[arg(long, value_name = "DIR", env = DEFAULT_DIRECTORY_ENV)]
    pub default_directory: Option<PathBuf>,

    /// Use DIR as the read-write flag state directory
    #[arg(long, value_name = "DIR", env = STATE_DIRECTORY_ENV)]
    pub state_directory: Option<PathBuf>,

    /// Include the default directory as a fallback
    #[arg(short = 'd', long)]
    pub use_default_directory: bool,

    /// List every flag, sorting by state
    #[arg(short, long)]
    pub state: bool,

    /// List every flag with the origin of its state
    #[arg(short, long)]
    pub origin: bool,

    /// Forcibly create the flag state file if it does not exist
    #[arg(short, long)]
    pub force: bool,

    /// Flag to check, get, or set
    pub flag: Option<String>,

    /// New state for the flag
    #[arg(value_name = "on | off", value_parser = parse_state, requires = "flag")]
    pub value: Option<bool>,
}

/// What the invocation asks for, derived from its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// No positional arguments
    List,
    /// `<flag>`
    Get(String),
    /// `<flag> <on | off>`
    Set(String, bool),
}

impl Cli {
    /// Determine the mode, rejecting option combinations that do not fit it.
    pub fn mode(&self) -> Result<Mode, String> {
        match (&self.flag, self.value) {
            (None, _) => {
                if self.force {
                    return Err("The '-f/--force' option is mutually exclusive with the check or list usage; please use one or the other.".to_string());
                }
                Ok(Mode::List)
            }
            (Some(flag), value) => {
                if self.state {
                    return Err("The '-s/--state' option is mutually exclusive with the check usage; please use one or the other.".to_string());
                }
                if self.origin {
                    return Err("The '-o/--origin' option is mutually exclusive with the check usage; please use one or the other.".to_string());
                }
                match value {
                    Some(state) => Ok(Mode::Set(flag.clone(), state)),
                    None => Ok(Mode::Get(flag.clone())),
                }
            }
        }
    }
}

fn parse_state(value: &str) -> Result<bool, String> {
    state_from_str(value).map_err(|_| {
        format!(
            "Unrecognized or unsupported state value: \"{}\"; please use 'off' or 'on'.",
            value
        )
    })
}
