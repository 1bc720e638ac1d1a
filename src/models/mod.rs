//! Data models for chkconfig flags.
//!
//! This module defines the core data structures:
//! - `Origin` - Where a resolved flag state came from
//! - `FlagStateTuple` - A flag, its state, and the state's origin
//!
//! and the utilities around them: the on/off state codec and the two
//! orderings used when listing flags.

pub mod state;

pub use state::{state_from_bytes, state_from_str, state_to_str};

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The origin of a resolved flag state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// The origin is not known yet
    #[default]
    Unknown,
    /// No backing file exists for the flag
    None,
    /// The state came from the read-only default directory
    Default,
    /// The state came from the read-write state directory
    State,
}

impl Origin {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Unknown => "unknown",
            Origin::None => "none",
            Origin::Default => "default",
            Origin::State => "state",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<u8> for Origin {
    type Error = Error;

    fn try_from(raw: u8) -> Result<Self> {
        match raw {
            0 => Ok(Origin::Unknown),
            1 => Ok(Origin::None),
            2 => Ok(Origin::Default),
            3 => Ok(Origin::State),
            other => Err(Error::InvalidArgument(format!(
                "unrecognized origin value {}",
                other
            ))),
        }
    }
}

/// A flag paired with its state and where that state came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagStateTuple {
    /// Flag name, which is also the backing file name
    pub flag: String,

    /// Whether the flag is on
    pub state: bool,

    /// Where the state was resolved from
    pub origin: Origin,
}

impl FlagStateTuple {
    /// Create a new tuple.
    pub fn new(flag: impl Into<String>, state: bool, origin: Origin) -> Self {
        Self {
            flag: flag.into(),
            state,
            origin,
        }
    }

    /// Create a tuple for a flag whose state has not been resolved yet.
    pub fn unresolved(flag: impl Into<String>) -> Self {
        Self::new(flag, false, Origin::Unknown)
    }
}

/// Allocate `count` unresolved tuples, ready to be named and passed to
/// [`Context::get_multiple`](crate::Context::get_multiple).
pub fn flag_state_tuples(count: usize) -> Result<Vec<FlagStateTuple>> {
    if count == 0 {
        return Err(Error::InvalidArgument(
            "tuple count must be non-zero".to_string(),
        ));
    }

    Ok(vec![FlagStateTuple::default(); count])
}

/// Order tuples by flag name, ascending byte-wise.
pub fn compare_by_flag(first: &FlagStateTuple, second: &FlagStateTuple) -> Ordering {
    first.flag.as_bytes().cmp(second.flag.as_bytes())
}

/// Order tuples with `on` before `off`, then by flag name.
pub fn compare_by_state(first: &FlagStateTuple, second: &FlagStateTuple) -> Ordering {
    second
        .state
        .cmp(&first.state)
        .then_with(|| compare_by_flag(first, second))
}
