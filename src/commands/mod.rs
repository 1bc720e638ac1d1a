//! Command implementations for the chkconfig CLI.
//!
//! This module contains the logic behind each CLI mode:
//! - `list` - Show every flag as a table, sorted by flag or by state
//! - `get` - Show the state of one flag
//! - `set` - Turn one flag on or off

use crate::Result;
use crate::context::Context;
use crate::models::{FlagStateTuple, Origin, compare_by_flag, compare_by_state, state_to_str};
use serde::Serialize;
use std::fmt::Write;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// Ordering for `chkconfig` listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending by flag name
    #[default]
    Flag,
    /// `on` flags first, then ascending by flag name
    State,
}

// === List ===

/// Every flag known to a context.
#[derive(Serialize)]
pub struct FlagList {
    pub flags: Vec<FlagStateTuple>,
    /// Whether the human table includes an origin column
    #[serde(skip)]
    pub show_origin: bool,
}

const FLAG_WIDTH: usize = 19;
const STATE_WIDTH: usize = 5;
const ORIGIN_WIDTH: usize = 7;

impl FlagList {
    fn push_row(&self, output: &mut String, flag: &str, state: &str, origin: &str) {
        if self.show_origin {
            let _ = writeln!(
                output,
                "{:<fw$}  {:<sw$}  {:<ow$}",
                flag,
                state,
                origin,
                fw = FLAG_WIDTH,
                sw = STATE_WIDTH,
                ow = ORIGIN_WIDTH
            );
        } else {
            let _ = writeln!(
                output,
                "{:<fw$}  {:<sw$}",
                flag,
                state,
                fw = FLAG_WIDTH,
                sw = STATE_WIDTH
            );
        }
    }
}

impl Output for FlagList {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    fn to_human(&self) -> String {
        let mut output = String::new();
        self.push_row(&mut output, "Flag", "State", "Origin");
        self.push_row(&mut output, "====", "=====", "======");

        for tuple in &self.flags {
            self.push_row(
                &mut output,
                &tuple.flag,
                state_to_str(tuple.state),
                tuple.origin.as_str(),
            );
        }

        // println! adds the final newline.
        output.pop();
        output
    }
}

/// List every flag, sorted as requested.
pub fn list_flags(context: &Context, order: SortOrder, show_origin: bool) -> Result<FlagList> {
    let mut flags = context.copy_all()?;

    match order {
        SortOrder::Flag => flags.sort_by(compare_by_flag),
        SortOrder::State => flags.sort_by(compare_by_state),
    }

    Ok(FlagList { flags, show_origin })
}

// === Get ===

/// The resolved state of a single flag.
#[derive(Serialize)]
pub struct FlagState {
    pub flag: String,
    pub state: bool,
    pub origin: Origin,
}

impl Output for FlagState {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    fn to_human(&self) -> String {
        state_to_str(self.state).to_string()
    }
}

/// Get the state of one flag.
pub fn get_flag(context: &Context, flag: &str) -> Result<FlagState> {
    let (state, origin) = context.get_with_origin(flag)?;

    Ok(FlagState {
        flag: flag.to_string(),
        state,
        origin,
    })
}

// === Set ===

/// Confirmation of a flag change.
#[derive(Serialize)]
pub struct FlagSet {
    pub flag: String,
    pub state: bool,
}

impl Output for FlagSet {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    fn to_human(&self) -> String {
        format!("Set {} to {}", self.flag, state_to_str(self.state))
    }
}

/// Set one flag in the state directory.
pub fn set_flag(context: &Context, flag: &str, state: bool) -> Result<FlagSet> {
    context.set(flag, state)?;
    tracing::info!(flag, state = state_to_str(state), "flag set");

    Ok(FlagSet {
        flag: flag.to_string(),
        state,
    })
}
