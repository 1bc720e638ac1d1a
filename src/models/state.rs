//! The on/off text encoding of a flag state.

use crate::{Error, Result};

const ON: &str = "on";
const OFF: &str = "off";

/// Decode raw backing file content.
///
/// Content starting with `on` or `off`, in any case, decodes to `true` or
/// `false`. Anything after the prefix (usually a newline) is ignored.
pub fn state_from_bytes(data: &[u8]) -> Result<bool> {
    if has_prefix(data, ON) {
        Ok(true)
    } else if has_prefix(data, OFF) {
        Ok(false)
    } else {
        Err(Error::InvalidArgument(format!(
            "unrecognized state value {:?}; expected 'on' or 'off'",
            String::from_utf8_lossy(data)
        )))
    }
}

/// Decode a state string such as `"on"`, `"OFF"` or `"on\n"`.
pub fn state_from_str(text: &str) -> Result<bool> {
    state_from_bytes(text.as_bytes())
}

/// Encode a state as its canonical lowercase string.
pub fn state_to_str(state: bool) -> &'static str {
    if state { ON } else { OFF }
}

fn has_prefix(data: &[u8], prefix: &str) -> bool {
    data.len() >= prefix.len() && data[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
