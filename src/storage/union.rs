//! Ordered union of two flag listings.
//!
//! Both inputs must already be sorted with [`compare_by_flag`]. When a flag
//! appears in both, the tuple from `primary` is kept and the one from
//! `secondary` is dropped, so passing state-directory tuples as `primary`
//! lets explicit state override fallback defaults.

use crate::models::{FlagStateTuple, compare_by_flag};
use std::cmp::Ordering;

/// Merge two flag-sorted listings, preferring `primary` on duplicate flags.
pub fn union_by_flag(
    primary: Vec<FlagStateTuple>,
    secondary: Vec<FlagStateTuple>,
) -> Vec<FlagStateTuple> {
    let mut result = Vec::with_capacity(union_count(&primary, &secondary));
    let mut primary = primary.into_iter().peekable();
    let mut secondary = secondary.into_iter().peekable();

    loop {
        let ordering = match (primary.peek(), secondary.peek()) {
            (Some(left), Some(right)) => compare_by_flag(left, right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => break,
        };

        match ordering {
            Ordering::Less => result.extend(primary.next()),
            Ordering::Greater => result.extend(secondary.next()),
            Ordering::Equal => {
                result.extend(primary.next());
                secondary.next();
            }
        }
    }

    result
}

/// Number of tuples [`union_by_flag`] would produce for these listings.
pub fn union_count(primary: &[FlagStateTuple], secondary: &[FlagStateTuple]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);

    while i < primary.len() && j < secondary.len() {
        match compare_by_flag(&primary[i], &secondary[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
        count += 1;
    }

    count + (primary.len() - i) + (secondary.len() - j)
}
