//! Ceiling/visibility minima checking.
//!
//! A group that was not reported always passes, so lines without weather
//! groups never count as violations.

use crate::model::{Minima, ParsedConditions};

/// Returns `true` if visibility is at or above the minimum (or was reported
/// with the `P` prefix, or not reported at all).
pub fn visibility_ok(conditions: &ParsedConditions, minima: &Minima) -> bool {
    conditions.is_greater
        || conditions
            .vis_miles
            .is_none_or(|vis| vis >= minima.vis_miles)
}

/// Returns `true` if the ceiling is at or above the minimum, or absent.
pub fn ceiling_ok(conditions: &ParsedConditions, minima: &Minima) -> bool {
    conditions
        .ceiling_ft
        .is_none_or(|ceiling| f64::from(ceiling) >= minima.ceiling_ft)
}

/// Checks parsed conditions against operator minima.
pub fn meets_minima(conditions: &ParsedConditions, minima: &Minima) -> bool {
    visibility_ok(conditions, minima) && ceiling_ok(conditions, minima)
}
