//! Keyword mapping from free-text intensity/hazard fields to domain enums.
//!
//! Matching is a case-insensitive substring search checked in priority
//! order; the first hit wins. Standard report abbreviations (`SEV`, `MOD`,
//! `LGT`, `TRC`) are matched alongside the spelled-out words.

use crate::model::{HazardType, IcingIntensity, Severity, TurbulenceIntensity};

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Whole-word match; `"ice"` hits `"ICE"` but not `"notice"`.
fn contains_word(haystack: &str, words: &[&str]) -> bool {
    haystack
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|token| words.contains(&token))
}

const SEVERE_WORDS: &[&str] = &["sev"];
const MODERATE_WORDS: &[&str] = &["mod"];
const LIGHT_WORDS: &[&str] = &["light", "lgt"];
const TRACE_WORDS: &[&str] = &["trace", "trc"];

/// SEVERE → MODERATE → LIGHT → NONE.
pub fn turbulence_intensity(text: Option<&str>) -> TurbulenceIntensity {
    let Some(text) = text.map(str::to_ascii_lowercase) else {
        return TurbulenceIntensity::None;
    };

    if contains_any(&text, SEVERE_WORDS) {
        TurbulenceIntensity::Severe
    } else if contains_any(&text, MODERATE_WORDS) {
        TurbulenceIntensity::Moderate
    } else if contains_any(&text, LIGHT_WORDS) {
        TurbulenceIntensity::Light
    } else {
        TurbulenceIntensity::None
    }
}

/// SEVERE → MODERATE → LIGHT → TRACE → NONE.
pub fn icing_intensity(text: Option<&str>) -> IcingIntensity {
    let Some(text) = text.map(str::to_ascii_lowercase) else {
        return IcingIntensity::None;
    };

    if contains_any(&text, SEVERE_WORDS) {
        IcingIntensity::Severe
    } else if contains_any(&text, MODERATE_WORDS) {
        IcingIntensity::Moderate
    } else if contains_any(&text, LIGHT_WORDS) {
        IcingIntensity::Light
    } else if contains_any(&text, TRACE_WORDS) {
        IcingIntensity::Trace
    } else {
        IcingIntensity::None
    }
}

/// Maps a hazard description to a `HazardType`. Unrecognized or missing
/// text falls back to `Turb`.
pub fn hazard_type(text: Option<&str>) -> HazardType {
    let text = text.map(str::to_ascii_lowercase).unwrap_or_default();

    if contains_any(&text, &["turb"]) {
        HazardType::Turb
    } else if contains_any(&text, &["icing"]) || contains_word(&text, &["ice", "icg"]) {
        HazardType::Ice
    } else if contains_any(&text, &["ifr", "visibility", "fog"]) {
        HazardType::Ifr
    } else if contains_any(&text, &["mountain", "obscur", "mt_obsc", "mt obsc"]) {
        HazardType::MtObsc
    } else if contains_any(&text, &["convective", "thunderstorm"]) {
        HazardType::Convective
    } else {
        HazardType::Turb
    }
}

/// Maps an advisory severity description. Anything not clearly severe or
/// light is `Moderate`.
pub fn severity(text: Option<&str>) -> Severity {
    let text = text.map(str::to_ascii_lowercase).unwrap_or_default();

    if contains_any(&text, &["severe", "sev", "extreme", "strong"]) {
        Severity::Severe
    } else if contains_any(&text, &["light", "lgt", "weak", "mild"]) {
        Severity::Light
    } else {
        Severity::Moderate
    }
}
