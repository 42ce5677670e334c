//! Tolerant field access for loosely-typed upstream payloads.
//!
//! Upstream providers name the same field differently (`icaoId` vs
//! `icao`, `obsTime` vs `timestamp`) and send numbers as strings or
//! strings as numbers. Every helper here returns `Option` (or takes a
//! default) instead of failing; the extractors decide what to fall back to.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logging::{self, ReportSource};

// ---------------------------------------------------------------------------
// Extraction settings
// ---------------------------------------------------------------------------

/// Longest PIREP age or advisory validity window accepted, one year.
pub const MAX_WINDOW_HOURS: i64 = 8_760;

/// Defaults applied while normalizing PIREP/SIGMET payloads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// PIREPs older than this are marked expired.
    pub pirep_max_age_hours: i64,
    /// Length of the validity window assumed when `valid_to` is unusable.
    pub sigmet_default_validity_hours: i64,
    /// Advisory top used when no upper altitude is given.
    pub sigmet_default_top_ft: f64,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            pirep_max_age_hours: 12,
            sigmet_default_validity_hours: 6,
            sigmet_default_top_ft: 60_000.0,
        }
    }
}

impl ExtractionSettings {
    /// Window hours are clamped to `0..=MAX_WINDOW_HOURS`.
    pub fn pirep_max_age(&self) -> Duration {
        window_hours(self.pirep_max_age_hours)
    }

    pub fn sigmet_default_validity(&self) -> Duration {
        window_hours(self.sigmet_default_validity_hours)
    }
}

fn window_hours(hours: i64) -> Duration {
    Duration::hours(hours.clamp(0, MAX_WINDOW_HOURS))
}

// ---------------------------------------------------------------------------
// Field lookup
// ---------------------------------------------------------------------------

/// Returns the first non-null value among `keys`.
pub fn first_field<'a>(payload: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| payload.get(*key))
        .find(|value| !value.is_null())
}

/// Text content of the first matching field. Numbers are rendered as text;
/// blank strings count as missing.
pub fn text_field(payload: &Value, keys: &[&str]) -> Option<String> {
    let text = match first_field(payload, keys)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// Reads a finite number from a JSON number or numeric string.
pub fn parse_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// `parse_number` with a caller-supplied default for missing or bad input.
pub fn safe_parse_number(value: Option<&Value>, default: f64) -> f64 {
    parse_number(value).unwrap_or(default)
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Epoch values at or above this are taken to be milliseconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

fn from_epoch(raw: i64) -> Option<DateTime<Utc>> {
    if raw.abs() >= EPOCH_MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(raw)
    } else {
        DateTime::from_timestamp(raw, 0)
    }
}

/// Parses RFC 3339, `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` (UTC), or
/// epoch seconds/milliseconds given as a number or numeric string.
pub fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::Number(n) => from_epoch(n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?),
        Value::String(s) => parse_timestamp_str(s.trim()),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }
    s.parse::<i64>().ok().and_then(from_epoch)
}

// ---------------------------------------------------------------------------
// Station lists
// ---------------------------------------------------------------------------

/// Collects station identifiers from an array of strings or a delimited
/// string ("KJFK, KLGA KEWR"). Identifiers are upper-cased; blanks dropped.
pub fn icao_list(value: Option<&Value>) -> Vec<String> {
    let normalize = |s: &str| {
        let s = s.trim().to_ascii_uppercase();
        (!s.is_empty()).then_some(s)
    };

    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(normalize)
            .collect(),
        Some(Value::String(s)) => s
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter_map(normalize)
            .collect(),
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

/// Yields the individual record objects in a payload.
///
/// Accepts a bare array, an object wrapping a `data` array, or a single
/// record object. Entries that are not objects are skipped.
pub fn records(payload: &Value, source: ReportSource) -> Vec<&Value> {
    let items: Vec<&Value> = match payload {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items.iter().collect(),
            _ => vec![payload],
        },
        _ => Vec::new(),
    };

    let total = items.len();
    let objects: Vec<&Value> = items.into_iter().filter(|v| v.is_object()).collect();
    if objects.len() < total {
        logging::debug(
            source,
            None,
            &format!("skipped {} non-object entries in payload", total - objects.len()),
        );
    }
    objects
}

// ---------------------------------------------------------------------------
// Fallback bookkeeping
// ---------------------------------------------------------------------------

/// Fields that fell back to defaults while building one record. Logged once
/// the record id is known.
#[derive(Debug, Default)]
pub struct Fallbacks {
    notes: Vec<(&'static str, String)>,
}

impl Fallbacks {
    pub fn note(&mut self, field: &'static str, fallback: impl Into<String>) {
        self.notes.push((field, fallback.into()));
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.notes.iter().map(|(field, _)| *field)
    }

    pub fn log(&self, source: ReportSource, record_id: &str) {
        for (field, fallback) in &self.notes {
            logging::log_extraction_fallback(source, record_id, field, fallback);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
