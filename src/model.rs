//! ParsedConditions, Minima, Pirep, Sigmet, StationStatus, WxError
//! core data structures and error handling
//!
//! Core data types for the aviation weather monitoring core.
//!
//! This module defines the shared domain model imported by all other modules.
//! It contains no parsing or classification logic, only types and their
//! trivial accessors.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Parsed report conditions
// ---------------------------------------------------------------------------

/// Ceiling and visibility pulled from a single line of METAR/TAF text.
///
/// `None` means the group was not present in the line. A missing group
/// never causes a minima failure.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedConditions {
    /// Lowest BKN/OVC/VV layer, in feet.
    pub ceiling_ft: Option<u32>,
    /// Prevailing visibility, in statute miles.
    pub vis_miles: Option<f64>,
    /// `true` when the visibility group used the `P` ("greater than") prefix.
    pub is_greater: bool,
}

impl ParsedConditions {
    /// `true` if at least one of ceiling or visibility was found.
    pub fn has_any(&self) -> bool {
        self.ceiling_ft.is_some() || self.vis_miles.is_some()
    }
}

/// Operator ceiling/visibility minima for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Minima {
    pub ceiling_ft: f64,
    pub vis_miles: f64,
}

impl Minima {
    pub fn new(ceiling_ft: f64, vis_miles: f64) -> Self {
        Self { ceiling_ft, vis_miles }
    }

    /// Builds minima from user input, mapping negative or NaN values to 0.
    pub fn clamped(ceiling_ft: f64, vis_miles: f64) -> Self {
        let clamp = |v: f64| if v.is_nan() || v < 0.0 { 0.0 } else { v };
        Self {
            ceiling_ft: clamp(ceiling_ft),
            vis_miles: clamp(vis_miles),
        }
    }
}

impl Default for Minima {
    /// Standard non-precision alternate minima: 1000 ft and 3 SM.
    fn default() -> Self {
        Self::new(1000.0, 3.0)
    }
}

// ---------------------------------------------------------------------------
// Pilot reports
// ---------------------------------------------------------------------------

/// Reported turbulence intensity, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurbulenceIntensity {
    None,
    Light,
    Moderate,
    Severe,
}

/// Reported icing intensity, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IcingIntensity {
    None,
    Trace,
    Light,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// A pilot report, normalized from an upstream payload.
///
/// `is_expired` is fixed when the record is extracted and is not updated
/// afterwards; re-extract to refresh it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pirep {
    pub id: String,
    pub icao: String,
    pub aircraft: String,
    pub altitude_ft: f64,
    pub turbulence: TurbulenceIntensity,
    pub icing: IcingIntensity,
    pub timestamp: DateTime<Utc>,
    pub raw_report: String,
    pub location: GeoPoint,
    pub is_expired: bool,
}

impl Pirep {
    pub fn reports_severe(&self) -> bool {
        self.turbulence == TurbulenceIntensity::Severe || self.icing == IcingIntensity::Severe
    }

    pub fn reports_moderate(&self) -> bool {
        self.turbulence == TurbulenceIntensity::Moderate || self.icing == IcingIntensity::Moderate
    }
}

// ---------------------------------------------------------------------------
// SIGMET / AIRMET advisories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvisoryKind {
    Sigmet,
    Airmet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HazardType {
    Turb,
    Ice,
    Ifr,
    MtObsc,
    Convective,
}

/// Advisory severity, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Light,
    Moderate,
    Severe,
}

/// A SIGMET or AIRMET advisory with its validity window.
///
/// Window invariants, evaluated once at extraction time:
///   is_expired = valid_to < now
///   is_active  = valid_from <= now <= valid_to
/// A future-valid advisory is neither active nor expired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sigmet {
    pub id: String,
    pub kind: AdvisoryKind,
    pub hazard: HazardType,
    pub severity: Severity,
    pub altitude_min_ft: f64,
    pub altitude_max_ft: f64,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub affected_icaos: BTreeSet<String>,
    pub raw_text: String,
    pub is_expired: bool,
    pub is_active: bool,
}

impl Sigmet {
    /// Returns `true` if the advisory lists `icao` among its affected stations.
    /// Comparison ignores case and surrounding whitespace.
    pub fn affects(&self, icao: &str) -> bool {
        let icao = icao.trim().to_ascii_uppercase();
        self.affected_icaos.contains(&icao)
    }
}

// ---------------------------------------------------------------------------
// Station status
// ---------------------------------------------------------------------------

/// Raw METAR/TAF text for a station as delivered by the fetch layer.
///
/// `error` is set when the fetch failed; the text fields may then be empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherData {
    pub metar: String,
    pub taf: String,
    pub error: Option<String>,
}

impl WeatherData {
    pub fn new(metar: impl Into<String>, taf: impl Into<String>) -> Self {
        Self {
            metar: metar.into(),
            taf: taf.into(),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// `true` if the fetch reported an error. An empty string means none.
    pub fn has_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// Station operational status levels, in ascending order of severity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationalStatus {
    #[default]
    Normal,
    Caution,
    Critical,
}

impl std::fmt::Display for OperationalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationalStatus::Normal => write!(f, "NORMAL"),
            OperationalStatus::Caution => write!(f, "CAUTION"),
            OperationalStatus::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Everything known about one station after a refresh.
///
/// Rebuilt as a whole by `alert::status::evaluate_station`; never patched
/// field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationStatus {
    pub icao: String,
    pub name: String,
    pub metar: WeatherData,
    pub pireps: Vec<Pirep>,
    pub sigmets: Vec<Sigmet>,
    pub operational_status: OperationalStatus,
    pub last_updated: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors surfaced to callers of the weather core.
///
/// Report content problems never appear here; they are absorbed by the
/// parsers' default values.
#[derive(Debug, Error)]
pub enum WxError {
    /// Station identifier is not four ASCII letters/digits.
    #[error("Invalid station identifier: '{0}'")]
    InvalidStationId(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

pub type Result<T> = std::result::Result<T, WxError>;
