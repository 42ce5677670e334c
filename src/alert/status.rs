//! Station operational status classification.
//!
//! Folds every signal for a station (fetch error, advisories, pilot
//! reports, current METAR ceiling/visibility) into one
//! `OperationalStatus`. Each signal proposes a level and the result is
//! their maximum, so a later check can raise the status but never lower it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logging;
use crate::model::{OperationalStatus, Pirep, Result, Severity, Sigmet, StationStatus, WeatherData};
use crate::parse::line::parse_line;
use crate::stations::normalize_icao;

/// METAR ceiling/visibility limits below which a station escalates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusThresholds {
    pub critical_vis_miles: f64,
    pub critical_ceiling_ft: f64,
    pub caution_vis_miles: f64,
    pub caution_ceiling_ft: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            critical_vis_miles: 0.5,
            critical_ceiling_ft: 100.0,
            caution_vis_miles: 1.0,
            caution_ceiling_ft: 200.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Individual signals
// ---------------------------------------------------------------------------

/// Level proposed by advisories and pilot reports.
///
/// Expired PIREPs and inactive advisories are ignored entirely.
pub fn hazard_status(pireps: &[Pirep], sigmets: &[Sigmet]) -> OperationalStatus {
    let current_pireps = || pireps.iter().filter(|p| !p.is_expired);
    let active_sigmets = || sigmets.iter().filter(|s| s.is_active);

    let severe = active_sigmets().any(|s| s.severity == Severity::Severe)
        || current_pireps().any(Pirep::reports_severe);
    if severe {
        return OperationalStatus::Critical;
    }

    let moderate = active_sigmets().next().is_some() || current_pireps().any(Pirep::reports_moderate);
    if moderate {
        OperationalStatus::Caution
    } else {
        OperationalStatus::Normal
    }
}

/// Level proposed by the METAR's first ceiling and visibility groups.
///
/// Groups that are missing propose nothing.
pub fn metar_status(metar: &str, thresholds: &StatusThresholds) -> OperationalStatus {
    let parsed = parse_line(metar);
    let vis_below = |limit: f64| parsed.vis_miles.is_some_and(|vis| vis < limit);
    let ceiling_below = |limit: f64| parsed.ceiling_ft.is_some_and(|c| f64::from(c) < limit);

    if vis_below(thresholds.critical_vis_miles) || ceiling_below(thresholds.critical_ceiling_ft) {
        OperationalStatus::Critical
    } else if vis_below(thresholds.caution_vis_miles) || ceiling_below(thresholds.caution_ceiling_ft) {
        OperationalStatus::Caution
    } else {
        OperationalStatus::Normal
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classifies a station with the default METAR thresholds.
pub fn classify(metar: &WeatherData, pireps: &[Pirep], sigmets: &[Sigmet]) -> OperationalStatus {
    classify_with(metar, pireps, sigmets, &StatusThresholds::default())
}

/// Classifies a station.
///
/// A METAR fetch error is CRITICAL on its own and skips the other checks.
pub fn classify_with(
    metar: &WeatherData,
    pireps: &[Pirep],
    sigmets: &[Sigmet],
    thresholds: &StatusThresholds,
) -> OperationalStatus {
    if metar.has_error() {
        return OperationalStatus::Critical;
    }

    [
        hazard_status(pireps, sigmets),
        metar_status(&metar.metar, thresholds),
    ]
    .into_iter()
    .fold(OperationalStatus::Normal, std::cmp::max)
}

/// Builds a fresh `StationStatus` for one refresh cycle.
///
/// Fails only if `icao` is not a valid station identifier.
pub fn evaluate_station(
    icao: &str,
    name: &str,
    metar: WeatherData,
    pireps: Vec<Pirep>,
    sigmets: Vec<Sigmet>,
    thresholds: &StatusThresholds,
    now: DateTime<Utc>,
) -> Result<StationStatus> {
    let icao = normalize_icao(icao)?;
    let operational_status = classify_with(&metar, &pireps, &sigmets, thresholds);

    if let Some(err) = metar.error.as_deref().filter(|_| metar.has_error()) {
        logging::warn(logging::ReportSource::Metar, Some(&icao), &format!("fetch failed: {}", err));
    }
    logging::log_evaluation_summary(
        &icao,
        operational_status,
        pireps.iter().filter(|p| !p.is_expired).count(),
        sigmets.iter().filter(|s| s.is_active).count(),
    );

    Ok(StationStatus {
        icao,
        name: name.to_string(),
        metar,
        pireps,
        sigmets,
        operational_status,
        last_updated: now,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
