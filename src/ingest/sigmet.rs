//! SIGMET/AIRMET advisory normalization.
//!
//! Converts advisory records from upstream JSON feeds into `Sigmet`
//! values. Like PIREP extraction this never fails:
//!   - hazard falls back to TURB and severity to MODERATE
//!   - altitude bottom falls back to 0 ft, top to 60,000 ft
//!   - an unusable `valid_from` becomes `now`, an unusable `valid_to`
//!     becomes `now + 6h`
//! Active/expired flags are computed against the supplied `now`.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::alert::expiry::window_state_at;
use crate::ingest::fields::{
    first_field, icao_list, parse_number, parse_timestamp, records, text_field,
    ExtractionSettings, Fallbacks,
};
use crate::ingest::keywords::{hazard_type, severity};
use crate::logging::ReportSource;
use crate::model::{AdvisoryKind, Sigmet};

// ============================================================================
// Provider field aliases
// ============================================================================

const ID_KEYS: &[&str] = &["airSigmetId", "id", "sigmetId"];
const KIND_KEYS: &[&str] = &["airSigmetType", "type", "kind"];
const HAZARD_KEYS: &[&str] = &["hazard", "hazardType"];
const SEVERITY_KEYS: &[&str] = &["severity", "intensity"];
const ALT_MIN_KEYS: &[&str] = &["altitudeLow1", "altitudeMin", "altLow", "minAltitude"];
const ALT_MAX_KEYS: &[&str] = &["altitudeHi1", "altitudeMax", "altHi", "maxAltitude"];
const VALID_FROM_KEYS: &[&str] = &["validTimeFrom", "validFrom", "valid_from"];
const VALID_TO_KEYS: &[&str] = &["validTimeTo", "validTo", "valid_to"];
const ICAOS_KEYS: &[&str] = &["affectedIcaos", "affectedICAOs", "icaos", "stations"];
const RAW_KEYS: &[&str] = &["rawAirSigmet", "rawText", "raw_text"];

// ============================================================================
// Extraction
// ============================================================================

fn advisory_kind(text: Option<&str>) -> AdvisoryKind {
    match text {
        Some(t) if t.to_ascii_lowercase().contains("airmet") => AdvisoryKind::Airmet,
        _ => AdvisoryKind::Sigmet,
    }
}

/// Normalizes one advisory payload with default settings.
pub fn extract_sigmet(payload: &Value, now: DateTime<Utc>) -> Sigmet {
    extract_sigmet_with(payload, now, &ExtractionSettings::default())
}

/// Normalizes one advisory payload.
pub fn extract_sigmet_with(
    payload: &Value,
    now: DateTime<Utc>,
    settings: &ExtractionSettings,
) -> Sigmet {
    let mut fallbacks = Fallbacks::default();

    let kind = advisory_kind(text_field(payload, KIND_KEYS).as_deref());

    let hazard_text = text_field(payload, HAZARD_KEYS);
    if hazard_text.is_none() {
        fallbacks.note("hazard", "TURB");
    }
    let severity_text = text_field(payload, SEVERITY_KEYS);
    if severity_text.is_none() {
        fallbacks.note("severity", "MODERATE");
    }

    let altitude_min_ft = parse_number(first_field(payload, ALT_MIN_KEYS)).unwrap_or_else(|| {
        fallbacks.note("altitude_min", "0");
        0.0
    });
    let altitude_max_ft = parse_number(first_field(payload, ALT_MAX_KEYS)).unwrap_or_else(|| {
        fallbacks.note("altitude_max", settings.sigmet_default_top_ft.to_string());
        settings.sigmet_default_top_ft
    });

    let valid_from = parse_timestamp(first_field(payload, VALID_FROM_KEYS)).unwrap_or_else(|| {
        fallbacks.note("valid_from", "now");
        now
    });
    let valid_to = parse_timestamp(first_field(payload, VALID_TO_KEYS)).unwrap_or_else(|| {
        fallbacks.note(
            "valid_to",
            format!("now + {}h", settings.sigmet_default_validity().num_hours()),
        );
        now.checked_add_signed(settings.sigmet_default_validity())
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    });

    let id = text_field(payload, ID_KEYS).unwrap_or_else(|| {
        let prefix = match kind {
            AdvisoryKind::Sigmet => "SIGMET",
            AdvisoryKind::Airmet => "AIRMET",
        };
        format!("{}-{}", prefix, valid_from.timestamp())
    });

    let window = window_state_at(valid_from, valid_to, now);

    let sigmet = Sigmet {
        id,
        kind,
        hazard: hazard_type(hazard_text.as_deref()),
        severity: severity(severity_text.as_deref()),
        altitude_min_ft,
        altitude_max_ft,
        valid_from,
        valid_to,
        affected_icaos: icao_list(first_field(payload, ICAOS_KEYS))
            .into_iter()
            .collect::<BTreeSet<_>>(),
        raw_text: text_field(payload, RAW_KEYS).unwrap_or_default(),
        is_expired: window.is_expired(),
        is_active: window.is_active(),
    };

    fallbacks.log(ReportSource::Sigmet, &sigmet.id);
    sigmet
}

/// Normalizes every advisory in a batch payload.
pub fn extract_sigmets(
    payload: &Value,
    now: DateTime<Utc>,
    settings: &ExtractionSettings,
) -> Vec<Sigmet> {
    records(payload, ReportSource::Sigmet)
        .into_iter()
        .map(|record| extract_sigmet_with(record, now, settings))
        .collect()
}

/// Advisories that list `icao` among their affected stations.
pub fn sigmets_for_station<'a>(sigmets: &'a [Sigmet], icao: &str) -> Vec<&'a Sigmet> {
    sigmets.iter().filter(|s| s.affects(icao)).collect()
}

// ============================================================================
// Tests
// ============================================================================
