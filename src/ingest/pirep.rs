//! Pilot report (PIREP) normalization.
//!
//! Converts PIREP records from upstream JSON feeds (aviationweather.gov
//! style `icaoId`/`fltLvl`/`tbInt1` fields as well as plainer
//! `icao`/`altitude`/`turbulence` spellings) into `Pirep` values.
//!
//! Extraction never fails. Missing or malformed fields take defaults:
//! altitude and position 0, intensities NONE, observation time `now`.
//! The expiry flag is computed against the supplied `now`.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::alert::expiry::is_expired_at;
use crate::ingest::fields::{
    first_field, parse_number, parse_timestamp, records, safe_parse_number, text_field,
    ExtractionSettings, Fallbacks,
};
use crate::ingest::keywords::{icing_intensity, turbulence_intensity};
use crate::logging::ReportSource;
use crate::model::{GeoPoint, Pirep};

// ============================================================================
// Provider field aliases
// ============================================================================

const ID_KEYS: &[&str] = &["id", "pirepId", "pirep_id"];
const ICAO_KEYS: &[&str] = &["icaoId", "icao", "station", "stationId"];
const AIRCRAFT_KEYS: &[&str] = &["acType", "aircraft", "aircraftType"];
const ALTITUDE_FT_KEYS: &[&str] = &["altitude", "altitudeFt", "altitude_ft"];
/// Flight level, in hundreds of feet.
const FLIGHT_LEVEL_KEYS: &[&str] = &["fltLvl", "flightLevel"];
const TURBULENCE_KEYS: &[&str] = &["turbulence", "tbInt1", "turbulenceIntensity"];
const ICING_KEYS: &[&str] = &["icing", "icgInt1", "icingIntensity"];
const TIME_KEYS: &[&str] = &["obsTime", "timestamp", "receiptTime", "time"];
const RAW_KEYS: &[&str] = &["rawOb", "rawReport", "raw_report", "rawText"];
const LAT_KEYS: &[&str] = &["lat", "latitude"];
const LON_KEYS: &[&str] = &["lon", "lng", "longitude"];

const UNKNOWN_AIRCRAFT: &str = "UNKN";

// ============================================================================
// Extraction
// ============================================================================

/// Normalizes one PIREP payload with default settings.
pub fn extract_pirep(payload: &Value, now: DateTime<Utc>) -> Pirep {
    extract_pirep_with(payload, now, &ExtractionSettings::default())
}

/// Normalizes one PIREP payload.
pub fn extract_pirep_with(
    payload: &Value,
    now: DateTime<Utc>,
    settings: &ExtractionSettings,
) -> Pirep {
    let mut fallbacks = Fallbacks::default();

    let timestamp = parse_timestamp(first_field(payload, TIME_KEYS)).unwrap_or_else(|| {
        fallbacks.note("timestamp", "now");
        now
    });

    let icao = text_field(payload, ICAO_KEYS)
        .map(|s| s.to_ascii_uppercase())
        .unwrap_or_default();

    let id = text_field(payload, ID_KEYS).unwrap_or_else(|| {
        let prefix = if icao.is_empty() { "PIREP" } else { icao.as_str() };
        format!("{}-{}", prefix, timestamp.timestamp())
    });

    let aircraft = text_field(payload, AIRCRAFT_KEYS).unwrap_or_else(|| {
        fallbacks.note("aircraft", UNKNOWN_AIRCRAFT);
        UNKNOWN_AIRCRAFT.to_string()
    });

    let altitude_ft = extract_altitude(payload).unwrap_or_else(|| {
        fallbacks.note("altitude", "0");
        0.0
    });

    let location = extract_location(payload);

    let pirep = Pirep {
        id,
        icao,
        aircraft,
        altitude_ft,
        turbulence: turbulence_intensity(text_field(payload, TURBULENCE_KEYS).as_deref()),
        icing: icing_intensity(text_field(payload, ICING_KEYS).as_deref()),
        timestamp,
        raw_report: text_field(payload, RAW_KEYS).unwrap_or_default(),
        location,
        is_expired: is_expired_at(timestamp, settings.pirep_max_age(), now),
    };

    fallbacks.log(ReportSource::Pirep, &pirep.id);
    pirep
}

/// Altitude in feet, preferring an explicit feet field over flight level.
fn extract_altitude(payload: &Value) -> Option<f64> {
    parse_number(first_field(payload, ALTITUDE_FT_KEYS))
        .or_else(|| parse_number(first_field(payload, FLIGHT_LEVEL_KEYS)).map(|fl| fl * 100.0))
}

/// Position from top-level `lat`/`lon` or a nested `location` object.
fn extract_location(payload: &Value) -> GeoPoint {
    let source = payload
        .get("location")
        .filter(|v| v.is_object())
        .unwrap_or(payload);

    GeoPoint {
        lat: safe_parse_number(first_field(source, LAT_KEYS), 0.0),
        lon: safe_parse_number(first_field(source, LON_KEYS), 0.0),
    }
}

/// Normalizes every PIREP in a batch payload (array, `{ "data": [...] }`,
/// or a single object).
pub fn extract_pireps(
    payload: &Value,
    now: DateTime<Utc>,
    settings: &ExtractionSettings,
) -> Vec<Pirep> {
    records(payload, ReportSource::Pirep)
        .into_iter()
        .map(|record| extract_pirep_with(record, now, settings))
        .collect()
}

/// Reports filed for `icao`, compared case-insensitively.
pub fn pireps_for_station<'a>(pireps: &'a [Pirep], icao: &str) -> Vec<&'a Pirep> {
    let icao = icao.trim();
    pireps
        .iter()
        .filter(|p| p.icao.eq_ignore_ascii_case(icao))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
