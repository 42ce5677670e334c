//! End-to-end tests for report parsing, extraction and station classification
//!
//! Tests verify:
//! 1. METAR lines are parsed and checked against minima
//! 2. Multi-line reports are highlighted with violations flagged
//! 3. Upstream PIREP/SIGMET payloads normalize with correct expiry flags
//! 4. Stations classify to the expected operational status
//!
//! All tests use a fixed clock; none touch the network.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;

use wxmon_core::alert::status::hazard_status;
use wxmon_core::ingest::fields::ExtractionSettings;
use wxmon_core::ingest::pirep::pireps_for_station;
use wxmon_core::ingest::sigmet::sigmets_for_station;
use wxmon_core::model::{Severity, TurbulenceIntensity};
use wxmon_core::parse::highlight::strip_markup;
use wxmon_core::*;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// A fixed "now" used across all tests: 2024-05-01 13:00:00 UTC.
fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap()
}

const CLEAR_METAR: &str = "KJFK 011251Z 18010KT 10SM BKN050 22/12 A3001";

fn moderate_sigmet_payload() -> serde_json::Value {
    json!({
        "airSigmetId": "N-7",
        "airSigmetType": "SIGMET",
        "hazard": "TURB",
        "severity": "moderate",
        "validTimeFrom": (fixed_now() - Duration::hours(1)).to_rfc3339(),
        "validTimeTo": (fixed_now() + Duration::hours(3)).to_rfc3339(),
        "affectedIcaos": ["KJFK"]
    })
}

fn severe_sigmet_payload() -> serde_json::Value {
    json!({
        "airSigmetId": "N-8",
        "hazard": "CONVECTIVE",
        "severity": "SEVERE",
        "validTimeFrom": (fixed_now() - Duration::hours(1)).to_rfc3339(),
        "validTimeTo": (fixed_now() + Duration::hours(1)).to_rfc3339(),
        "affectedIcaos": "KJFK KLGA"
    })
}

// ---------------------------------------------------------------------------
// 1. Line parsing and minima
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_low_visibility_line_violates_minima() {
    let parsed = parse_line("KJFK 291951Z 18010KT 1/2SM BKN005");
    let minima = Minima::new(500.0, 1.0);

    assert_eq!(parsed.ceiling_ft, Some(500));
    assert_eq!(parsed.vis_miles, Some(0.5));
    assert!(!parsed.is_greater);
    assert!(!meets_minima(&parsed, &minima));

    let report = highlight("KJFK 291951Z 18010KT 1/2SM BKN005", &minima);
    assert!(report.has_violations, "line below minima must be flagged");
}

#[test]
fn test_scenario_greater_than_visibility_meets_minima() {
    let parsed = parse_line("KJFK 291951Z 18010KT P6SM OVC020");
    let minima = Minima::new(500.0, 3.0);

    assert!(parsed.is_greater);
    assert_eq!(parsed.ceiling_ft, Some(2000));
    assert!(meets_minima(&parsed, &minima));
    assert!(!highlight("KJFK 291951Z 18010KT P6SM OVC020", &minima).has_violations);
}

#[test]
fn test_lines_without_weather_groups_always_pass() {
    let strict = Minima::new(100_000.0, 100.0);
    for line in ["RMK AO2 SLP132", "NOSIG", "", "KJFK 291951Z 18010KT"] {
        let parsed = parse_line(line);
        assert_eq!(parsed, ParsedConditions::default(), "line {:?}", line);
        assert!(meets_minima(&parsed, &strict), "line {:?}", line);
    }
}

#[test]
fn test_zero_minima_pass_everything() {
    let zero = Minima::clamped(-5.0, f64::NAN);
    assert_eq!(zero, Minima::new(0.0, 0.0));
    for line in ["VV000 M1/4SM", "OVC001 1/2SM", "P6SM SKC"] {
        assert!(meets_minima(&parse_line(line), &zero), "line {:?}", line);
    }
}

// ---------------------------------------------------------------------------
// 2. Highlighting
// ---------------------------------------------------------------------------

#[test]
fn test_empty_report_highlights_to_nothing() {
    for minima in [Minima::new(0.0, 0.0), Minima::new(5000.0, 10.0)] {
        let report = highlight("", &minima);
        assert_eq!(report.html, "");
        assert!(!report.has_violations);
    }
}

#[test]
fn test_highlight_is_idempotent_on_stripped_output() {
    let raw = "KBOS 011254Z 27012KT 1 1/2SM BR OVC007\nRMK AO2\n\nTEMPO 0114/0116 3SM BKN015";
    let minima = Minima::new(800.0, 2.0);

    let first = highlight(raw, &minima);
    let stripped = strip_markup(&first.html);
    assert_eq!(stripped, raw);
    assert_eq!(highlight(&stripped, &minima).has_violations, first.has_violations);
    assert!(first.has_violations);
}

// ---------------------------------------------------------------------------
// 3. Extraction
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_thirteen_hour_old_severe_pirep_is_expired_and_ignored() {
    let payload = json!({
        "id": "old-1",
        "icaoId": "KJFK",
        "tbInt1": "SEV",
        "obsTime": (fixed_now() - Duration::hours(13)).timestamp()
    });

    let pirep = extract_pirep(&payload, fixed_now());
    assert!(pirep.is_expired);
    assert_eq!(pirep.turbulence, TurbulenceIntensity::Severe);

    let status = classify(&WeatherData::new(CLEAR_METAR, ""), &[pirep], &[]);
    assert_eq!(status, OperationalStatus::Normal);
}

#[test]
fn test_mixed_feeds_filter_by_station() {
    let pireps = extract_pireps(
        &json!([
            { "id": "1", "icaoId": "KJFK", "tbInt1": "MOD" },
            { "id": "2", "icaoId": "KBOS", "tbInt1": "SEV" }
        ]),
        fixed_now(),
        &ExtractionSettings::default(),
    );
    let sigmets = extract_sigmets(
        &json!({ "data": [moderate_sigmet_payload(), { "affectedIcaos": ["KBOS"], "severity": "severe" }] }),
        fixed_now(),
        &ExtractionSettings::default(),
    );

    let jfk_pireps: Vec<Pirep> = pireps_for_station(&pireps, "KJFK").into_iter().cloned().collect();
    let jfk_sigmets: Vec<Sigmet> = sigmets_for_station(&sigmets, "KJFK").into_iter().cloned().collect();

    assert_eq!(jfk_pireps.len(), 1);
    assert_eq!(jfk_sigmets.len(), 1);
    assert_eq!(hazard_status(&jfk_pireps, &jfk_sigmets), OperationalStatus::Caution);
    assert_eq!(hazard_status(&pireps, &sigmets), OperationalStatus::Critical);
}

// ---------------------------------------------------------------------------
// 4. Classification
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_fetch_error_is_critical() {
    let status = classify(&WeatherData::failed("timeout"), &[], &[]);
    assert_eq!(status, OperationalStatus::Critical);
}

#[test]
fn test_scenario_active_moderate_sigmet_is_caution() {
    let sigmet = extract_sigmet(&moderate_sigmet_payload(), fixed_now());
    assert!(sigmet.is_active);
    assert_eq!(sigmet.severity, Severity::Moderate);

    let status = classify(&WeatherData::new(CLEAR_METAR, ""), &[], &[sigmet]);
    assert_eq!(status, OperationalStatus::Caution);
}

#[test]
fn test_adding_severe_sigmet_to_caution_inputs_only_raises_status() {
    let metar = WeatherData::new(CLEAR_METAR, "");
    let mut sigmets = vec![extract_sigmet(&moderate_sigmet_payload(), fixed_now())];
    let before = classify(&metar, &[], &sigmets);
    assert_eq!(before, OperationalStatus::Caution);

    sigmets.push(extract_sigmet(&severe_sigmet_payload(), fixed_now()));
    let after = classify(&metar, &[], &sigmets);
    assert!(after >= before);
    assert_eq!(after, OperationalStatus::Critical);
}

#[test]
fn test_evaluate_station_end_to_end() {
    let metar = WeatherData::new(
        "KJFK 011251Z 18010KT 3/4SM BR OVC009",
        "TAF KJFK 011130Z 0112/0218 18010KT 2SM BR OVC009",
    );
    let pireps = extract_pireps(&json!([{ "icaoId": "KJFK", "icgInt1": "LGT" }]), fixed_now(), &ExtractionSettings::default());

    let status = evaluate_station(
        "KJFK",
        "John F Kennedy Intl",
        metar,
        pireps,
        Vec::new(),
        &StatusThresholds::default(),
        fixed_now(),
    )
    .expect("valid station should evaluate");

    // 3/4 SM is below the 1 SM caution limit but above the 1/2 SM critical one.
    assert_eq!(status.operational_status, OperationalStatus::Caution);
    assert_eq!(status.last_updated, fixed_now());

    let json = serde_json::to_value(&status).expect("status serializes");
    assert_eq!(json["operational_status"], "CAUTION");
    assert_eq!(json["pireps"][0]["icing"], "LIGHT");
}

#[test]
fn test_invalid_station_identifier_is_reported() {
    let result = evaluate_station(
        "K JF",
        "Nowhere",
        WeatherData::default(),
        Vec::new(),
        Vec::new(),
        &StatusThresholds::default(),
        fixed_now(),
    );
    match result {
        Err(WxError::InvalidStationId(code)) => assert_eq!(code, "K JF"),
        other => panic!("expected InvalidStationId, got {:?}", other),
    }
}
