//! Normalization of upstream PIREP and SIGMET/AIRMET payloads.
//!
//! Payloads arrive already fetched as `serde_json::Value`; fetching,
//! retries and response caching belong to the caller.
//!
//! Submodules:
//! - `fields`: tolerant field lookup, number and timestamp parsing.
//! - `keywords`: free-text intensity/hazard/severity mapping.
//! - `pirep`: pilot report extraction.
//! - `sigmet`: advisory extraction.

pub mod fields;
pub mod keywords;
pub mod pirep;
pub mod sigmet;
