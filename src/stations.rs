//! Station identifier validation and the configured station list.
//!
//! ICAO codes are the only identifiers the core rejects outright: a code
//! that is not four ASCII letters or digits is returned to the caller as
//! `WxError::InvalidStationId` rather than absorbed. All other modules
//! should go through `normalize_icao` before comparing codes.

use serde::{Deserialize, Serialize};

use crate::model::{Result, WxError};

// ---------------------------------------------------------------------------
// Station metadata
// ---------------------------------------------------------------------------

/// A monitored station as listed in the `[[stations]]` config table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// 4-character ICAO identifier, e.g. "KJFK".
    pub icao: String,
    /// Display name.
    pub name: String,
}

// ---------------------------------------------------------------------------
// Identifier checks
// ---------------------------------------------------------------------------

/// Returns `true` if `code` is exactly four ASCII alphanumerics.
///
/// Case is not significant; callers normalize to upper case before storage.
pub fn is_valid_icao(code: &str) -> bool {
    code.len() == 4 && code.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Trims and upper-cases `code`, then validates it.
pub fn normalize_icao(code: &str) -> Result<String> {
    let normalized = code.trim().to_ascii_uppercase();
    if is_valid_icao(&normalized) {
        Ok(normalized)
    } else {
        Err(WxError::InvalidStationId(code.to_string()))
    }
}

/// Looks up a station by ICAO code. Returns `None` if not found or if the
/// code is malformed.
pub fn find_station<'a>(stations: &'a [Station], icao: &str) -> Option<&'a Station> {
    let icao = normalize_icao(icao).ok()?;
    stations.iter().find(|s| s.icao.eq_ignore_ascii_case(&icao))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
