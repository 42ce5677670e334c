//! Aviation weather report parsing and station status classification.
//!
//! Turns raw METAR/TAF text and loosely-typed PIREP/SIGMET payloads into
//! typed records, checks them against operator minima, and folds them into
//! a per-station operational status. Fetching, caching, persistence and
//! rendering are left to the caller; nothing here performs network I/O.
//!
//! Modules:
//! - `model`: shared domain types and `WxError`.
//! - `parse`: METAR/TAF line parsing and minima highlighting.
//! - `ingest`: PIREP/SIGMET payload normalization.
//! - `alert`: minima checks, expiry windows, flight category, status.
//! - `stations`: ICAO validation and station lookup.
//! - `config`: TOML configuration.
//! - `logging`: structured console/file logging.

pub mod alert;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod parse;
pub mod stations;

pub use alert::minima::meets_minima;
pub use alert::status::{classify, classify_with, evaluate_station, StatusThresholds};
pub use config::Config;
pub use ingest::pirep::{extract_pirep, extract_pireps};
pub use ingest::sigmet::{extract_sigmet, extract_sigmets};
pub use model::{
    Minima, OperationalStatus, ParsedConditions, Pirep, Result, Sigmet, StationStatus,
    WeatherData, WxError,
};
pub use parse::highlight::{highlight, HighlightedReport};
pub use parse::line::parse_line;
