//! METAR/TAF text parsing.
//!
//! Submodules:
//! - `line`: ceiling/visibility extraction from a single report line.
//! - `highlight`: minima annotation of a multi-line report for display.

pub mod highlight;
pub mod line;
