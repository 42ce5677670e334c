//! Minima checks, report expiry, and station status classification.
//!
//! Everything here is pure: inputs are parsed records plus an injected
//! clock, outputs are booleans or ordered severity levels.

pub mod category;
pub mod expiry;
pub mod minima;
pub mod status;
