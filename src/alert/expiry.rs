//! PIREP expiry and SIGMET/AIRMET validity window checks.
//!
//! Pilot reports age out after a fixed window (12 hours by default);
//! advisories carry an explicit validity window. Both are evaluated once,
//! when a record is extracted, and stored on the record.
//!
//! # Clock injection
//! All functions accept a `now: DateTime<Utc>` parameter rather than calling
//! `Utc::now()` internally. This keeps expiry purely deterministic in tests
//! without mocking or time manipulation.

use chrono::{DateTime, Duration, Utc};

/// Default age after which a pilot report is no longer considered current.
pub const PIREP_MAX_AGE_HOURS: i64 = 12;

// ---------------------------------------------------------------------------
// PIREP expiry
// ---------------------------------------------------------------------------

/// Returns `true` if a report observed at `observed` is older than
/// `max_age` relative to `now`.
///
/// Expiry is strictly older than the cutoff:
///   observed <  now - max_age  →  expired
///   observed == now - max_age  →  not expired
///
/// A cutoff before the earliest representable time expires nothing.
pub fn is_expired_at(observed: DateTime<Utc>, max_age: Duration, now: DateTime<Utc>) -> bool {
    now.checked_sub_signed(max_age)
        .is_some_and(|cutoff| observed < cutoff)
}

/// `is_expired_at` with the standard 12-hour PIREP window.
pub fn pirep_is_expired_at(observed: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    is_expired_at(observed, Duration::hours(PIREP_MAX_AGE_HOURS), now)
}

// ---------------------------------------------------------------------------
// Advisory windows
// ---------------------------------------------------------------------------

/// Where `now` falls relative to an advisory's validity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// Not yet valid.
    Pending,
    Active,
    Expired,
}

impl WindowState {
    pub fn is_active(self) -> bool {
        self == WindowState::Active
    }

    pub fn is_expired(self) -> bool {
        self == WindowState::Expired
    }
}

/// Classifies `now` against the inclusive window `[valid_from, valid_to]`.
///
/// An inverted window (`valid_from > valid_to`) is never active; it reads as
/// expired once `now` passes `valid_to` and pending before that.
pub fn window_state_at(
    valid_from: DateTime<Utc>,
    valid_to: DateTime<Utc>,
    now: DateTime<Utc>,
) -> WindowState {
    if valid_to < now {
        WindowState::Expired
    } else if valid_from <= now {
        WindowState::Active
    } else {
        WindowState::Pending
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
