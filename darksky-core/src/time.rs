//! Timestamp validation for precipitation batches.
//!
//! The service only answers precipitation queries for instants close to the
//! present: up to eight hours back and one hour ahead. Anything outside that
//! window is rejected locally, before a request is built.

use chrono::{DateTime, Duration, Utc};

use crate::error::Error;

/// How far back an accepted timestamp may reach, in hours.
pub const PAST_WINDOW_HOURS: i64 = 8;

/// How far ahead an accepted timestamp may reach, in hours.
pub const FUTURE_WINDOW_HOURS: i64 = 1;

/// Validate `time` against the floating window around `now` and return its
/// UTC-equivalent unix timestamp.
///
/// Both window bounds are inclusive. The accepted value is rebuilt as a
/// `DateTime<Utc>` and the instant read back, so the result is always the
/// timestamp of a well-formed UTC date-time (numerically identical to the
/// input).
pub fn normalize(now: DateTime<Utc>, time: i64) -> Result<i64, Error> {
    let earliest = (now - Duration::hours(PAST_WINDOW_HOURS)).timestamp();
    let latest = (now + Duration::hours(FUTURE_WINDOW_HOURS)).timestamp();

    if time < earliest || time > latest {
        return Err(Error::OutOfRangeTime(time));
    }

    let utc = DateTime::from_timestamp(time, 0).ok_or(Error::OutOfRangeTime(time))?;
    Ok(utc.timestamp())
}
