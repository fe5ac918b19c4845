//! Room availability for a requested time interval.
//!
//! A room is free for `(day, start, end)` when none of its sessions overlaps
//! that interval under the strict half-open rule, so a booking that ends
//! exactly when the request starts does not block it.

use crate::collection::SessionSet;
use crate::error::{CruError, Result};
use crate::interval::{Interval, TimeOfDay};
use crate::session::Day;

/// Rooms with no session overlapping `day` between `start` and `end`.
///
/// Arguments are raw user strings: `start`/`end` as `H:MM` or `HH:MM`, `day` as
/// one of `L`, `MA`, `ME`, `J`, `V`. Every argument is validated before any
/// session is looked at. The result is sorted and may be empty.
///
/// An empty or inverted request (`start >= end`) is an error rather than a
/// list of every room: such an interval overlaps nothing, so every room would
/// trivially qualify.
///
/// # Errors
/// [`CruError::InvalidInput`] when a time is malformed or out of range, the day
/// is unknown, or `start` is not before `end`.
pub fn available_rooms(
    sessions: &SessionSet,
    start: &str,
    end: &str,
    day: &str,
) -> Result<Vec<String>> {
    let interval = parse_request(start, end)?;
    let day: Day = day.parse()?;
    Ok(available_rooms_at(sessions, day, interval))
}

/// Validate a user-supplied `start`/`end` pair into a non-empty interval.
pub fn parse_request(start: &str, end: &str) -> Result<Interval> {
    let parse = |label: &str, value: &str| {
        value.parse::<TimeOfDay>().map_err(|_| {
            CruError::InvalidInput(format!("invalid {label} time, expected HH:MM: {value}"))
        })
    };
    let interval = Interval::new(parse("start", start)?, parse("end", end)?);
    if interval.is_empty() {
        return Err(CruError::InvalidInput(format!(
            "start time {start} must be before end time {end}"
        )));
    }
    Ok(interval)
}

/// Rooms known to `sessions` that are free on `day` during `interval`, sorted.
pub fn available_rooms_at(sessions: &SessionSet, day: Day, interval: Interval) -> Vec<String> {
    sessions
        .rooms()
        .into_iter()
        .filter(|room| !sessions.iter().any(|s| s.overlaps_at(day, interval, room)))
        .collect()
}
