//! Minute-of-day arithmetic: time parsing, half-open overlap, interval merging.
//!
//! Every time in a timetable is a wall-clock `HH:MM` within one day, so the
//! whole engine works on minutes since midnight rather than full datetimes.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{CruError, Result};

/// Wall-clock time of day, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

/// Rooms open at 08:00.
pub const OPENING_TIME: TimeOfDay = TimeOfDay(8 * 60);
/// Rooms close at 20:00.
pub const CLOSING_TIME: TimeOfDay = TimeOfDay(20 * 60);

impl TimeOfDay {
    /// Build a time from hour and minute, `None` when out of range.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        (hour <= 23 && minute <= 59).then(|| TimeOfDay(hour * 60 + minute))
    }

    /// Minutes since midnight. Values past 23:59 are never produced by the parser,
    /// but grid arithmetic may step one slot past the closing time.
    pub const fn from_minutes(minutes: u16) -> Self {
        TimeOfDay(minutes)
    }

    pub const fn minutes(self) -> u16 {
        self.0
    }

    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    pub const fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = CruError;

    fn from_str(s: &str) -> Result<Self> {
        to_minutes(s).map(TimeOfDay)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Convert an `H:MM` or `HH:MM` string to minutes since midnight.
///
/// # Errors
/// Returns [`CruError::InvalidTimeFormat`] when the text is not one or two hour
/// digits, a colon and exactly two minute digits, or when the hour is above 23
/// or the minute above 59.
pub fn to_minutes(time: &str) -> Result<u16> {
    let invalid = || CruError::InvalidTimeFormat(time.to_string());

    let (hours, minutes) = time.split_once(':').ok_or_else(invalid)?;
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    if !all_digits(hours) || !all_digits(minutes) {
        return Err(invalid());
    }

    let hours: u16 = hours.parse().map_err(|_| invalid())?;
    let minutes: u16 = minutes.parse().map_err(|_| invalid())?;
    TimeOfDay::from_hm(hours, minutes)
        .map(TimeOfDay::minutes)
        .ok_or_else(invalid)
}

/// A half-open `[start, end)` range within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Interval {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// An interval whose end does not come after its start covers no time.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Length in minutes, zero for empty or inverted intervals.
    pub fn duration_minutes(&self) -> u32 {
        u32::from(self.end.minutes().saturating_sub(self.start.minutes()))
    }

    /// Strict half-open overlap: `a.start < b.end && a.end > b.start`.
    ///
    /// Touching intervals do not overlap, and an empty interval overlaps nothing,
    /// not even itself.
    pub fn overlaps(&self, other: &Interval) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.start < other.end && self.end > other.start
    }

    /// Restrict to `[window.start, window.end)`, `None` if nothing is left.
    pub fn clip(&self, window: &Interval) -> Option<Interval> {
        let clipped = Interval::new(self.start.max(window.start), self.end.min(window.end));
        (!clipped.is_empty()).then_some(clipped)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// The daily opening window, 08:00 to 20:00.
pub fn opening_window() -> Interval {
    Interval::new(OPENING_TIME, CLOSING_TIME)
}

/// Merge overlapping or touching intervals.
///
/// Returns a list sorted by start in which no two intervals overlap or touch.
/// Unlike [`Interval::overlaps`], an interval starting exactly where the previous
/// one ends is folded into it, so adjacent busy periods never leave a
/// zero-length gap between them.
pub fn merge_intervals(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for current in sorted {
        if let Some(last) = merged.last_mut() {
            if current.start <= last.end {
                last.end = last.end.max(current.end);
                continue;
            }
        }
        merged.push(current);
    }

    merged
}

/// Gaps of `window` not covered by `busy`, in order.
///
/// `busy` is clipped to the window and merged first, so callers may pass raw,
/// unsorted, overlapping intervals.
pub fn free_gaps(busy: &[Interval], window: Interval) -> Vec<Interval> {
    let clipped: Vec<Interval> = busy.iter().filter_map(|b| b.clip(&window)).collect();
    let merged = merge_intervals(&clipped);

    let mut gaps = Vec::new();
    let mut cursor = window.start;
    for interval in &merged {
        if cursor < interval.start {
            gaps.push(Interval::new(cursor, interval.start));
        }
        cursor = cursor.max(interval.end);
    }

    if cursor < window.end {
        gaps.push(Interval::new(cursor, window.end));
    }

    gaps
}
