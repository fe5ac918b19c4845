//! The `Session` value and its building blocks: weekday, lesson type.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Serialize, Serializer};

use crate::error::{CruError, Result};
use crate::interval::{Interval, TimeOfDay};

/// Teaching weekday. Declaration order is the schedule order `L < MA < ME < J < V`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    pub const ALL: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// The code used in CRU files: `L`, `MA`, `ME`, `J` or `V`.
    pub fn code(self) -> &'static str {
        match self {
            Day::Monday => "L",
            Day::Tuesday => "MA",
            Day::Wednesday => "ME",
            Day::Thursday => "J",
            Day::Friday => "V",
        }
    }

    /// Days since Monday.
    pub fn offset(self) -> u32 {
        self as u32
    }

    pub fn weekday(self) -> Weekday {
        match self {
            Day::Monday => Weekday::Mon,
            Day::Tuesday => Weekday::Tue,
            Day::Wednesday => Weekday::Wed,
            Day::Thursday => Weekday::Thu,
            Day::Friday => Weekday::Fri,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Day {
    type Err = CruError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Day::Monday),
            "MA" => Ok(Day::Tuesday),
            "ME" => Ok(Day::Wednesday),
            "J" => Ok(Day::Thursday),
            "V" => Ok(Day::Friday),
            _ => Err(CruError::InvalidInput(format!(
                "invalid day '{s}', expected one of L, MA, ME, J, V"
            ))),
        }
    }
}

impl Serialize for Day {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Normalized session category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LessonType {
    /// `CM`, raw codes starting with `C`.
    Lecture,
    /// `TD`, raw codes starting with `D`.
    Tutorial,
    /// `TP`, raw codes starting with `T`.
    Lab,
    /// Any other raw code, kept verbatim.
    Other(String),
}

impl LessonType {
    /// Map a raw code such as `C1`, `D2` or `T1` by its first letter.
    pub fn from_raw(raw: &str) -> Self {
        match raw.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => LessonType::Lecture,
            Some('D') => LessonType::Tutorial,
            Some('T') => LessonType::Lab,
            _ => LessonType::Other(raw.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            LessonType::Lecture => "CM",
            LessonType::Tutorial => "TD",
            LessonType::Lab => "TP",
            LessonType::Other(raw) => raw,
        }
    }
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for LessonType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// One weekly class occurrence from a CRU file.
///
/// Equality covers all nine fields. `Ord` is deliberately not implemented:
/// the schedule order only looks at day and start time, so it would disagree
/// with `Eq`. Use [`Session::schedule_cmp`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Session {
    pub course_code: String,
    pub lesson_type: LessonType,
    pub capacity: u32,
    pub day: Day,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub room: String,
    pub subgroup: String,
    /// Leading index of the slot line; `None` when it does not fit in a `u32`.
    pub group_index: Option<u32>,
}

impl Session {
    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    /// Occupied minutes; inverted sessions count as zero.
    pub fn duration_minutes(&self) -> u32 {
        self.interval().duration_minutes()
    }

    /// Same day, same room, and strictly overlapping times.
    pub fn overlaps(&self, other: &Session) -> bool {
        self.overlaps_at(other.day, other.interval(), &other.room)
    }

    /// Would this session collide with a booking of `room` on `day` during `interval`?
    pub fn overlaps_at(&self, day: Day, interval: Interval, room: &str) -> bool {
        self.day == day && self.room == room && self.interval().overlaps(&interval)
    }

    /// Compare by `(day, start)` only.
    pub fn schedule_cmp(&self, other: &Session) -> Ordering {
        (self.day, self.start).cmp(&(other.day, other.start))
    }

    /// Whether the session is held in `room`, ignoring ASCII case.
    pub fn is_in_room(&self, room: &str) -> bool {
        self.room.eq_ignore_ascii_case(room)
    }
}
