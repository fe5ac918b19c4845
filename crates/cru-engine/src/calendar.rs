//! Calendar view of a timetable: weekly sessions pinned to real dates.
//!
//! A CRU session only says "Wednesday 16:00-18:00". To put it in a calendar we
//! anchor it to a reference week, Monday-based, and produce one event per
//! session per week. Serializing events (ICS, etc.) is left to the caller.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::collection::SessionSet;
use crate::error::{CruError, Result};
use crate::interval::TimeOfDay;
use crate::session::{LessonType, Session};

/// One dated occurrence of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub course_code: String,
    pub lesson_type: LessonType,
    pub subgroup: String,
    pub room: String,
    pub begin: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl CalendarEvent {
    /// Human title, e.g. `ME01 TD (F1)`.
    pub fn summary(&self) -> String {
        if self.subgroup.is_empty() {
            format!("{} {}", self.course_code, self.lesson_type)
        } else {
            format!("{} {} ({})", self.course_code, self.lesson_type, self.subgroup)
        }
    }
}

/// The Monday of the week containing `date`, `None` if it precedes
/// [`NaiveDate::MIN`].
pub fn week_monday(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
}

fn at(date: NaiveDate, time: TimeOfDay) -> Option<NaiveDateTime> {
    let seconds = u32::from(time.minutes()) * 60;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).map(|t| date.and_time(t))
}

fn is_selected<S: AsRef<str>>(session: &Session, courses: &[S]) -> bool {
    courses.is_empty() || courses.iter().any(|c| c.as_ref() == session.course_code)
}

/// Events for the week containing `reference`, one per session.
///
/// `courses` is an allow-list of course codes; an empty list keeps every
/// course. Events come out in schedule order, ties broken by room. Sessions
/// whose date falls outside chrono's calendar range are left out.
pub fn calendar_events<S: AsRef<str>>(
    sessions: &SessionSet,
    reference: NaiveDate,
    courses: &[S],
) -> Vec<CalendarEvent> {
    let Some(monday) = week_monday(reference) else {
        return Vec::new();
    };

    let mut selected: Vec<&Session> = sessions
        .iter()
        .filter(|s| is_selected(s, courses))
        .collect();
    selected.sort_by(|a, b| a.schedule_cmp(b).then_with(|| a.room.cmp(&b.room)));

    selected
        .into_iter()
        .filter_map(|s| {
            let date = monday.checked_add_days(Days::new(u64::from(s.day.offset())))?;
            Some(CalendarEvent {
                course_code: s.course_code.clone(),
                lesson_type: s.lesson_type.clone(),
                subgroup: s.subgroup.clone(),
                room: s.room.clone(),
                begin: at(date, s.start)?,
                end: at(date, s.end)?,
            })
        })
        .collect()
}

/// Events for every week overlapping `[start, end]`, keeping only those dated
/// inside the period.
///
/// # Errors
/// [`CruError::InvalidInput`] when `end` is before `start`, or when the week
/// of `start` begins before the earliest representable date.
pub fn calendar_events_between<S: AsRef<str>>(
    sessions: &SessionSet,
    start: NaiveDate,
    end: NaiveDate,
    courses: &[S],
) -> Result<Vec<CalendarEvent>> {
    if end < start {
        return Err(CruError::InvalidInput(format!(
            "end date {end} is before start date {start}"
        )));
    }

    let mut events = Vec::new();
    let mut monday = week_monday(start).ok_or_else(|| {
        CruError::InvalidInput(format!("start date {start} is out of calendar range"))
    })?;
    while monday <= end {
        events.extend(
            calendar_events(sessions, monday, courses)
                .into_iter()
                .filter(|e| (start..=end).contains(&e.begin.date())),
        );
        // Last representable week reached.
        let Some(next) = monday.checked_add_days(Days::new(7)) else {
            break;
        };
        monday = next;
    }

    Ok(events)
}
