//! Free time within the daily opening window.
//!
//! Two views are offered:
//!
//! - [`free_slots_for_room`] merges a room's busy periods and reports the exact
//!   gaps between them.
//! - [`common_free_slots`] lays a half-hour grid over the day and reports runs
//!   of cells where none of the given courses has a session.

use serde::Serialize;

use crate::collection::SessionSet;
use crate::error::{CruError, Result};
use crate::interval::{free_gaps, opening_window, Interval, TimeOfDay};
use crate::session::{Day, Session};

/// Width of one cell in the common-free-slot grid.
pub const GRID_STEP_MINUTES: u16 = 30;

/// A free time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreeSlot {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub duration_minutes: u32,
}

impl From<Interval> for FreeSlot {
    fn from(interval: Interval) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
            duration_minutes: interval.duration_minutes(),
        }
    }
}

/// Free slots of one weekday, in time order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayFreeSlots {
    pub day: Day,
    pub slots: Vec<FreeSlot>,
}

/// Free slots of `room` for each weekday, Monday first.
///
/// Busy periods are clipped to 08:00-20:00 and merged, touching ones
/// included, before the gaps are taken. A fully booked day has no slots.
///
/// # Errors
/// [`CruError::RoomNotFound`] when no session uses the room (ASCII case ignored).
pub fn free_slots_for_room(sessions: &SessionSet, room: &str) -> Result<Vec<DayFreeSlots>> {
    let booked: Vec<&Session> = sessions.iter().filter(|s| s.is_in_room(room)).collect();
    if booked.is_empty() {
        return Err(CruError::RoomNotFound(room.to_string()));
    }

    Ok(Day::ALL
        .iter()
        .map(|&day| {
            let busy: Vec<Interval> = booked
                .iter()
                .filter(|s| s.day == day)
                .map(|s| s.interval())
                .collect();
            DayFreeSlots {
                day,
                slots: free_gaps(&busy, opening_window())
                    .into_iter()
                    .map(FreeSlot::from)
                    .collect(),
            }
        })
        .collect())
}

/// Half-hour cells of the opening window, 08:00-08:30 through 19:30-20:00.
fn grid_cells() -> Vec<Interval> {
    let window = opening_window();
    (window.start.minutes()..window.end.minutes())
        .step_by(usize::from(GRID_STEP_MINUTES))
        .map(|m| {
            Interval::new(
                TimeOfDay::from_minutes(m),
                TimeOfDay::from_minutes(m + GRID_STEP_MINUTES),
            )
        })
        .collect()
}

/// Slots where none of `course_codes` has a session, per weekday.
///
/// A half-hour cell is busy as soon as any session of a listed course
/// overlaps it, in any room, so a session ending at 10:15 blocks 10:00-10:30.
/// Consecutive free cells are joined into maximal runs. With no courses every
/// day is free from 08:00 to 20:00.
pub fn common_free_slots<S: AsRef<str>>(
    sessions: &SessionSet,
    course_codes: &[S],
) -> Vec<DayFreeSlots> {
    let selected: Vec<&Session> = sessions
        .iter()
        .filter(|s| course_codes.iter().any(|c| c.as_ref() == s.course_code))
        .collect();
    let cells = grid_cells();

    Day::ALL
        .iter()
        .map(|&day| {
            let mut slots: Vec<FreeSlot> = Vec::new();
            let mut run: Option<Interval> = None;

            for cell in &cells {
                let busy = selected
                    .iter()
                    .any(|s| s.day == day && s.interval().overlaps(cell));
                if busy {
                    if let Some(closed) = run.take() {
                        slots.push(closed.into());
                    }
                    continue;
                }
                match run {
                    Some(ref mut open) => open.end = cell.end,
                    None => run = Some(*cell),
                }
            }
            if let Some(closed) = run {
                slots.push(closed.into());
            }

            DayFreeSlots { day, slots }
        })
        .collect()
}
