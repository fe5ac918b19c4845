//! Detect double-booked rooms.
//!
//! Performs a pairwise comparison over every session to find two bookings of
//! the same room whose times overlap. Adjacent sessions (one ends exactly when
//! the other starts) are NOT conflicts.

use serde::Serialize;

use crate::collection::SessionSet;
use crate::session::{Day, Session};

/// Two sessions booked into the same room at overlapping times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict {
    pub room: String,
    pub day: Day,
    pub first: Session,
    pub second: Session,
    pub overlap_minutes: u32,
}

/// Find every pair of overlapping sessions.
///
/// Sessions are ordered by `(day, start, room)` and then every pair is tested,
/// not only neighbours, so a long session overlapping several shorter ones
/// yields one conflict per pair. In each pair `first` sorts before `second`.
/// This is quadratic in the number of sessions.
pub fn find_conflicts(sessions: &SessionSet) -> Vec<Conflict> {
    let mut ordered: Vec<&Session> = sessions.iter().collect();
    ordered.sort_by(|a, b| a.schedule_cmp(b).then_with(|| a.room.cmp(&b.room)));

    let mut conflicts = Vec::new();
    for (i, a) in ordered.iter().enumerate() {
        for b in &ordered[i + 1..] {
            if a.overlaps(b) {
                let overlap_start = a.start.max(b.start);
                let overlap_end = a.end.min(b.end);
                conflicts.push(Conflict {
                    room: a.room.clone(),
                    day: a.day,
                    first: (*a).clone(),
                    second: (*b).clone(),
                    overlap_minutes: u32::from(overlap_end.minutes() - overlap_start.minutes()),
                });
            }
        }
    }

    conflicts
}
