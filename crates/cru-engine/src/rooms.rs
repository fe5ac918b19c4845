//! Room lookups: rooms used by a course, room capacity, capacity ranking and
//! backup-room search.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::collection::SessionSet;
use crate::error::{CruError, Result};
use crate::interval::{Interval, TimeOfDay};
use crate::session::{Day, Session};

/// A room and the largest capacity recorded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomCapacity {
    pub room: String,
    pub capacity: u32,
}

/// One bucket of the capacity ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityRank {
    pub capacity: u32,
    pub rooms_count: usize,
}

/// Reference slot probed when looking for a backup room: Monday 10:00-12:00.
pub const BACKUP_PROBE_DAY: Day = Day::Monday;
pub const BACKUP_PROBE_START: TimeOfDay = TimeOfDay::from_minutes(10 * 60);
pub const BACKUP_PROBE_END: TimeOfDay = TimeOfDay::from_minutes(12 * 60);

/// Largest capacity recorded per room, keyed by upper-cased room code.
fn max_capacity_by_room<'a, I>(sessions: I) -> BTreeMap<String, u32>
where
    I: IntoIterator<Item = &'a Session>,
{
    let mut capacities: BTreeMap<String, u32> = BTreeMap::new();
    for session in sessions {
        let entry = capacities
            .entry(session.room.to_ascii_uppercase())
            .or_insert(0);
        *entry = (*entry).max(session.capacity);
    }
    capacities
}

/// Rooms hosting `course_code`, each with the largest capacity seen there.
///
/// Results are sorted by room code.
///
/// # Errors
/// [`CruError::CourseNotFound`] when no session belongs to the course.
pub fn rooms_for_course(sessions: &SessionSet, course_code: &str) -> Result<Vec<RoomCapacity>> {
    let capacities =
        max_capacity_by_room(sessions.iter().filter(|s| s.course_code == course_code));
    if capacities.is_empty() {
        return Err(CruError::CourseNotFound(course_code.to_string()));
    }

    Ok(capacities
        .into_iter()
        .map(|(room, capacity)| RoomCapacity { room, capacity })
        .collect())
}

/// Largest capacity recorded for `room`, ignoring ASCII case.
///
/// # Errors
/// [`CruError::RoomNotFound`] when the room never appears.
pub fn room_capacity(sessions: &SessionSet, room: &str) -> Result<u32> {
    sessions
        .iter()
        .filter(|s| s.is_in_room(room))
        .map(|s| s.capacity)
        .max()
        .ok_or_else(|| CruError::RoomNotFound(room.to_string()))
}

/// Group distinct rooms by their largest capacity, biggest capacity first.
pub fn capacity_ranking(sessions: &SessionSet) -> Vec<CapacityRank> {
    let mut buckets: BTreeMap<u32, usize> = BTreeMap::new();
    for capacity in max_capacity_by_room(sessions).into_values() {
        *buckets.entry(capacity).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .rev()
        .map(|(capacity, rooms_count)| CapacityRank {
            capacity,
            rooms_count,
        })
        .collect()
}

/// The building a room belongs to: the first character of its code.
pub fn building_of(room: &str) -> Option<char> {
    room.chars().next().map(|c| c.to_ascii_uppercase())
}

/// Rooms that could replace `broken_room`.
///
/// A candidate is in the same building, is free during the reference slot
/// (Monday 10:00-12:00) and holds at least as many seats as the broken room.
/// Candidates are sorted by ascending capacity, then room code, so the
/// tightest fit comes first. An empty list means no backup exists.
///
/// # Errors
/// [`CruError::RoomNotFound`] when `broken_room` never appears.
pub fn backup_rooms(sessions: &SessionSet, broken_room: &str) -> Result<Vec<RoomCapacity>> {
    let needed = room_capacity(sessions, broken_room)?;
    let building = building_of(broken_room);
    let broken = broken_room.to_ascii_uppercase();

    let probe = Interval::new(BACKUP_PROBE_START, BACKUP_PROBE_END);
    // Room codes differing only in case are one room: any booking makes it busy.
    let busy: HashSet<String> = sessions
        .iter()
        .filter(|s| s.day == BACKUP_PROBE_DAY && s.interval().overlaps(&probe))
        .map(|s| s.room.to_ascii_uppercase())
        .collect();

    let mut candidates: Vec<RoomCapacity> = max_capacity_by_room(sessions)
        .into_iter()
        .filter(|(room, capacity)| {
            *room != broken
                && building_of(room) == building
                && !busy.contains(room)
                && *capacity >= needed
        })
        .map(|(room, capacity)| RoomCapacity { room, capacity })
        .collect();

    candidates.sort_by(|a, b| {
        a.capacity
            .cmp(&b.capacity)
            .then_with(|| a.room.cmp(&b.room))
    });
    tracing::debug!(
        room = broken_room,
        needed,
        found = candidates.len(),
        "backup room search"
    );

    Ok(candidates)
}
