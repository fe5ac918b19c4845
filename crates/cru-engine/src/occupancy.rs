//! Room occupancy statistics over the teaching week.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::collection::SessionSet;

/// Hours a room can be booked per week: 08:00-20:00, Monday to Friday.
pub const TOTAL_AVAILABLE_HOURS: f64 = 60.0;

/// Weekly usage of one room.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomOccupancy {
    pub room: String,
    pub booked_minutes: u32,
    /// Booked hours as a percentage of [`TOTAL_AVAILABLE_HOURS`].
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancyStats {
    /// One entry per room with at least one session, sorted by room.
    pub per_room: Vec<RoomOccupancy>,
    /// Mean of the per-room rates, 0 when there are no rooms.
    pub average: f64,
}

/// Sum booked minutes per room and turn them into occupancy rates.
///
/// Overlapping sessions in the same room are counted twice; the rate can
/// therefore exceed 100% on a double-booked timetable.
pub fn occupancy_stats(sessions: &SessionSet) -> OccupancyStats {
    let mut minutes: BTreeMap<&str, u32> = BTreeMap::new();
    for session in sessions {
        *minutes.entry(session.room.as_str()).or_insert(0) += session.duration_minutes();
    }

    let per_room: Vec<RoomOccupancy> = minutes
        .into_iter()
        .map(|(room, booked_minutes)| RoomOccupancy {
            room: room.to_string(),
            booked_minutes,
            rate: f64::from(booked_minutes) / 60.0 / TOTAL_AVAILABLE_HOURS * 100.0,
        })
        .collect();

    let average = if per_room.is_empty() {
        0.0
    } else {
        per_room.iter().map(|r| r.rate).sum::<f64>() / per_room.len() as f64
    };

    OccupancyStats { per_room, average }
}
