//! Plain-text, CSV and iCalendar renderings of query results.

use std::fmt::Write;

use cru_engine::{
    CalendarEvent, CapacityRank, Conflict, DayFreeSlots, OccupancyStats, RoomCapacity, Session,
    SessionSet,
};

pub const CSV_HEADER: &str = "courseCode,lessonType,capacity,day,startTime,endTime,room,subgroup";

const ICS_DATETIME: &str = "%Y%m%dT%H%M%S";

/// One header line plus one row per session, in schedule order.
pub fn csv(sessions: &SessionSet) -> String {
    let mut rows: Vec<&Session> = sessions.iter().collect();
    rows.sort_by(|a, b| a.schedule_cmp(b).then_with(|| a.room.cmp(&b.room)));

    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for s in rows {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            s.course_code, s.lesson_type, s.capacity, s.day, s.start, s.end, s.room, s.subgroup
        );
    }
    out
}

/// A minimal VCALENDAR with one VEVENT per event, CRLF line endings.
pub fn icalendar(events: &[CalendarEvent], uid_domain: &str) -> String {
    let mut lines = vec!["BEGIN:VCALENDAR".to_string(), "VERSION:2.0".to_string()];
    lines.push("PRODID:-//cru//timetable//EN".to_string());

    for (index, event) in events.iter().enumerate() {
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!(
            "UID:cru-{}-{}-{}@{}",
            event.course_code,
            event.begin.format("%Y%m%d"),
            index,
            uid_domain
        ));
        lines.push(format!("DTSTART:{}", event.begin.format(ICS_DATETIME)));
        lines.push(format!("DTEND:{}", event.end.format(ICS_DATETIME)));
        lines.push(format!("SUMMARY:{}", event.summary()));
        lines.push(format!("LOCATION:{}", event.room));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());
    lines.join("\r\n") + "\r\n"
}

pub fn rooms(course: &str, rooms: &[RoomCapacity]) -> String {
    let mut out = format!("Rooms for course {course}:\n");
    for r in rooms {
        let _ = writeln!(out, "  {} - {} seats", r.room, r.capacity);
    }
    out
}

pub fn free_slots(days: &[DayFreeSlots]) -> String {
    let mut out = String::new();
    for day in days {
        if day.slots.is_empty() {
            let _ = writeln!(out, "{}: no free slot", day.day);
            continue;
        }
        let slots: Vec<String> = day
            .slots
            .iter()
            .map(|s| format!("{}-{}", s.start, s.end))
            .collect();
        let _ = writeln!(out, "{}: {}", day.day, slots.join(", "));
    }
    out
}

pub fn conflicts(conflicts: &[Conflict]) -> String {
    if conflicts.is_empty() {
        return "No conflict detected\n".to_string();
    }
    let mut out = String::new();
    for c in conflicts {
        let _ = writeln!(
            out,
            "Room {}, {} {}-{} ({}) overlaps {}-{} ({})",
            c.room,
            c.day,
            c.first.start,
            c.first.end,
            c.first.course_code,
            c.second.start,
            c.second.end,
            c.second.course_code
        );
    }
    out
}

pub fn occupancy(stats: &OccupancyStats) -> String {
    let mut out = String::new();
    for r in &stats.per_room {
        let _ = writeln!(out, "{}: {:.2}% occupied", r.room, r.rate);
    }
    let _ = writeln!(out, "Average occupancy: {:.2}%", stats.average);
    out
}

pub fn ranking(ranking: &[CapacityRank]) -> String {
    let mut out = String::new();
    for r in ranking {
        let _ = writeln!(out, "{} seats: {} room(s)", r.capacity, r.rooms_count);
    }
    out
}

pub fn backup(broken: &str, candidates: &[RoomCapacity]) -> String {
    if candidates.is_empty() {
        return format!("No backup room found for {broken}\n");
    }
    let mut out = format!("Backup rooms for {broken}:\n");
    for r in candidates {
        let _ = writeln!(out, "  {} - {} seats", r.room, r.capacity);
    }
    out
}

pub fn lines(items: &[String]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(item);
        out.push('\n');
    }
    out
}
