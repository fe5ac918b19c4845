//! # cru-engine
//!
//! Parser and scheduling queries for CRU university timetable exports.
//!
//! A CRU file lists, per course, the weekly sessions of that course: lesson
//! type, room capacity, weekday, time range, subgroup and room. This crate turns
//! that text into typed [`Session`] values collected in a deduplicating
//! [`SessionSet`], and answers room questions over it with plain functions.
//!
//! ## Quick start
//!
//! ```rust
//! use cru_engine::{parse_document, find_conflicts, room_capacity};
//!
//! let text = "+ME01\n1,D1,P=24,H=ME 16:00-18:00,F1,S=S104//\n";
//! let sessions = parse_document(text);
//! assert_eq!(sessions.len(), 1);
//! assert_eq!(room_capacity(&sessions, "s104").unwrap(), 24);
//! assert!(find_conflicts(&sessions).is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`session`]: `Session`, `Day`, `LessonType`
//! - [`interval`]: minute-of-day parsing, overlap test, interval merging
//! - [`collection`]: `SessionSet`
//! - [`parser`]: line grammar and document scan
//! - [`rooms`]: rooms per course, capacity, ranking, backup rooms
//! - [`freebusy`]: free slots per room and common free slots per course list
//! - [`availability`]: rooms free during a requested interval
//! - [`conflict`]: double-booked rooms
//! - [`occupancy`]: weekly occupancy rates
//! - [`calendar`]: sessions pinned to dates for calendar export
//! - [`source`]: loading documents from a data directory
//! - [`error`]: error types

pub mod availability;
pub mod calendar;
pub mod collection;
pub mod conflict;
pub mod error;
pub mod freebusy;
pub mod interval;
pub mod occupancy;
pub mod parser;
pub mod rooms;
pub mod session;
pub mod source;

pub use availability::{available_rooms, available_rooms_at};
pub use calendar::{calendar_events, calendar_events_between, CalendarEvent};
pub use collection::SessionSet;
pub use conflict::{find_conflicts, Conflict};
pub use error::{CruError, Result};
pub use freebusy::{common_free_slots, free_slots_for_room, DayFreeSlots, FreeSlot};
pub use interval::{merge_intervals, to_minutes, Interval, TimeOfDay};
pub use occupancy::{occupancy_stats, OccupancyStats, RoomOccupancy};
pub use parser::{parse_document, parse_document_into, parse_line};
pub use rooms::{
    backup_rooms, capacity_ranking, room_capacity, rooms_for_course, CapacityRank, RoomCapacity,
};
pub use session::{Day, LessonType, Session};
pub use source::load_directory;
