//! Error types for cru-engine operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while parsing timetable text or answering queries.
#[derive(Error, Debug)]
pub enum CruError {
    /// A slot line did not match the CRU line grammar.
    ///
    /// Only [`crate::parser::parse_line`] returns this; the document parser
    /// drops the offending line and keeps going.
    #[error("Invalid slot line '{line}': {message}")]
    Parse { line: String, message: String },

    /// A time string is not `H:MM`/`HH:MM` or is out of range.
    #[error("Invalid time format, expected HH:MM: {0}")]
    InvalidTimeFormat(String),

    /// No session references the requested course.
    #[error("Unknown course: {0}")]
    CourseNotFound(String),

    /// No session references the requested room.
    #[error("Room '{0}' not found in the timetable")]
    RoomNotFound(String),

    /// A caller-supplied day, time or date argument is malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The loader found nothing to parse.
    #[error("Timetable source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CruError {
    /// True for the "lookup key matched nothing" kinds.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CruError::CourseNotFound(_) | CruError::RoomNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, CruError>;
