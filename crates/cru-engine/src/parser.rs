//! CRU document parser.
//!
//! A CRU export is a loose text dump: a free-form preamble, then one block per
//! course introduced by a `+CODE` header and followed by slot lines such as
//!
//! ```text
//! +ME01
//! 1,D1,P=24,H=ME 16:00-18:00,F1,S=S104//
//! ```
//!
//! and a `Page générée en ...` footer. Parsing is best-effort: a malformed slot
//! line is logged and dropped, never fatal to the rest of the document.
//!
//! # Key design decisions
//!
//! - **Explicit scan state**: the current course lives in [`DocumentState`],
//!   threaded through the scan instead of shared mutable state.
//! - **Two-stage matching**: a cheap `digits,` shape test decides whether a
//!   line is meant to be a slot at all; only those lines go through the full
//!   grammar, so stray prose never produces warnings.
//! - **Permissive hours**: `8:00` and `08:00` are both accepted and normalize
//!   to the same [`TimeOfDay`](crate::interval::TimeOfDay).

use std::sync::LazyLock;

use regex::Regex;

use crate::collection::SessionSet;
use crate::error::{CruError, Result};
use crate::interval::TimeOfDay;
use crate::session::{Day, LessonType, Session};

static SLOT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]+)\s*,\s*([A-Za-z]+[0-9]+)\s*,\s*P=\s*([0-9]{1,3})\s*,\s*H=\s*(L|MA|ME|J|V)\s+([0-9]{1,2}:[0-9]{2})-([0-9]{1,2}:[0-9]{2})\s*,\s*([A-Za-z][0-9])\s*,\s*S=\s*([A-Za-z0-9]{4})//\s*$",
    )
    .expect("slot line pattern is valid")
});

static SLOT_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\s*,").expect("slot shape pattern is valid"));

const FOOTER_PREFIX: &str = "Page ";
const COURSE_PREFIX: char = '+';

/// Parse one slot line belonging to `course_code`.
///
/// `line` is expected to be trimmed already.
///
/// # Errors
/// Returns [`CruError::Parse`] naming the line when it does not match the slot
/// grammar or carries an out-of-range time such as `25:00`.
pub fn parse_line(line: &str, course_code: &str) -> Result<Session> {
    let reject = |message: &str| CruError::Parse {
        line: line.to_string(),
        message: message.to_string(),
    };

    let caps = SLOT_LINE
        .captures(line)
        .ok_or_else(|| reject("does not match the slot grammar"))?;

    // Carried through only; an index too large for u32 is dropped, not the line.
    let group_index: Option<u32> = caps[1].parse().ok();
    let capacity: u32 = caps[3]
        .parse()
        .map_err(|_| reject("capacity is not a number"))?;
    let day: Day = caps[4].parse().map_err(|_| reject("unknown day code"))?;
    let start: TimeOfDay = caps[5]
        .parse()
        .map_err(|e: CruError| reject(&e.to_string()))?;
    let end: TimeOfDay = caps[6]
        .parse()
        .map_err(|e: CruError| reject(&e.to_string()))?;

    Ok(Session {
        course_code: course_code.to_string(),
        lesson_type: LessonType::from_raw(&caps[2]),
        capacity,
        day,
        start,
        end,
        room: caps[8].to_string(),
        subgroup: caps[7].to_string(),
        group_index,
    })
}

/// Where the scan stands between two lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Before the first real course header, or after a placeholder header.
    NoCourse,
    /// Slot lines belong to the current course.
    InCourse,
}

/// Line-by-line scan state for one document.
#[derive(Debug, Clone)]
pub struct DocumentState {
    current_course: Option<String>,
    mode: ScanMode,
}

impl Default for DocumentState {
    fn default() -> Self {
        Self::new()
    }
}

/// What the scanner decided to do with one line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Session(Session),
    CourseHeader(String),
    PlaceholderHeader,
    Rejected(String),
    Skipped,
}

impl DocumentState {
    pub fn new() -> Self {
        Self {
            current_course: None,
            mode: ScanMode::NoCourse,
        }
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn current_course(&self) -> Option<&str> {
        self.current_course.as_deref()
    }

    /// Advance the state machine over one raw line.
    pub fn feed(&mut self, raw_line: &str) -> LineOutcome {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(FOOTER_PREFIX) {
            return LineOutcome::Skipped;
        }

        if let Some(header) = line.strip_prefix(COURSE_PREFIX) {
            let code = header.trim();
            // Headers without any digit, like "+UVUV", are template examples.
            if code.chars().any(|c| c.is_ascii_digit()) {
                self.current_course = Some(code.to_string());
                self.mode = ScanMode::InCourse;
                return LineOutcome::CourseHeader(code.to_string());
            }
            self.current_course = None;
            self.mode = ScanMode::NoCourse;
            return LineOutcome::PlaceholderHeader;
        }

        if !SLOT_SHAPE.is_match(line) {
            return LineOutcome::Skipped;
        }

        match (self.mode, self.current_course.as_deref()) {
            (ScanMode::InCourse, Some(course)) => match parse_line(line, course) {
                Ok(session) => LineOutcome::Session(session),
                Err(e) => LineOutcome::Rejected(e.to_string()),
            },
            _ => LineOutcome::Skipped,
        }
    }
}

/// Parse a whole CRU document into a new set.
pub fn parse_document(text: &str) -> SessionSet {
    let mut sessions = SessionSet::new();
    parse_document_into(text, &mut sessions);
    sessions
}

/// Parse a CRU document, adding its sessions to `target`.
///
/// Returns the number of sessions that were new to `target`.
pub fn parse_document_into(text: &str, target: &mut SessionSet) -> usize {
    let mut state = DocumentState::new();
    let mut added = 0;

    for (idx, line) in text.lines().enumerate() {
        match state.feed(line) {
            LineOutcome::Session(session) => {
                if target.insert(session) {
                    added += 1;
                }
            }
            LineOutcome::CourseHeader(code) => {
                tracing::debug!(line = idx + 1, course = %code, "course header");
            }
            LineOutcome::PlaceholderHeader => {
                tracing::debug!(line = idx + 1, "ignoring placeholder course header");
            }
            LineOutcome::Rejected(reason) => {
                tracing::warn!(line = idx + 1, "skipping invalid slot line: {}", reason);
            }
            LineOutcome::Skipped => {
                if !line.trim().is_empty() {
                    tracing::trace!(line = idx + 1, "skipping line");
                }
            }
        }
    }

    added
}
