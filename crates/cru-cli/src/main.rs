//! `cru` CLI: query room usage in CRU timetable exports.
//!
//! ## Usage
//!
//! ```sh
//! # Rooms used by a course, with their capacity
//! cru search-rooms ME01
//!
//! # Free slots of one room over the week
//! cru free-slots S104
//!
//! # Rooms free on Monday between 10:00 and 12:00
//! cru available-rooms 10:00 12:00 L
//!
//! # Double-booked rooms, as JSON
//! cru --json check-conflicts
//!
//! # Calendar for two courses over a period
//! cru generate-icalendar --start 2026-03-16 --end 2026-04-10 -c ME01,MT02 -o agenda.ics
//!
//! # Parse a single file and dump its sessions
//! cru parse -i data/AB/edt.cru
//! ```
//!
//! Documents are read from `<data_dir>/<unit>/edt.cru`; see `config.rs` for how
//! the data directory is resolved.

mod config;
mod render;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use cru_engine::SessionSet;

#[derive(Parser)]
#[command(name = "cru", version, about = "Room usage queries over CRU timetables")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to $CRU_CONFIG, ./cru.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding one subdirectory per timetable unit
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the rooms used by a course
    SearchRooms {
        /// Course code, e.g. ME01
        course: String,
    },
    /// Show the capacity of a room
    RoomCapacity {
        /// Room code, case-insensitive
        room: String,
    },
    /// Show the free slots of a room for each weekday
    FreeSlots {
        /// Room code, case-insensitive
        room: String,
    },
    /// List rooms free during a time interval
    AvailableRooms {
        /// Start time (HH:MM)
        start: String,
        /// End time (HH:MM)
        end: String,
        /// Day (L, MA, ME, J, V)
        day: String,
    },
    /// Report double-booked rooms
    CheckConflicts,
    /// Show weekly occupancy rate per room
    RoomUsageStats,
    /// Group rooms by capacity, largest first
    RankRooms,
    /// Find slots where none of the given courses has a session
    CommonFreeSlots {
        /// Course codes; none means the whole week is free
        courses: Vec<String>,
    },
    /// Suggest replacement rooms for an unavailable room
    BackupRoom {
        /// Room code, case-insensitive
        room: String,
    },
    /// List every course code
    Courses,
    /// List every room
    Rooms,
    /// Export all sessions as CSV
    ExportCsv {
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Generate an iCalendar file for a period
    GenerateIcalendar {
        /// First day of the period (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Last day of the period (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        /// Comma-separated course codes to include (all if omitted)
        #[arg(short, long)]
        courses: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Domain used in event UIDs (overrides the config)
        #[arg(long)]
        uid_domain: Option<String>,
    },
    /// Parse one CRU document and print its sessions as JSON
    Parse {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    init_tracing(&config.log_level);

    let json = cli.json;
    match cli.command {
        Commands::SearchRooms { course } => {
            let sessions = load(&config)?;
            let rooms = cru_engine::rooms_for_course(&sessions, &course)
                .with_context(|| format!("Failed to search rooms for course {course}"))?;
            emit(json, &rooms, |r| render::rooms(&course, r))?;
        }
        Commands::RoomCapacity { room } => {
            let sessions = load(&config)?;
            let capacity = cru_engine::room_capacity(&sessions, &room)
                .context("Failed to look up room capacity")?;
            emit(json, &capacity, |c| {
                format!("Room {} has {} seats\n", room.to_uppercase(), c)
            })?;
        }
        Commands::FreeSlots { room } => {
            let sessions = load(&config)?;
            let days = cru_engine::free_slots_for_room(&sessions, &room)
                .context("Failed to compute free slots")?;
            emit(json, &days, |d| render::free_slots(d))?;
        }
        Commands::AvailableRooms { start, end, day } => {
            let sessions = load(&config)?;
            let rooms = cru_engine::available_rooms(&sessions, &start, &end, &day)
                .context("Failed to compute available rooms")?;
            emit(json, &rooms, |r| render::lines(r))?;
        }
        Commands::CheckConflicts => {
            let sessions = load(&config)?;
            let conflicts = cru_engine::find_conflicts(&sessions);
            emit(json, &conflicts, |c| render::conflicts(c))?;
        }
        Commands::RoomUsageStats => {
            let sessions = load(&config)?;
            let stats = cru_engine::occupancy_stats(&sessions);
            emit(json, &stats, render::occupancy)?;
        }
        Commands::RankRooms => {
            let sessions = load(&config)?;
            let ranking = cru_engine::capacity_ranking(&sessions);
            emit(json, &ranking, |r| render::ranking(r))?;
        }
        Commands::CommonFreeSlots { courses } => {
            let sessions = load(&config)?;
            let days = cru_engine::common_free_slots(&sessions, courses.as_slice());
            emit(json, &days, |d| render::free_slots(d))?;
        }
        Commands::BackupRoom { room } => {
            let sessions = load(&config)?;
            let candidates = cru_engine::backup_rooms(&sessions, &room)
                .context("Failed to search backup rooms")?;
            emit(json, &candidates, |c| render::backup(&room, c))?;
        }
        Commands::Courses => {
            let sessions = load(&config)?;
            emit(json, &sessions.course_codes(), |c| render::lines(c))?;
        }
        Commands::Rooms => {
            let sessions = load(&config)?;
            emit(json, &sessions.rooms(), |r| render::lines(r))?;
        }
        Commands::ExportCsv { output } => {
            let sessions = load(&config)?;
            write_output(output.as_deref(), &render::csv(&sessions))?;
        }
        Commands::GenerateIcalendar {
            start,
            end,
            courses,
            output,
            uid_domain,
        } => {
            let start = parse_date(&start, "start")?;
            let end = parse_date(&end, "end")?;
            let courses = split_courses(courses.as_deref());
            let sessions = load(&config)?;

            let events =
                cru_engine::calendar_events_between(&sessions, start, end, courses.as_slice())
                    .context("Failed to generate calendar events")?;
            if events.is_empty() {
                tracing::warn!("no session matches the requested courses and period");
            }

            let domain = uid_domain.as_deref().unwrap_or(&config.uid_domain);
            write_output(output.as_deref(), &render::icalendar(&events, domain))?;
        }
        Commands::Parse { input } => {
            let text = read_input(input.as_deref())?;
            let sessions = cru_engine::parse_document(&text);
            let pretty = serde_json::to_string_pretty(&sessions.to_vec())?;
            println!("{}", pretty);
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load(config: &Config) -> Result<SessionSet> {
    cru_engine::load_directory(&config.data_dir, &config.file_name).with_context(|| {
        format!(
            "Failed to load timetable from {}",
            config.data_dir.display()
        )
    })
}

/// Print `value` as pretty JSON, or as the text produced by `text`.
fn emit<T, F>(json: bool, value: &T, text: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}

fn parse_date(value: &str, label: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid {label} date, expected YYYY-MM-DD: {value}"))
}

/// `--courses ME01, MT02` → `["ME01", "MT02"]`; blanks are dropped.
fn split_courses(raw: Option<&str>) -> Vec<String> {
    raw.map(|r| {
        r.split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
            tracing::info!("wrote {}", path);
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
