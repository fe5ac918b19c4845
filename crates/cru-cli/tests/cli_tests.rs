//! Integration tests for the `cru` CLI binary.
//!
//! Every command runs against the two-unit timetable under
//! `tests/fixtures/data`: `AB` holds ME01 plus a placeholder block, `CD`
//! holds MT02 (which double-books S104 with ME01) and IN03.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn data_dir() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/data")
}

fn unit_file() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/data/AB/edt.cru")
}

/// `cru --data-dir <fixtures>` with a clean logging environment.
fn cru() -> Command {
    let mut cmd = Command::cargo_bin("cru").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("CRU_CONFIG")
        .arg("--data-dir")
        .arg(data_dir());
    cmd
}

fn json_output(args: &[&str]) -> Value {
    let output = cru().arg("--json").args(args).output().unwrap();
    assert!(output.status.success(), "cru {:?} failed", args);
    serde_json::from_slice(&output.stdout).expect("stdout must be valid JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// Room lookups
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn search_rooms_lists_course_rooms() {
    cru()
        .args(["search-rooms", "ME01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rooms for course ME01:"))
        .stdout(predicate::str::contains("A001 - 90 seats"))
        .stdout(predicate::str::contains("S104 - 24 seats"));
}

#[test]
fn search_rooms_unknown_course_fails() {
    cru()
        .args(["search-rooms", "ZZ99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown course: ZZ99"));
}

#[test]
fn room_capacity_is_case_insensitive_and_takes_max() {
    cru()
        .args(["room-capacity", "s104"])
        .assert()
        .success()
        .stdout("Room S104 has 30 seats\n");
}

#[test]
fn room_capacity_unknown_room_fails() {
    cru()
        .args(["room-capacity", "Z999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Z999"));
}

#[test]
fn rooms_and_courses_are_sorted_and_skip_placeholders() {
    cru()
        .arg("rooms")
        .assert()
        .success()
        .stdout("A001\nS104\nS201\nS202\n");

    cru()
        .arg("courses")
        .assert()
        .success()
        .stdout("IN03\nME01\nMT02\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Availability and free slots
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn available_rooms_excludes_busy_rooms() {
    cru()
        .args(["available-rooms", "10:00", "12:00", "L"])
        .assert()
        .success()
        .stdout("A001\nS104\nS202\n");
}

#[test]
fn available_rooms_rejects_bad_time() {
    cru()
        .args(["available-rooms", "25:00", "26:00", "L"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("25:00"));
}

#[test]
fn available_rooms_rejects_unknown_day() {
    cru()
        .args(["available-rooms", "10:00", "12:00", "S"])
        .assert()
        .failure();
}

#[test]
fn free_slots_for_room_per_day() {
    cru()
        .args(["free-slots", "S104"])
        .assert()
        .success()
        .stdout(predicate::str::contains("L: 08:00-20:00"))
        .stdout(predicate::str::contains("ME: 08:00-16:00, 19:00-20:00"))
        .stdout(predicate::str::contains("J: 08:00-10:00, 12:00-20:00"));
}

#[test]
fn common_free_slots_as_json() {
    let days = json_output(&["common-free-slots", "ME01", "MT02"]);
    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 5);

    assert_eq!(days[0]["day"], "L");
    let monday = days[0]["slots"].as_array().unwrap();
    assert_eq!(monday.len(), 1);
    assert_eq!(monday[0]["start"], "12:00");
    assert_eq!(monday[0]["end"], "20:00");
    assert_eq!(monday[0]["duration_minutes"], 480);

    assert_eq!(days[1]["day"], "MA");
    let tuesday = days[1]["slots"].as_array().unwrap();
    assert_eq!(tuesday[0]["end"], "14:00");
    assert_eq!(tuesday[1]["start"], "16:00");
}

// ─────────────────────────────────────────────────────────────────────────────
// Analysis
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_conflicts_reports_double_booking() {
    cru()
        .arg("check-conflicts")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Room S104, ME 16:00-18:00 (ME01) overlaps 17:00-19:00 (MT02)",
        ));

    let conflicts = json_output(&["check-conflicts"]);
    let conflicts = conflicts.as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["room"], "S104");
    assert_eq!(conflicts[0]["overlap_minutes"], 60);
    assert_eq!(conflicts[0]["first"]["course_code"], "ME01");
}

#[test]
fn room_usage_stats_prints_rates() {
    cru()
        .arg("room-usage-stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("A001: 6.67% occupied"))
        .stdout(predicate::str::contains("Average occupancy:"));
}

#[test]
fn rank_rooms_largest_first() {
    let output = cru().arg("rank-rooms").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let first = stdout.lines().next().unwrap();
    assert_eq!(first, "90 seats: 1 room(s)");
    assert_eq!(stdout.lines().count(), 4);
}

#[test]
fn backup_room_same_building_and_free() {
    cru()
        .args(["backup-room", "S104"])
        .assert()
        .success()
        .stdout(predicate::str::contains("S202 - 40 seats"))
        .stdout(predicate::str::contains("S201").not());
}

#[test]
fn backup_room_none_found() {
    cru()
        .args(["backup-room", "A001"])
        .assert()
        .success()
        .stdout("No backup room found for A001\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Exports
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn export_csv_to_stdout() {
    cru()
        .arg("export-csv")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "courseCode,lessonType,capacity,day,startTime,endTime,room,subgroup\n",
        ))
        .stdout(predicate::str::contains("ME01,CM,90,L,08:00,10:00,A001,F1"))
        .stdout(predicate::str::contains("P202").not());
}

#[test]
fn generate_icalendar_to_file() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("agenda.ics");

    cru()
        .args([
            "generate-icalendar",
            "--start",
            "2026-03-16",
            "--end",
            "2026-03-22",
            "-c",
            "ME01",
            "--uid-domain",
            "edt.test",
            "-o",
        ])
        .arg(&out)
        .assert()
        .success();

    let ics = std::fs::read_to_string(&out).unwrap();
    assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 3);
    assert!(ics.contains("DTSTART:20260316T080000\r\n"));
    assert!(ics.contains("DTSTART:20260319T100000\r\n"));
    assert!(ics.contains("UID:cru-ME01-20260318-1@edt.test\r\n"));
    assert!(!ics.contains("MT02"));
}

#[test]
fn generate_icalendar_rejects_bad_dates() {
    cru()
        .args(["generate-icalendar", "--start", "16/03/2026", "--end", "2026-03-22"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));

    cru()
        .args(["generate-icalendar", "--start", "2026-03-22", "--end", "2026-03-16"])
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing and sources
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn parse_file_prints_sessions() {
    let output = Command::cargo_bin("cru")
        .unwrap()
        .args(["parse", "-i", unit_file()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let sessions: Value = serde_json::from_slice(&output.stdout).unwrap();
    let sessions = sessions.as_array().unwrap();
    assert_eq!(sessions.len(), 3);
    assert!(sessions.iter().all(|s| s["course_code"] == "ME01"));
    assert_eq!(sessions[0]["start"], "08:00");
}

#[test]
fn parse_stdin_skips_rejected_lines() {
    Command::cargo_bin("cru")
        .unwrap()
        .env_remove("RUST_LOG")
        .arg("parse")
        .write_stdin("+IN03\n1,C1,P=40,H=V 10:00-11:00,F1,S=BAD//\n")
        .assert()
        .success()
        .stdout("[]\n")
        .stderr(predicate::str::contains("skipping invalid slot line"));
}

#[test]
fn missing_data_dir_fails() {
    let tmp = TempDir::new().unwrap();
    Command::cargo_bin("cru")
        .unwrap()
        .env_remove("CRU_CONFIG")
        .arg("--data-dir")
        .arg(tmp.path().join("missing"))
        .arg("rooms")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Timetable source unavailable"));
}

#[test]
fn config_file_sets_data_dir() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("cru.toml");
    std::fs::write(
        &config,
        format!("data_dir = {:?}\nfile_name = \"edt.cru\"\n", data_dir()),
    )
    .unwrap();

    Command::cargo_bin("cru")
        .unwrap()
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config)
        .arg("courses")
        .assert()
        .success()
        .stdout("IN03\nME01\nMT02\n");
}
