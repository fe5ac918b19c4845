//! Tests for the deduplicating session set.

use cru_engine::{Day, LessonType, Session, SessionSet};

fn session(course: &str, day: Day, start: &str, room: &str) -> Session {
    Session {
        course_code: course.to_string(),
        lesson_type: LessonType::Lecture,
        capacity: 50,
        day,
        start: start.parse().unwrap(),
        end: "20:00".parse().unwrap(),
        room: room.to_string(),
        subgroup: "F1".to_string(),
        group_index: Some(1),
    }
}

#[test]
fn insert_ignores_equal_sessions() {
    let mut set = SessionSet::new();
    let s = session("ME01", Day::Monday, "08:00", "A001");

    assert!(set.insert(s.clone()));
    assert!(!set.insert(s.clone()));
    assert_eq!(set.len(), 1);
    assert!(set.contains(&s));
}

#[test]
fn sessions_differing_in_one_field_are_distinct() {
    let mut set = SessionSet::new();
    let a = session("ME01", Day::Monday, "08:00", "A001");
    let mut b = a.clone();
    b.group_index = Some(2);
    let mut c = a.clone();
    c.lesson_type = LessonType::Tutorial;

    set.insert(a);
    set.insert(b);
    set.insert(c);
    assert_eq!(set.len(), 3);
}

#[test]
fn remove_by_equality() {
    let a = session("ME01", Day::Monday, "08:00", "A001");
    let b = session("ME02", Day::Monday, "08:00", "A002");
    let mut set: SessionSet = vec![a.clone(), b.clone()].into_iter().collect();

    assert!(set.remove(&a));
    assert!(!set.remove(&a));
    assert_eq!(set.to_vec(), vec![b]);
}

#[test]
fn filter_produces_a_new_set() {
    let set: SessionSet = vec![
        session("ME01", Day::Monday, "08:00", "A001"),
        session("ME02", Day::Monday, "08:00", "A002"),
        session("ME03", Day::Monday, "09:00", "A001"),
    ]
    .into_iter()
    .collect();

    let a001 = set.filter(|s| s.room == "A001");

    assert_eq!(a001.len(), 2);
    assert_eq!(set.len(), 3);
}

#[test]
fn sort_orders_by_weekday_then_start() {
    let mut set: SessionSet = vec![
        session("V1", Day::Friday, "08:00", "A001"),
        session("L2", Day::Monday, "14:00", "A001"),
        session("ME", Day::Wednesday, "08:00", "A001"),
        session("L1", Day::Monday, "8:30", "A001"),
        session("MA", Day::Tuesday, "10:00", "A001"),
    ]
    .into_iter()
    .collect();

    set.sort();

    let order: Vec<&str> = set.iter().map(|s| s.course_code.as_str()).collect();
    assert_eq!(order, vec!["L1", "L2", "MA", "ME", "V1"]);
}

#[test]
fn merge_suppresses_cross_set_duplicates() {
    let shared = session("ME01", Day::Monday, "08:00", "A001");
    let mut first: SessionSet = vec![shared.clone()].into_iter().collect();
    let second: SessionSet = vec![shared, session("ME02", Day::Tuesday, "08:00", "A002")]
        .into_iter()
        .collect();

    first.merge(second);
    assert_eq!(first.len(), 2);
}

#[test]
fn distinct_rooms_and_courses_are_sorted() {
    let set: SessionSet = vec![
        session("MT02", Day::Monday, "08:00", "B002"),
        session("ME01", Day::Monday, "09:00", "A001"),
        session("ME01", Day::Tuesday, "09:00", "B002"),
    ]
    .into_iter()
    .collect();

    assert_eq!(set.rooms(), vec!["A001", "B002"]);
    assert_eq!(set.course_codes(), vec!["ME01", "MT02"]);
}

#[test]
fn weekday_order_is_fixed() {
    assert!(Day::Monday < Day::Tuesday);
    assert!(Day::Tuesday < Day::Wednesday);
    assert!(Day::Wednesday < Day::Thursday);
    assert!(Day::Thursday < Day::Friday);
    assert_eq!("me".parse::<Day>().unwrap(), Day::Wednesday);
    assert_eq!(Day::Thursday.to_string(), "J");
}

#[test]
fn sessions_serialize_with_source_codes() {
    let s = session("ME01", Day::Tuesday, "8:00", "A001");
    let json = serde_json::to_value(&s).unwrap();

    assert_eq!(json["day"], "MA");
    assert_eq!(json["lesson_type"], "CM");
    assert_eq!(json["start"], "08:00");
    assert_eq!(json["group_index"], 1);
}
