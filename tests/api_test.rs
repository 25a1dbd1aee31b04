mod common;

use common::config;
use quiver::api::{self, ScoringState};
use quiver::error::QuiverError;
use quiver::protocol::ArrowEvent;
use quiver::scorer::RawArrow;

fn event(end: u32, slot: usize, value: RawArrow) -> ArrowEvent {
    ArrowEvent::new(end, slot, value)
}

#[test]
fn test_start_and_record() {
    let state = ScoringState::default();
    let header = api::start_session(&state, "practice", config(3, 2, 10, 10)).unwrap();
    assert_eq!(header.total_score, 0);
    assert_eq!(header.ends_planned, 2);

    api::record_event(&state, "practice", &event(1, 0, RawArrow::X)).unwrap();
    api::record_event(&state, "practice", &event(1, 1, RawArrow::Points(9))).unwrap();
    let row = api::record_event(&state, "practice", &event(1, 2, RawArrow::Miss)).unwrap();

    assert_eq!(row.end_number, 1);
    assert_eq!(row.scores, vec![Some(10), Some(9), Some(0)]);
    assert_eq!(row.end_score, 19);
    assert_eq!(row.x_count, 1);
    assert_eq!(row.x_slots, vec![0]);

    let row = api::clear_slot(&state, "practice", 1, 0).unwrap();
    assert_eq!(row.end_score, 9);
    assert_eq!(row.scores[0], None);
}

#[test]
fn test_restart_is_idempotent_and_can_grow() {
    let state = ScoringState::default();
    api::start_session(&state, "league", config(3, 2, 10, 10)).unwrap();
    api::record_event(&state, "league", &event(2, 2, RawArrow::Points(8))).unwrap();

    let again = api::start_session(&state, "league", config(3, 2, 10, 10)).unwrap();
    assert_eq!(again.total_score, 8);

    let grown = api::start_session(&state, "league", config(3, 4, 10, 10)).unwrap();
    assert_eq!(grown.ends_planned, 4);
    assert_eq!(grown.total_score, 8);

    // smaller endsPlanned is ignored
    let kept = api::start_session(&state, "league", config(3, 1, 10, 10)).unwrap();
    assert_eq!(kept.ends_planned, 4);

    let file = api::snapshot(&state, "league").unwrap();
    assert_eq!(file.ends.len(), 4);
    assert_eq!(file.ends[1].scores[2], Some(8));
}

#[test]
fn test_restart_with_different_face_fails() {
    let state = ScoringState::default();
    api::start_session(&state, "s", config(3, 2, 10, 10)).unwrap();
    let err = api::start_session(&state, "s", config(3, 2, 10, 11)).unwrap_err();
    assert!(matches!(err, QuiverError::Config(_)));
}

#[test]
fn test_unknown_session() {
    let state = ScoringState::default();
    let err = api::record_event(&state, "nobody", &event(1, 0, RawArrow::X)).unwrap_err();
    assert!(matches!(err, QuiverError::UnknownSession(ref id) if id == "nobody"));
    assert!(api::session_statistics(&state, "nobody").is_err());
    assert!(api::snapshot(&state, "nobody").is_err());
}

#[test]
fn test_rejected_event_changes_nothing() {
    let state = ScoringState::default();
    api::start_session(&state, "s", config(3, 1, 10, 10)).unwrap();
    api::record_event(&state, "s", &event(1, 0, RawArrow::Points(7))).unwrap();
    let before = api::snapshot(&state, "s").unwrap();

    assert!(api::record_event(&state, "s", &event(1, 1, RawArrow::Points(12))).is_err());
    assert!(api::record_event(&state, "s", &event(2, 0, RawArrow::Points(5))).is_err());
    assert!(api::record_event(&state, "s", &event(1, 5, RawArrow::Points(5))).is_err());

    assert_eq!(api::snapshot(&state, "s").unwrap(), before);
}

#[test]
fn test_statistics_gate() {
    let state = ScoringState::default();
    api::start_session(&state, "s", config(1, 2, 10, 10)).unwrap();
    api::record_event(&state, "s", &event(1, 0, RawArrow::Points(9))).unwrap();

    let err = api::session_statistics(&state, "s").unwrap_err();
    assert!(err.is_not_ready());

    api::record_event(&state, "s", &event(2, 0, RawArrow::X)).unwrap();
    let stats = api::session_statistics(&state, "s").unwrap();
    assert_eq!(stats.total_score, 19);
    assert_eq!(stats.best_end.end_number, 2);
}

#[test]
fn test_snapshot_restore() {
    let state = ScoringState::default();
    api::start_session(&state, "a", config(2, 2, 10, 10)).unwrap();
    api::record_event(&state, "a", &event(1, 0, RawArrow::X)).unwrap();
    api::record_event(&state, "a", &event(1, 1, RawArrow::Points(10))).unwrap();
    let file = api::snapshot(&state, "a").unwrap();

    let other = ScoringState::default();
    api::restore(&other, "b", &file).unwrap();
    let copy = api::snapshot(&other, "b").unwrap();
    assert_eq!(copy, file);
    assert_eq!(copy.aggregate.x_count, 1);
}

#[test]
fn test_concurrent_writers_see_consistent_totals() {
    let state = ScoringState::default();
    let ends = 8u32;
    api::start_session(&state, "busy", config(6, ends, 10, 10)).unwrap();

    std::thread::scope(|scope| {
        for end in 1..=ends {
            let state = &state;
            scope.spawn(move || {
                for slot in 0..6 {
                    api::record_event(state, "busy", &event(end, slot, RawArrow::Points(9))).unwrap();
                }
            });
        }
    });

    let stats = api::session_statistics(&state, "busy").unwrap();
    assert_eq!(stats.total_score, 9 * 6 * ends);
    let file = api::snapshot(&state, "busy").unwrap();
    let summed: u32 = file.ends.iter().map(|e| e.end_score).sum();
    assert_eq!(summed, file.aggregate.total_score);
}
