//! Integration tests for the memo autosave path and store resilience,
//! plus property tests for the dial.

use proptest::prelude::*;
use refomo_core::{RecordStore, SessionCoordinator, SessionRecord, TimerEngine};

fn coordinator_in(dir: &tempfile::TempDir) -> SessionCoordinator {
    let store = RecordStore::with_path(dir.path().join("records.json"));
    SessionCoordinator::new(TimerEngine::with_selected_minutes(1), store)
}

#[test]
fn test_autosave_then_finalize_creates_exactly_one_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut coordinator = coordinator_in(&dir);

    coordinator.engine_mut().start();
    for _ in 0..20 {
        coordinator.engine_mut().tick();
    }
    coordinator.engine_mut().set_memo("early insight");
    coordinator.save_memo_record();

    let records = coordinator.store().load();
    assert_eq!(records.len(), 1);
    assert!(
        records[0].actual_duration.is_none(),
        "autosaved record must be marked in-progress"
    );

    for _ in 0..40 {
        coordinator.engine_mut().tick();
    }
    coordinator.complete_session();
    coordinator.save_record();

    let records = coordinator.store().load();
    assert_eq!(records.len(), 1, "finalize must not duplicate the record");
    assert_eq!(records[0].actual_duration, Some(60));
}

#[test]
fn test_autosaved_record_is_reachable_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut coordinator = coordinator_in(&dir);

    coordinator.engine_mut().start();
    coordinator.engine_mut().set_memo("note before the crash");
    coordinator.save_memo_record();
    let id = coordinator.engine().record_id().unwrap();

    // A new store over the same file still finds the partial record.
    let store = RecordStore::with_path(dir.path().join("records.json"));
    let records = store.load();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, id);
    assert!(records[0].actual_duration.is_none());

    // And it can be finished in place.
    let mut finished = records[0].clone();
    finished.actual_duration = Some(60);
    store.update(finished);
    assert_eq!(store.load()[0].actual_duration, Some(60));
}

#[test]
fn test_corrupt_store_does_not_break_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut coordinator = coordinator_in(&dir);
    std::fs::write(dir.path().join("records.json"), "{{{ definitely not json").unwrap();

    coordinator.engine_mut().start();
    coordinator.engine_mut().set_memo("written over the rubble");
    coordinator.save_memo_record();

    let records = coordinator.store().load();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].memo.as_deref(), Some("written over the rubble"));
}

#[test]
fn test_update_against_missing_file_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::with_path(dir.path().join("records.json"));
    store.update(SessionRecord::new(chrono::Utc::now(), 600));
    assert!(store.load().is_empty());
}

proptest! {
    /// Every planned duration derives from the dial: start() pins
    /// planned and remaining to selected * 60.
    #[test]
    fn prop_start_pins_planned_duration(minutes in 1u32..=60) {
        let mut engine = TimerEngine::with_selected_minutes(minutes);
        engine.start();
        prop_assert_eq!(engine.planned_secs(), minutes * 60);
        prop_assert_eq!(engine.remaining_secs(), minutes * 60);
    }

    /// The dial maps any angle into 1..=60 minutes, never outside.
    #[test]
    fn prop_angle_selection_stays_in_range(angle in -360.0f64..720.0) {
        let mut engine = TimerEngine::new();
        engine.select_minutes_by_angle(angle);
        let minutes = engine.selected_minutes();
        prop_assert!((1..=60).contains(&minutes));
    }

    /// Ticking a running session n < planned times leaves the countdown
    /// at exactly planned - n.
    #[test]
    fn prop_ticks_are_exact(minutes in 1u32..=5, ticks in 0u32..60) {
        let mut engine = TimerEngine::with_selected_minutes(minutes);
        engine.start();
        let planned = engine.planned_secs();
        let n = ticks.min(planned - 1);
        for _ in 0..n {
            engine.tick();
        }
        prop_assert_eq!(engine.remaining_secs(), planned - n);
    }
}
