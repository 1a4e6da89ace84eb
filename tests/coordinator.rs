use splashwalls::coordinator::{SaveCoordinator, SaveEvent, SaveOutcome, Trigger};
use splashwalls::error::SaveError;
use std::{
    thread,
    time::{Duration, Instant},
};

mod common;
use common::{records, saved, ScriptedStore};

fn wait_for_outcome(coordinator: &mut SaveCoordinator) -> SaveOutcome {
    let start = Instant::now();
    loop {
        if let Some(outcome) = coordinator.poll() {
            return outcome;
        }
        if start.elapsed() > Duration::from_secs(5) {
            panic!("timed out waiting for save");
        }
        thread::sleep(Duration::from_millis(10));
    }
}

fn wait_for_calls(store: &ScriptedStore, expected: usize) {
    let start = Instant::now();
    while store.calls() < expected {
        if start.elapsed() > Duration::from_secs(5) {
            panic!("store never called");
        }
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn successful_save_shows_then_hides_indicator() {
    let (store, release) = ScriptedStore::new();
    let mut coordinator = SaveCoordinator::new(store.clone());
    let events = coordinator.subscribe();
    let list = records(3);

    assert!(!coordinator.is_visible());
    assert_eq!(coordinator.on_double_tap(1, &list).unwrap(), Trigger::Started);
    assert!(coordinator.is_visible());
    assert_eq!(coordinator.session().unwrap().target_index, 1);

    release.send(Ok(saved("lib/wall-1.jpg"))).unwrap();
    let outcome = wait_for_outcome(&mut coordinator);
    assert_eq!(
        outcome,
        SaveOutcome::Succeeded {
            target_index: 1,
            media: saved("lib/wall-1.jpg")
        }
    );
    assert!(!coordinator.is_visible());

    let received: Vec<_> = events.try_iter().collect();
    assert_eq!(
        received,
        vec![
            SaveEvent::Visibility(true),
            SaveEvent::Visibility(false),
            SaveEvent::Outcome(outcome),
        ]
    );
}

#[test]
fn double_tap_while_busy_is_dropped() {
    let (store, release) = ScriptedStore::new();
    let mut coordinator = SaveCoordinator::new(store.clone());
    let list = records(3);

    assert_eq!(coordinator.on_double_tap(0, &list).unwrap(), Trigger::Started);
    wait_for_calls(&store, 1);
    assert_eq!(coordinator.on_double_tap(2, &list).unwrap(), Trigger::Ignored);
    assert_eq!(coordinator.session().unwrap().target_index, 0);

    release.send(Ok(saved("a.jpg"))).unwrap();
    let outcome = wait_for_outcome(&mut coordinator);
    assert_eq!(outcome.target_index(), 0);

    // Nothing was queued behind the first save
    thread::sleep(Duration::from_millis(50));
    assert!(coordinator.poll().is_none());
    assert_eq!(store.calls(), 1);
}

#[test]
fn failure_clears_indicator_and_reports_error() {
    let (store, release) = ScriptedStore::new();
    let mut coordinator = SaveCoordinator::new(store);
    let events = coordinator.subscribe();
    let list = records(2);

    coordinator.on_double_tap(1, &list).unwrap();
    release
        .send(Err(SaveError::Io(String::from("disk full"))))
        .unwrap();

    let outcome = wait_for_outcome(&mut coordinator);
    assert_eq!(
        outcome,
        SaveOutcome::Failed {
            target_index: 1,
            error: SaveError::Io(String::from("disk full"))
        }
    );
    assert!(!coordinator.is_visible());
    assert!(events
        .try_iter()
        .any(|event| event == SaveEvent::Visibility(false)));
}

#[test]
fn new_save_can_start_after_previous_settles() {
    let (store, release) = ScriptedStore::new();
    let mut coordinator = SaveCoordinator::new(store.clone());
    let list = records(2);

    coordinator.on_double_tap(0, &list).unwrap();
    release.send(Err(SaveError::WorkerGone)).unwrap();
    wait_for_outcome(&mut coordinator);

    assert_eq!(coordinator.on_double_tap(1, &list).unwrap(), Trigger::Started);
    release.send(Ok(saved("b.jpg"))).unwrap();
    assert_eq!(wait_for_outcome(&mut coordinator).target_index(), 1);
    assert_eq!(store.calls(), 2);
}

#[test]
fn unknown_index_is_reported_without_starting() {
    let (store, _release) = ScriptedStore::new();
    let mut coordinator = SaveCoordinator::new(store.clone());
    let events = coordinator.subscribe();

    let err = coordinator.on_double_tap(5, &records(2)).unwrap_err();
    assert_eq!(err, SaveError::UnknownTarget(5));
    assert!(!coordinator.is_visible());
    assert!(events.try_recv().is_err());
    assert_eq!(store.calls(), 0);
}

#[test]
fn dropped_subscribers_are_forgotten() {
    let (store, release) = ScriptedStore::new();
    let mut coordinator = SaveCoordinator::new(store);
    drop(coordinator.subscribe());
    let kept = coordinator.subscribe();

    coordinator.on_double_tap(0, &records(1)).unwrap();
    release.send(Ok(saved("c.jpg"))).unwrap();
    wait_for_outcome(&mut coordinator);
    assert_eq!(kept.try_iter().count(), 3);
}
