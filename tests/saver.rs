use splashwalls::catalog::ImageRecord;
use splashwalls::error::SaveError;
use splashwalls::image_utils::OutputFormat;
use splashwalls::saver::{SaveRequest, SaveStatus, Saver};
use splashwalls::store::{LibraryStore, MediaStore, SavedMedia};
use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};
use tempfile::tempdir;

mod common;
use common::{record, solid_image, write_image};

fn wait_for_status(saver: &mut Saver) -> SaveStatus {
    let start = Instant::now();
    loop {
        if let Some(status) = saver.check_completions().pop() {
            return status;
        }
        if start.elapsed() > Duration::from_secs(5) {
            panic!("timed out waiting for save");
        }
        thread::sleep(Duration::from_millis(20));
    }
}

#[test]
fn saver_runs_store_in_background() {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("peak.png");
    write_image(&source, &solid_image(3, 3, [20, 30, 40, 255]));
    let store = LibraryStore::new(tmp.path().join("lib"), OutputFormat::Png, 100);

    let mut saver = Saver::new(Arc::new(store));
    saver
        .queue_save(SaveRequest {
            ticket: 7,
            record: record(0, &source),
        })
        .unwrap();

    let status = wait_for_status(&mut saver);
    assert_eq!(status.ticket, 7);
    assert!(status.result.unwrap().path.exists());
    assert!(saver.check_completions().is_empty());
}

struct PanickingStore;

impl MediaStore for PanickingStore {
    fn save(&self, _record: &ImageRecord) -> Result<SavedMedia, SaveError> {
        panic!("store blew up");
    }
}

#[test]
fn lost_worker_settles_pending_saves() {
    let mut saver = Saver::new(Arc::new(PanickingStore));
    saver
        .queue_save(SaveRequest {
            ticket: 1,
            record: record(0, "x.png"),
        })
        .unwrap();

    let status = wait_for_status(&mut saver);
    assert_eq!(status.ticket, 1);
    assert_eq!(status.result.unwrap_err(), SaveError::WorkerGone);
    // Each lost save is reported once
    assert!(saver.check_completions().is_empty());
}
