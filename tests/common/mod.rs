#![allow(dead_code)]

use image::{DynamicImage, Rgba, RgbaImage};
use splashwalls::{
    catalog::ImageRecord,
    error::SaveError,
    store::{MediaStore, SavedMedia},
};
use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc::{self, Receiver, Sender},
        Arc, Mutex,
    },
};

pub fn solid_image(width: u32, height: u32, color: [u8; 4]) -> DynamicImage {
    let pixel = Rgba(color);
    let buffer = RgbaImage::from_pixel(width, height, pixel);
    DynamicImage::ImageRgba8(buffer)
}

pub fn write_image(path: impl Into<PathBuf>, image: &DynamicImage) {
    image
        .save(path.into())
        .expect("failed to write image to disk");
}

pub fn record(id: u64, source: impl AsRef<Path>) -> ImageRecord {
    ImageRecord {
        id,
        width: 4,
        height: 4,
        author: format!("author-{id}"),
        source: source.as_ref().to_path_buf(),
    }
}

pub fn records(count: u64) -> Vec<ImageRecord> {
    (0..count)
        .map(|id| record(id, format!("wall-{id}.png")))
        .collect()
}

/// Media store whose saves block until the test releases them with a result.
pub struct ScriptedStore {
    release: Mutex<Receiver<Result<SavedMedia, SaveError>>>,
    pub calls: AtomicUsize,
}

impl ScriptedStore {
    pub fn new() -> (Arc<Self>, Sender<Result<SavedMedia, SaveError>>) {
        let (tx, rx) = mpsc::channel();
        let store = Arc::new(Self {
            release: Mutex::new(rx),
            calls: AtomicUsize::new(0),
        });
        (store, tx)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MediaStore for ScriptedStore {
    fn save(&self, _record: &ImageRecord) -> Result<SavedMedia, SaveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let release = self.release.lock().unwrap_or_else(|p| p.into_inner());
        release.recv().unwrap_or(Err(SaveError::WorkerGone))
    }
}

pub fn saved(path: &str) -> SavedMedia {
    SavedMedia {
        path: PathBuf::from(path),
        bytes: 42,
    }
}
