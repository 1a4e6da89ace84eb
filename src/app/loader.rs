use std::{
    collections::{HashMap, HashSet},
    io::Cursor,
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Instant,
};

use anyhow::{anyhow, Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeOptions, Resizer};
use image::DynamicImage;
use log::{debug, warn};
use zune_jpeg::JpegDecoder;

use crate::image_utils::{display_size, to_color_image, PreloadedImage};

/// Decodes images for display on a background thread.
pub struct Loader {
    preload_rx: Receiver<PreloadedImage>,
    path_tx: Sender<PathBuf>,
    requested: HashSet<PathBuf>,
    pub cache: HashMap<PathBuf, PreloadedImage>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    pub fn new() -> Self {
        let (preload_rx, path_tx) = Self::spawn_preloader();
        Self {
            preload_rx,
            path_tx,
            requested: HashSet::new(),
            cache: HashMap::new(),
        }
    }

    fn spawn_preloader() -> (Receiver<PreloadedImage>, Sender<PathBuf>) {
        let (preload_tx, preload_rx) = mpsc::channel();
        let (path_tx, path_rx) = mpsc::channel::<PathBuf>();

        thread::spawn(move || {
            while let Ok(path) = path_rx.recv() {
                let start = Instant::now();
                match load_for_display(&path) {
                    Ok(image) => {
                        let color_image = to_color_image(&image);
                        debug!("decoded {} in {:?}", path.display(), start.elapsed());
                        let preloaded = PreloadedImage { path, color_image };
                        if preload_tx.send(preloaded).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!("Failed to load {}: {err:#}", path.display());
                    }
                }
            }
        });
        (preload_rx, path_tx)
    }

    /// Queues `path` for decoding unless it was asked for already.
    pub fn load_image(&mut self, path: &Path) {
        if self.requested.insert(path.to_path_buf()) {
            let _ = self.path_tx.send(path.to_path_buf());
        }
    }

    /// Moves finished decodes into the cache. Results for paths dropped by
    /// `clear` are discarded.
    pub fn update(&mut self) {
        while let Ok(entry) = self.preload_rx.try_recv() {
            if self.requested.contains(&entry.path) {
                self.cache.insert(entry.path.clone(), entry);
            } else {
                debug!("discarding stale decode of {}", entry.path.display());
            }
        }
    }

    pub fn get_from_cache(&self, path: &Path) -> Option<&PreloadedImage> {
        self.cache.get(path)
    }

    /// Forgets everything requested so far.
    pub fn clear(&mut self) {
        self.requested.clear();
        self.cache.clear();
    }
}

pub fn load_for_display(path: &Path) -> Result<DynamicImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Unable to read {}", path.display()))?;
    let image = decode(path, &bytes)?;
    Ok(downscale(image))
}

fn decode(path: &Path, bytes: &[u8]) -> Result<DynamicImage> {
    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.eq_ignore_ascii_case("jpg") || s.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false);

    if is_jpeg {
        if let Some(image) = decode_jpeg(bytes) {
            return Ok(image);
        }
    }
    image::load_from_memory(bytes).with_context(|| format!("Unable to decode {}", path.display()))
}

/// Fast path for JPEGs; `None` falls back to the generic decoder.
fn decode_jpeg(bytes: &[u8]) -> Option<DynamicImage> {
    let mut decoder = JpegDecoder::new(Cursor::new(bytes));
    let pixels = decoder.decode().ok()?;
    let info = decoder.info()?;
    // zune-jpeg hands back packed RGB8
    image::RgbImage::from_raw(info.width as u32, info.height as u32, pixels)
        .map(DynamicImage::ImageRgb8)
}

/// Shrinks images larger than the display bound. Anything fast_image_resize
/// cannot handle goes through the slower image crate resize.
pub fn downscale(image: DynamicImage) -> DynamicImage {
    let Some((new_w, new_h)) = display_size(image.width(), image.height()) else {
        return image;
    };
    match fast_resize(&image, new_w, new_h) {
        Ok(resized) => resized,
        Err(err) => {
            debug!("fast resize unavailable ({err:#}), using fallback");
            image.resize(new_w, new_h, image::imageops::FilterType::Lanczos3)
        }
    }
}

fn fast_resize(image: &DynamicImage, new_w: u32, new_h: u32) -> Result<DynamicImage> {
    let rgba = image.to_rgba8();
    let src_image = Image::from_vec_u8(rgba.width(), rgba.height(), rgba.into_raw(), PixelType::U8x4)
        .map_err(|e| anyhow!("{e:?}"))?;
    let mut dst_image = Image::new(new_w, new_h, PixelType::U8x4);
    Resizer::new()
        .resize(&src_image, &mut dst_image, &ResizeOptions::default())
        .map_err(|e| anyhow!("{e:?}"))?;
    image::RgbaImage::from_raw(new_w, new_h, dst_image.into_vec())
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| anyhow!("resized buffer has the wrong size"))
}
