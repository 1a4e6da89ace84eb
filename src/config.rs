use std::path::PathBuf;

use crate::{
    gesture::{GestureClassifier, DOUBLE_TAP_DELAY_MS, DOUBLE_TAP_RADIUS},
    image_utils::OutputFormat,
};

/// Number of images shown per refresh.
pub const NUM_WALLPAPERS: usize = 5;

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub directory: PathBuf,
    pub recursive: bool,
    pub exclude: Vec<String>,
    pub count: usize,
    pub library: PathBuf,
    pub format: OutputFormat,
    pub quality: u8,
    pub double_tap_delay_ms: i64,
    pub double_tap_radius: f32,
    pub seed: Option<u64>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            recursive: false,
            exclude: Vec::new(),
            count: NUM_WALLPAPERS,
            library: PathBuf::from("camera-roll"),
            format: OutputFormat::Jpg,
            quality: 90,
            double_tap_delay_ms: DOUBLE_TAP_DELAY_MS,
            double_tap_radius: DOUBLE_TAP_RADIUS,
            seed: None,
        }
    }
}

impl ViewerConfig {
    pub fn classifier(&self) -> GestureClassifier {
        GestureClassifier::new(self.double_tap_delay_ms, self.double_tap_radius)
    }
}
