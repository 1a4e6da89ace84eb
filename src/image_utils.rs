use std::{io::Write, path::PathBuf};

use clap::ValueEnum;
use eframe::egui;
use image::{codecs::avif::AvifEncoder, DynamicImage, ImageResult};

/// Longest edge kept for on-screen display.
pub const DISPLAY_MAX_WIDTH: u32 = 3840;
pub const DISPLAY_MAX_HEIGHT: u32 = 2160;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum OutputFormat {
    Jpg,
    Png,
    Webp,
    Avif,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
            OutputFormat::Avif => "avif",
        }
    }
}

pub struct PreloadedImage {
    pub path: PathBuf,
    pub color_image: egui::ColorImage,
}

pub fn to_color_image(img: &DynamicImage) -> egui::ColorImage {
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    egui::ColorImage::from_rgba_unmultiplied(size, &pixels)
}

pub fn encode_image<W: Write>(
    image: &DynamicImage,
    writer: W,
    format: OutputFormat,
    quality: u8,
) -> ImageResult<()> {
    match format {
        OutputFormat::Jpg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(writer, quality);
            rgb.write_with_encoder(encoder)
        }
        OutputFormat::Png => {
            let encoder = image::codecs::png::PngEncoder::new(writer);
            image.write_with_encoder(encoder)
        }
        OutputFormat::Webp => {
            let encoder = image::codecs::webp::WebPEncoder::new_lossless(writer);
            image.write_with_encoder(encoder)
        }
        OutputFormat::Avif => {
            let encoder = AvifEncoder::new_with_speed_quality(writer, 4, quality);
            image.write_with_encoder(encoder)
        }
    }
}

/// Size that fits `(width, height)` inside the display bound, keeping the
/// aspect ratio. Returns `None` when no scaling is needed.
pub fn display_size(width: u32, height: u32) -> Option<(u32, u32)> {
    if width <= DISPLAY_MAX_WIDTH && height <= DISPLAY_MAX_HEIGHT {
        return None;
    }
    let ratio = width as f64 / height.max(1) as f64;
    let bound_ratio = DISPLAY_MAX_WIDTH as f64 / DISPLAY_MAX_HEIGHT as f64;
    let (w, h) = if ratio > bound_ratio {
        (DISPLAY_MAX_WIDTH, (DISPLAY_MAX_WIDTH as f64 / ratio) as u32)
    } else {
        ((DISPLAY_MAX_HEIGHT as f64 * ratio) as u32, DISPLAY_MAX_HEIGHT)
    };
    Some((w.max(1), h.max(1)))
}
