use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use image::DynamicImage;
use log::info;

use crate::{
    catalog::ImageRecord,
    error::SaveError,
    fs_utils::{move_with_unique_name, prepare_dir, split_name, TEMP_DIR},
    image_utils::{encode_image, OutputFormat},
};

/// Result of a completed save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedMedia {
    pub path: PathBuf,
    pub bytes: u64,
}

/// The photo library that double-tapped images end up in.
///
/// `save` blocks; callers run it off the UI thread.
pub trait MediaStore: Send + Sync {
    fn save(&self, record: &ImageRecord) -> Result<SavedMedia, SaveError>;
}

/// Photo library kept as a plain directory of re-encoded copies.
pub struct LibraryStore {
    library: PathBuf,
    format: OutputFormat,
    quality: u8,
}

impl LibraryStore {
    pub fn new(library: impl Into<PathBuf>, format: OutputFormat, quality: u8) -> Self {
        Self {
            library: library.into(),
            format,
            quality: quality.clamp(1, 100),
        }
    }

    fn file_name_for(&self, record: &ImageRecord) -> String {
        let stem = record
            .source
            .file_name()
            .map(|name| split_name(name).0)
            .unwrap_or_else(|| format!("image-{}", record.id));
        format!("{stem}.{}", self.format.extension())
    }
}

impl MediaStore for LibraryStore {
    fn save(&self, record: &ImageRecord) -> Result<SavedMedia, SaveError> {
        let image =
            image::open(record.identifier()).map_err(|e| SaveError::Decode(e.to_string()))?;

        let library = prepare_dir(&self.library)?;
        // Write next to the library first so an interrupted encode never
        // leaves a truncated file behind
        let temp_dir = prepare_dir(&library.join(TEMP_DIR))?;
        let file_name = self.file_name_for(record);
        let temp_path = temp_dir.join(&file_name);

        if let Err(err) = write_encoded(&image, &temp_path, self.format, self.quality) {
            let _ = fs::remove_file(&temp_path);
            let _ = fs::remove_dir(&temp_dir);
            return Err(err);
        }

        let path = move_with_unique_name(&temp_path, &library, file_name.as_ref())?;
        let bytes = fs::metadata(&path)?.len();
        let _ = fs::remove_dir(&temp_dir);
        info!("Saved {} to {} ({bytes} bytes)", record.source.display(), path.display());
        Ok(SavedMedia { path, bytes })
    }
}

fn write_encoded(
    image: &DynamicImage,
    path: &Path,
    format: OutputFormat,
    quality: u8,
) -> Result<(), SaveError> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    encode_image(image, &mut writer, format, quality)
        .map_err(|e| SaveError::Encode(e.to_string()))?;
    writer.flush()?;
    Ok(())
}
