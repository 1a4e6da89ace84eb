use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::warn;

use crate::fs_utils::collect_images;

/// One entry of the image list. Only its position in the list matters to the
/// sampler; the rest is carried for display and saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub author: String,
    pub source: PathBuf,
}

impl ImageRecord {
    /// Location handed to the media store when this image is saved.
    pub fn identifier(&self) -> &Path {
        &self.source
    }
}

/// Supplies the full list of images to choose from.
pub trait ImageSource {
    fn fetch(&self) -> Result<Vec<ImageRecord>>;
}

impl ImageSource for Vec<ImageRecord> {
    fn fetch(&self) -> Result<Vec<ImageRecord>> {
        Ok(self.clone())
    }
}

/// Image list backed by a directory on disk.
pub struct DirectorySource {
    root: PathBuf,
    recursive: bool,
    exclude: GlobSet,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, recursive: bool, exclude: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude {
            let glob =
                Glob::new(pattern).with_context(|| format!("Invalid exclude pattern {pattern}"))?;
            builder.add(glob);
        }
        let exclude = builder.build().context("Unable to build exclude patterns")?;
        Ok(Self {
            root: root.into(),
            recursive,
            exclude,
        })
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude.is_match(relative)
    }
}

impl ImageSource for DirectorySource {
    fn fetch(&self) -> Result<Vec<ImageRecord>> {
        let mut files = collect_images(&self.root, self.recursive)?;
        files.retain(|path| !self.is_excluded(path));
        files.sort();

        let mut records = Vec::with_capacity(files.len());
        for path in files {
            // Unreadable headers drop the file instead of failing the whole list
            let (width, height) = match image::image_dimensions(&path) {
                Ok(dims) => dims,
                Err(err) => {
                    warn!("Skipping {}: {err}", path.display());
                    continue;
                }
            };
            records.push(ImageRecord {
                id: records.len() as u64,
                width,
                height,
                author: author_for(&path),
                source: path,
            });
        }
        Ok(records)
    }
}

fn author_for(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("Unknown"))
}
