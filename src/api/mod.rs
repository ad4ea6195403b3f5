//! High-level, ergonomic library API: thumbnail a file to a path, save an image with all
//! its thumbnails into a storage directory, remove them again, and batch-process a
//! directory. Prefer these entrypoints over the low-level processing modules when
//! integrating thumbkit.
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::core::params::{ThumbnailConfig, ThumbnailOptions};
use crate::core::processing::thumbnail::generate_thumbnail_with_options;
use crate::error::{Error, Result};
use crate::field::ImageWithThumbsField;
use crate::io::storage::FileSystemStorage;
use crate::naming::extension_of;
use crate::types::{TargetSize, ThumbFormat};

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::InvalidArgument {
            arg: "input",
            value: path.display().to_string(),
        })
}

fn format_for_path(path: &Path) -> Result<ThumbFormat> {
    let name = file_name(path)?;
    let ext = extension_of(&name).ok_or(Error::MissingExtension { name: name.clone() })?;
    ThumbFormat::from_name(ext)
}

/// Render one thumbnail of `input` into `output`; the format follows `output`'s extension.
pub fn thumbnail_file_to_path(
    input: &Path,
    output: &Path,
    size: TargetSize,
    options: &ThumbnailOptions,
) -> Result<()> {
    let format = format_for_path(output)?;
    let source = std::fs::read(input)?;
    let bytes = generate_thumbnail_with_options(&source, size, format, options)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, bytes)?;
    info!("Wrote {} thumbnail {:?}", size, output);
    Ok(())
}

/// What `save_with_thumbnails` stored
#[derive(Debug, Clone, Serialize)]
pub struct SavedImage {
    pub original: String,
    pub url: String,
    pub thumbnails: Vec<String>,
    pub thumbnail_urls: Vec<String>,
}

/// Save `input` into `storage_dir` under its file name (or the next free one), together
/// with one thumbnail per configured size.
pub fn save_with_thumbnails(
    input: &Path,
    storage_dir: &Path,
    config: &ThumbnailConfig,
) -> Result<SavedImage> {
    let storage = FileSystemStorage::new(storage_dir, config.base_url.clone());
    let field = ImageWithThumbsField::from_config(config);
    let content = std::fs::read(input)?;

    let mut file = field.bind(&storage, None);
    let original = file.save(&file_name(input)?, &content)?;

    Ok(SavedImage {
        url: file.url().unwrap_or_default(),
        thumbnails: file.thumbnail_names()?,
        thumbnail_urls: file
            .thumbnail_urls()?
            .into_iter()
            .map(|(_, url)| url)
            .collect(),
        original,
    })
}

/// Delete `name` from `storage_dir` along with every configured thumbnail of it.
pub fn delete_with_thumbnails(name: &str, storage_dir: &Path, config: &ThumbnailConfig) -> Result<()> {
    let storage = FileSystemStorage::new(storage_dir, config.base_url.clone());
    let field = ImageWithThumbsField::from_config(config);
    let mut file = field.bind(&storage, Some(name.to_string()));
    file.delete()
}

/// Rebuild every configured thumbnail of `name` in `storage_dir`.
pub fn regenerate_thumbnails(
    name: &str,
    storage_dir: &Path,
    config: &ThumbnailConfig,
) -> Result<Vec<String>> {
    let storage = FileSystemStorage::new(storage_dir, config.base_url.clone());
    let field = ImageWithThumbsField::from_config(config);
    let file = field.bind(&storage, Some(name.to_string()));
    file.regenerate()
}

/// Batch processing report
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Split the regular files directly inside `input_dir` into images with a supported
/// extension and everything else. Both lists are sorted.
pub fn iterate_images(input_dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut images = Vec::new();
    let mut others = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if format_for_path(&path).is_ok() {
            images.push(path);
        } else {
            others.push(path);
        }
    }
    images.sort();
    others.sort();
    Ok((images, others))
}

/// Save every image in `input_dir` with its thumbnails into `output_dir`.
/// If `continue_on_error` is true, failures are counted in the report and processing
/// continues; otherwise, the first error is returned.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    config: &ThumbnailConfig,
    continue_on_error: bool,
) -> Result<BatchReport> {
    std::fs::create_dir_all(output_dir)?;

    let (images, others) = iterate_images(input_dir)?;
    let mut report = BatchReport {
        skipped: others.len(),
        ..BatchReport::default()
    };
    for path in &others {
        info!("Skipping non-image file: {:?}", path);
    }

    for path in images {
        match save_with_thumbnails(&path, output_dir, config) {
            Ok(saved) => {
                info!("Processed {:?} -> {}", path, saved.original);
                report.processed += 1;
            }
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
                if !continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    Ok(report)
}
