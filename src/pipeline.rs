//! The per-image pipeline.
//!
//! One source image moves through a fixed forward sequence of states:
//!
//! ```text
//! Discovered → Renamed → OriginalInspected → FormatDetected → Optimized
//!           → OptimizedInspected → Resized → ResizedInspected → Recorded
//! ```
//!
//! There are no retries and no backward transitions. A failure at any step
//! aborts the image in place: whatever was already written stays on disk,
//! and no manifest record or catalog row is produced. Only the terminal
//! `Recorded` state does durable bookkeeping; everything before it touches
//! the filesystem alone. Inspections are the one soft spot — they may fail
//! without aborting, leaving that artifact's size fields absent.
//!
//! The rename step doubles as the idempotency guard: if the `-original`
//! sibling already exists, a previous pass owns this image and the pipeline
//! aborts before changing anything.

use crate::catalog::{Catalog, CatalogRow};
use crate::imaging::{EncodeError, FormatFamily, min_dimensions, save_optimized};
use crate::inspect::inspect;
use crate::manifest::{ArtifactEntry, ImageRecord};
use crate::naming;
use image::ImageReader;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{} already exists, skipping {}", .target.display(), .from.display())]
    RenameCollision { from: PathBuf, target: PathBuf },
    #[error("failed to rename {}: {source}", .path.display())]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unrecognized image format in {}", .path.display())]
    UnknownFormat { path: PathBuf },
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to optimize {}: {source}", .path.display())]
    Optimize {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },
    #[error("failed to resize {}: {source}", .path.display())]
    Resize {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },
    #[error("failed to record {} in the catalog: {source}", .path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
}

/// Run the full pipeline for one source image.
///
/// On success the three artifacts exist on disk, one [`ImageRecord`] has
/// been appended to `photos`, and one row has been inserted into the
/// catalog. On error, processing stopped at the failing state and nothing
/// was recorded.
pub fn process_image(
    source: &Path,
    root: &Path,
    catalog: &Catalog,
    photos: &mut Vec<ImageRecord>,
) -> Result<(), PipelineError> {
    // Discovered → Renamed. The collision check must come first: a plain
    // rename would silently overwrite the previous run's original.
    let original_path = naming::original_variant(source);
    if original_path.exists() {
        return Err(PipelineError::RenameCollision {
            from: source.to_path_buf(),
            target: original_path,
        });
    }
    std::fs::rename(source, &original_path).map_err(|e| PipelineError::Rename {
        path: source.to_path_buf(),
        source: e,
    })?;
    println!(
        "Renamed {} to {}",
        file_name(source),
        file_name(&original_path)
    );

    // Renamed → OriginalInspected (non-fatal).
    let original_size = inspect(&original_path, "Original image");

    // OriginalInspected → FormatDetected. Content sniff picks the encoder
    // profile; the decoded pixels feed both the optimize and the resize
    // steps below.
    let reader = ImageReader::open(&original_path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| PipelineError::Open {
            path: original_path.clone(),
            source: e,
        })?;
    let format = reader.format().ok_or_else(|| PipelineError::UnknownFormat {
        path: original_path.clone(),
    })?;
    let family = FormatFamily::from_format(format);
    let img = reader.decode().map_err(|e| PipelineError::Decode {
        path: original_path.clone(),
        source: e,
    })?;

    // FormatDetected → Optimized: the re-encode takes over the name the
    // source used to occupy.
    save_optimized(&img, family, source).map_err(|e| PipelineError::Optimize {
        path: original_path.clone(),
        source: e,
    })?;
    println!("Optimized image saved as {}", file_name(source));

    // Optimized → OptimizedInspected (non-fatal).
    let optimized_size = inspect(source, "Optimized image");

    // OptimizedInspected → Resized: downscale the original's pixels, not
    // the optimized file's.
    let (min_w, min_h) = min_dimensions(img.width(), img.height());
    let thumbnail = img.resize_exact(min_w, min_h, FilterType::Lanczos3);
    let min_path = naming::min_variant(source);
    save_optimized(&thumbnail, family, &min_path).map_err(|e| PipelineError::Resize {
        path: original_path.clone(),
        source: e,
    })?;
    println!("Resized image saved as {}", file_name(&min_path));

    // Resized → ResizedInspected (non-fatal).
    let resized_size = inspect(&min_path, "Resized image");

    // ResizedInspected → Recorded: the only durable bookkeeping.
    let record = ImageRecord {
        original: ArtifactEntry {
            path: crate::manifest::manifest_path(&original_path, root),
            size: original_size,
        },
        optimized: ArtifactEntry {
            path: crate::manifest::manifest_path(source, root),
            size: optimized_size,
        },
        min: ArtifactEntry {
            path: crate::manifest::manifest_path(&min_path, root),
            size: resized_size,
        },
    };
    let row = CatalogRow {
        original_name: file_name(&original_path),
        optimized_name: file_name(source),
        resized_name: file_name(&min_path),
        original_size_kb: original_size.map(|s| s.kb),
        optimized_size_kb: optimized_size.map(|s| s.kb),
        resized_size_kb: resized_size.map(|s| s.kb),
        original_width: original_size.map(|s| s.w),
        original_height: original_size.map(|s| s.h),
        optimized_width: optimized_size.map(|s| s.w),
        optimized_height: optimized_size.map(|s| s.h),
        resized_width: resized_size.map(|s| s.w),
        resized_height: resized_size.map(|s| s.h),
        location: crate::manifest::location(source, root),
    };

    photos.push(record);
    catalog.insert(&row).map_err(|e| PipelineError::Record {
        path: source.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
