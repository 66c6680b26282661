//! Image inspection: file size plus header-declared pixel dimensions.
//!
//! Inspection is deliberately forgiving. A file that is missing, truncated,
//! or not a decodable image logs one error line and yields `None` —
//! "dimensions unknown" — and the caller carries on. The pipeline records
//! such artifacts with their size fields absent rather than aborting.

use crate::manifest::ArtifactSize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
enum InspectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Inspect an artifact, printing a detail block on success or a single
/// error line on failure.
///
/// `description` labels the artifact in the console output ("Original
/// image", "Optimized image", "Resized image").
pub fn inspect(path: &Path, description: &str) -> Option<ArtifactSize> {
    match read_details(path) {
        Ok(size) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!("{description} - {name}:");
            println!(
                "  Size: {:.2} KB, Width: {}, Height: {}",
                size.kb, size.w, size.h
            );
            Some(size)
        }
        Err(e) => {
            println!("Error reading details for {}: {e}", path.display());
            None
        }
    }
}

/// Byte length from filesystem metadata; dimensions from the image header
/// only — no pixel data is decoded here.
fn read_details(path: &Path) -> Result<ArtifactSize, InspectError> {
    let bytes = std::fs::metadata(path)?.len();
    let (w, h) = image::image_dimensions(path)?;
    Ok(ArtifactSize {
        w,
        h,
        kb: round_kb(bytes),
    })
}

fn round_kb(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 * 100.0).round() / 100.0
}
