//! Candidate discovery and the run driver.
//!
//! The walker snapshots the complete candidate list before any image is
//! touched. The pipeline writes new files as it goes (the optimized file
//! even keeps a candidate-shaped name), so working from a pre-collected
//! queue guarantees that nothing produced mid-pass can be revisited within
//! the same pass. Re-runs are handled by the name-based filter instead:
//! `-original`/`-min` stems are excluded here, and surviving optimized
//! files are caught by the pipeline's rename-collision guard.
//!
//! Processing is strictly sequential — one image at a time, in discovery
//! order. A failed image is logged and skipped; the run always moves on to
//! the next candidate.

use crate::catalog::Catalog;
use crate::manifest::ImageRecord;
use crate::naming;
use crate::pipeline;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions eligible for processing, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// True for files the walker should hand to the pipeline: an eligible
/// extension and a stem that is not a derived artifact.
pub fn is_candidate(path: &Path) -> bool {
    let has_image_ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()));
    if !has_image_ext {
        return false;
    }
    path.file_stem()
        .map(|s| s.to_string_lossy())
        .is_some_and(|stem| !naming::is_derived_stem(&stem))
}

/// Walk the tree under `root` and snapshot every candidate file, in
/// traversal order. Unreadable entries are logged and skipped.
pub fn discover_candidates(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                println!("Error walking directory: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_candidate(path))
        .collect()
}

/// Process every candidate under `root`, appending a record to `photos`
/// for each image that reaches the pipeline's terminal state. Per-image
/// failures are printed and do not stop the run.
pub fn process_directory(root: &Path, catalog: &Catalog, photos: &mut Vec<ImageRecord>) {
    for path in discover_candidates(root) {
        println!("\nProcessing image: {}", path.display());
        if let Err(e) = pipeline::process_image(&path, root, catalog, photos) {
            println!("{e}");
        }
    }
}
