//! Manifest records and the `photos.json` writer.
//!
//! The manifest is the run's JSON summary: one [`ImageRecord`] per fully
//! processed image (three artifacts each) plus one [`SeriesRecord`] per
//! immediate subdirectory of the root. It is written exactly once, at the
//! end of a pass, overwriting any previous file wholesale — there is no
//! merging with prior runs.
//!
//! Records are append-only and ordered by discovery; nothing mutates an
//! entry after it is pushed.

use crate::series::SeriesRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// File size and pixel dimensions of one artifact.
///
/// `kb` is the byte length divided by 1024, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSize {
    pub w: u32,
    pub h: u32,
    pub kb: f64,
}

/// One artifact's manifest entry: where it lives and, when inspection
/// succeeded, how big it is. `size` is omitted from the JSON when the
/// inspector could not read the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ArtifactSize>,
}

/// Manifest entry for one source image: the renamed original, the optimized
/// re-encode, and the `-min` thumbnail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    pub original: ArtifactEntry,
    pub optimized: ArtifactEntry,
    pub min: ArtifactEntry,
}

/// Root structure of `photos.json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub photos: Vec<ImageRecord>,
    pub series: Vec<SeriesRecord>,
}

/// Render a path for the manifest: relative to the processing root, rooted
/// at `/`, forward slashes regardless of platform. A path that does not sit
/// under the root falls back to its absolute form.
pub fn manifest_path(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => format!("/{}", slashed(rel)),
        Err(_) => slashed(path),
    }
}

/// The catalog's `location` column: like [`manifest_path`] but rooted at
/// `/<root-dir-name>/` so rows from different roots stay distinguishable.
pub fn location(path: &Path, root: &Path) -> String {
    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match path.strip_prefix(root) {
        Ok(rel) => format!("/{root_name}/{}", slashed(rel)),
        Err(_) => slashed(path),
    }
}

fn slashed(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Write the manifest to `json_path`, pretty-printed, replacing any
/// previous file.
pub fn save(json_path: &Path, manifest: &Manifest) -> Result<(), ManifestError> {
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(json_path, json)?;
    Ok(())
}
