//! Series collection.
//!
//! A "series" is a top-level content grouping inferred from the immediate
//! child directories of the processing root — one record per directory,
//! identified by its slug. The descriptive fields are placeholders meant to
//! be filled in by hand afterwards; nothing links a series to the image
//! records whose paths happen to fall under it.

use crate::slug::slugify;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One entry in the manifest's `series` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRecord {
    pub series_name: String,
    pub slug: String,
    pub description: String,
    pub intent_purpose: String,
    pub year: u32,
    pub front_page: bool,
    pub keywords: Vec<String>,
}

impl SeriesRecord {
    /// Build the placeholder record for a directory name.
    pub fn new(name: &str) -> Self {
        Self {
            series_name: name.to_string(),
            slug: slugify(name),
            description: format!("Description for {name}."),
            intent_purpose: format!("Intent purpose for {name}."),
            year: 2024,
            front_page: false,
            keywords: Vec::new(),
        }
    }
}

/// List the immediate child directories of `root` as series records.
///
/// Non-directory entries (and entries whose metadata cannot be read) are
/// silently skipped; enumeration order is whatever the filesystem yields.
pub fn collect_series(root: &Path) -> std::io::Result<Vec<SeriesRecord>> {
    let mut series = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let Ok(entry) = entry else { continue };
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        series.push(SeriesRecord::new(&name));
    }
    Ok(series)
}
