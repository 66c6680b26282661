//! Artifact filename conventions.
//!
//! Every processed source image leaves three siblings on disk:
//!
//! - `photo.jpg`           — the optimized re-encode (keeps the source name)
//! - `photo-original.jpg`  — the untouched source, renamed
//! - `photo-min.jpg`       — the 1/8-scale thumbnail
//!
//! This module owns both the suffix insertion and the matching skip filter:
//! a stem containing `-original` or `-min` is a derived artifact and must
//! never be picked up as a fresh candidate. The check is a plain substring
//! match on the stem — the same rule that keeps re-runs from reprocessing
//! prior output.

use std::path::{Path, PathBuf};

/// Suffix carried by the renamed, untouched source file.
pub const ORIGINAL_SUFFIX: &str = "-original";
/// Suffix carried by the downscaled thumbnail file.
pub const MIN_SUFFIX: &str = "-min";

/// Sibling path for the renamed source: `photo.jpg` → `photo-original.jpg`.
pub fn original_variant(path: &Path) -> PathBuf {
    with_stem_suffix(path, ORIGINAL_SUFFIX)
}

/// Sibling path for the thumbnail: `photo.jpg` → `photo-min.jpg`.
pub fn min_variant(path: &Path) -> PathBuf {
    with_stem_suffix(path, MIN_SUFFIX)
}

/// True when the stem marks a file this tool already produced.
pub fn is_derived_stem(stem: &str) -> bool {
    stem.contains(ORIGINAL_SUFFIX) || stem.contains(MIN_SUFFIX)
}

fn with_stem_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn original_variant_inserts_before_extension() {
        assert_eq!(
            original_variant(Path::new("photos/dawn.jpg")),
            PathBuf::from("photos/dawn-original.jpg")
        );
    }

    #[test]
    fn min_variant_inserts_before_extension() {
        assert_eq!(
            min_variant(Path::new("photos/dawn.jpg")),
            PathBuf::from("photos/dawn-min.jpg")
        );
    }

    #[test]
    fn variants_keep_the_directory() {
        assert_eq!(
            original_variant(Path::new("a/b/c/shot.png")),
            PathBuf::from("a/b/c/shot-original.png")
        );
    }

    #[test]
    fn extension_case_is_preserved() {
        assert_eq!(
            min_variant(Path::new("shot.JPG")),
            PathBuf::from("shot-min.JPG")
        );
    }

    #[test]
    fn stem_with_dots_keeps_only_last_extension() {
        assert_eq!(
            original_variant(Path::new("trip.day1.jpeg")),
            PathBuf::from("trip.day1-original.jpeg")
        );
    }

    #[test]
    fn no_extension_appends_suffix() {
        assert_eq!(
            original_variant(Path::new("photos/dawn")),
            PathBuf::from("photos/dawn-original")
        );
    }

    #[test]
    fn derived_stems_are_detected() {
        assert!(is_derived_stem("dawn-original"));
        assert!(is_derived_stem("dawn-min"));
        assert!(is_derived_stem("dawn-min-extra"));
        assert!(!is_derived_stem("dawn"));
        assert!(!is_derived_stem("original-dawn-o"));
    }

    #[test]
    fn substring_match_is_deliberate() {
        // "-minimal" contains "-min": such files are skipped. The rule is a
        // substring check on the stem, kept identical to the filter that
        // guards re-runs.
        assert!(is_derived_stem("dawn-minimal"));
    }
}
