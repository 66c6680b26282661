//! Full-run integration tests: a synthetic content tree goes through the
//! complete pass (catalog init → walk → series → manifest write), then
//! through it again to verify the re-run guard.

use image::{ImageEncoder, RgbImage, RgbaImage};
use photoprep::catalog::Catalog;
use photoprep::{manifest, scan, series};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 233) as u8, (y % 227) as u8, 80])
    });
    let file = fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new_with_quality(writer, 90)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

fn write_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x * 7 % 256) as u8, (y * 11 % 256) as u8, 150, 255])
    });
    img.save(path).unwrap();
}

/// The same pass the binary runs after its prompt.
fn run_pass(root: &Path) -> manifest::Manifest {
    let catalog = Catalog::open(&root.join("images.db")).unwrap();
    let mut photos = Vec::new();
    scan::process_directory(root, &catalog, &mut photos);
    let series = series::collect_series(root).unwrap();
    let manifest = manifest::Manifest { photos, series };
    manifest::save(&root.join("photos.json"), &manifest).unwrap();
    manifest
}

fn build_tree(root: &Path) {
    fs::create_dir(root.join("Summer Trip")).unwrap();
    fs::create_dir(root.join("2023_Winter!")).unwrap();
    write_jpeg(&root.join("Summer Trip/beach.jpg"), 80, 64);
    write_png(&root.join("2023_Winter!/slope.png"), 32, 24);
    fs::write(root.join("Summer Trip/notes.txt"), "packing list").unwrap();
}

#[test]
fn first_pass_processes_the_whole_tree() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    build_tree(root);
    let beach_bytes = fs::read(root.join("Summer Trip/beach.jpg")).unwrap();

    let result = run_pass(root);

    // Three artifacts per image, originals moved not copied.
    for stem in ["Summer Trip/beach", "2023_Winter!/slope"] {
        let ext = if stem.ends_with("beach") { "jpg" } else { "png" };
        assert!(root.join(format!("{stem}.{ext}")).exists());
        assert!(root.join(format!("{stem}-original.{ext}")).exists());
        assert!(root.join(format!("{stem}-min.{ext}")).exists());
    }
    assert_eq!(
        fs::read(root.join("Summer Trip/beach-original.jpg")).unwrap(),
        beach_bytes,
        "the renamed original must be byte-identical to the source"
    );
    assert_ne!(
        fs::read(root.join("Summer Trip/beach.jpg")).unwrap(),
        beach_bytes,
        "the optimized file is a re-encode, not a copy"
    );

    // Thumbnails are 1/8 scale.
    assert_eq!(
        image::image_dimensions(root.join("Summer Trip/beach-min.jpg")).unwrap(),
        (10, 8)
    );
    assert_eq!(
        image::image_dimensions(root.join("2023_Winter!/slope-min.png")).unwrap(),
        (4, 3)
    );

    // The non-image file was never touched.
    assert_eq!(
        fs::read_to_string(root.join("Summer Trip/notes.txt")).unwrap(),
        "packing list"
    );

    // Manifest: one record per image, one series per subdirectory.
    assert_eq!(result.photos.len(), 2);
    let slugs: BTreeSet<String> = result.series.iter().map(|s| s.slug.clone()).collect();
    assert_eq!(
        slugs,
        BTreeSet::from(["summer-trip".to_string(), "2023_winter".to_string()])
    );

    // Catalog: one row per image.
    let catalog = Catalog::open(&root.join("images.db")).unwrap();
    assert_eq!(catalog.count().unwrap(), 2);
}

#[test]
fn manifest_file_matches_the_returned_structure() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    build_tree(root);

    run_pass(root);

    let json = fs::read_to_string(root.join("photos.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let photos = value["photos"].as_array().unwrap();
    assert_eq!(photos.len(), 2);
    for photo in photos {
        for key in ["original", "optimized", "min"] {
            let entry = &photo[key];
            let path = entry["path"].as_str().unwrap();
            assert!(path.starts_with('/'), "artifact path {path} must be rooted");
            assert!(entry["size"]["w"].as_u64().unwrap() >= 1);
            assert!(entry["size"]["h"].as_u64().unwrap() >= 1);
            assert!(entry["size"]["kb"].as_f64().unwrap() > 0.0);
        }
    }

    let series = value["series"].as_array().unwrap();
    assert_eq!(series.len(), 2);
    for record in series {
        assert_eq!(record["year"], 2024);
        assert_eq!(record["frontPage"], false);
        assert_eq!(record["keywords"].as_array().unwrap().len(), 0);
        assert!(record["seriesName"].is_string());
        assert!(record["slug"].is_string());
    }
}

#[test]
fn second_pass_is_a_no_op_for_processed_images() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    build_tree(root);

    run_pass(root);
    let original_bytes = fs::read(root.join("Summer Trip/beach-original.jpg")).unwrap();
    let optimized_bytes = fs::read(root.join("Summer Trip/beach.jpg")).unwrap();
    let min_bytes = fs::read(root.join("Summer Trip/beach-min.jpg")).unwrap();

    let second = run_pass(root);

    // Every candidate hits the rename-collision guard: prior artifacts are
    // untouched and no new bookkeeping is produced.
    assert_eq!(
        fs::read(root.join("Summer Trip/beach-original.jpg")).unwrap(),
        original_bytes
    );
    assert_eq!(
        fs::read(root.join("Summer Trip/beach.jpg")).unwrap(),
        optimized_bytes
    );
    assert_eq!(
        fs::read(root.join("Summer Trip/beach-min.jpg")).unwrap(),
        min_bytes
    );
    assert!(second.photos.is_empty());

    let catalog = Catalog::open(&root.join("images.db")).unwrap();
    assert_eq!(catalog.count().unwrap(), 2, "no rows added on the re-run");

    // The manifest is overwritten wholesale: the re-run's file reports no
    // photos but still lists the series.
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join("photos.json")).unwrap()).unwrap();
    assert_eq!(value["photos"].as_array().unwrap().len(), 0);
    assert_eq!(value["series"].as_array().unwrap().len(), 2);
}

#[test]
fn catalog_rows_carry_artifact_names_and_location() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::create_dir(root.join("trips")).unwrap();
    write_jpeg(&root.join("trips/dawn.jpg"), 48, 32);

    run_pass(root);

    let conn = rusqlite::Connection::open(root.join("images.db")).unwrap();
    let (original_name, optimized_name, resized_name, location): (String, String, String, String) =
        conn.query_row(
            "SELECT original_name, optimized_name, resized_name, location FROM images",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .unwrap();

    assert_eq!(original_name, "dawn-original.jpg");
    assert_eq!(optimized_name, "dawn.jpg");
    assert_eq!(resized_name, "dawn-min.jpg");

    let root_name = root.file_name().unwrap().to_string_lossy();
    assert_eq!(location, format!("/{root_name}/trips/dawn.jpg"));
}

#[test]
fn run_recovers_after_a_broken_image() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::write(root.join("broken.jpg"), "not an image at all").unwrap();
    write_jpeg(&root.join("fine.jpg"), 40, 40);

    let result = run_pass(root);

    // The broken image aborted mid-pipeline; the good one still made it.
    assert_eq!(result.photos.len(), 1);
    assert!(root.join("fine-min.jpg").exists());
    assert!(root.join("broken-original.jpg").exists());
    assert!(!root.join("broken-min.jpg").exists());

    let catalog = Catalog::open(&root.join("images.db")).unwrap();
    assert_eq!(catalog.count().unwrap(), 1);
}
