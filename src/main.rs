use photoprep::{catalog::Catalog, manifest, scan, series};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    let Some(root) = prompt_for_root() else {
        return;
    };

    if let Err(e) = run(&root) {
        println!("Error initializing catalog {}: {e}", root.join("images.db").display());
    }
}

/// Ask for the processing root on stdin. Returns `None` (after printing
/// why) when the input is not a usable directory — the run never starts
/// and nothing is touched.
fn prompt_for_root() -> Option<PathBuf> {
    print!("Enter the directory path: ");
    let _ = std::io::stdout().flush();

    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        println!("Failed to read input.");
        return None;
    }
    let input = line.trim();
    let path = PathBuf::from(input);
    if !path.is_dir() {
        println!("{input} is not a valid directory.");
        return None;
    }
    // Relative input is fine, but the catalog's location column wants the
    // resolved root name.
    Some(path.canonicalize().unwrap_or(path))
}

/// One full pass: catalog init, image walk, series collection, manifest
/// write. Only catalog initialization can fail out of here; everything
/// downstream degrades per-image or per-file instead.
fn run(root: &Path) -> rusqlite::Result<()> {
    let db_path = root.join("images.db");
    let json_path = root.join("photos.json");

    let catalog = Catalog::open(&db_path)?;

    let mut photos = Vec::new();
    scan::process_directory(root, &catalog, &mut photos);

    let series = match series::collect_series(root) {
        Ok(series) => series,
        Err(e) => {
            println!("Error collecting series from {}: {e}", root.display());
            Vec::new()
        }
    };

    let manifest = manifest::Manifest { photos, series };
    match manifest::save(&json_path, &manifest) {
        Ok(()) => println!("\nJSON data saved to {}", json_path.display()),
        Err(e) => println!("Error saving JSON file {}: {e}", json_path.display()),
    }

    println!("\nProcessing complete.");
    Ok(())
}
