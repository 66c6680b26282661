//! The SQLite catalog.
//!
//! One table, `images`, one row per fully processed image. The table is
//! created if absent and never migrated or dropped; there is no update or
//! delete surface. Each insert is its own unit of work (autocommit), so a
//! crash mid-run loses at most the image being processed — never rows that
//! were already reported.
//!
//! The connection is opened once and held for the run. Processing is
//! strictly sequential, so this changes nothing observable versus opening
//! a fresh connection per insert.

use rusqlite::{Connection, Result as SqlResult, params};
use std::path::Path;

/// Flattened per-image row, one column per artifact attribute. Size and
/// dimension columns are `None` (NULL) when inspection of that artifact
/// failed.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    pub original_name: String,
    pub optimized_name: String,
    pub resized_name: String,
    pub original_size_kb: Option<f64>,
    pub optimized_size_kb: Option<f64>,
    pub resized_size_kb: Option<f64>,
    pub original_width: Option<u32>,
    pub original_height: Option<u32>,
    pub optimized_width: Option<u32>,
    pub optimized_height: Option<u32>,
    pub resized_width: Option<u32>,
    pub resized_height: Option<u32>,
    pub location: String,
}

/// Handle to the `images.db` row store.
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    /// Open (or create) the database and ensure the schema exists.
    pub fn open(db_path: &Path) -> SqlResult<Self> {
        let conn = Connection::open(db_path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS images (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                original_name TEXT,
                optimized_name TEXT,
                resized_name TEXT,
                original_size_kb REAL,
                optimized_size_kb REAL,
                resized_size_kb REAL,
                original_width INTEGER,
                original_height INTEGER,
                optimized_width INTEGER,
                optimized_height INTEGER,
                resized_width INTEGER,
                resized_height INTEGER,
                location TEXT
            )",
            [],
        )?;
        Ok(Self { conn })
    }

    /// Insert one row; committed immediately.
    pub fn insert(&self, row: &CatalogRow) -> SqlResult<()> {
        self.conn.execute(
            "INSERT INTO images (
                original_name,
                optimized_name,
                resized_name,
                original_size_kb,
                optimized_size_kb,
                resized_size_kb,
                original_width,
                original_height,
                optimized_width,
                optimized_height,
                resized_width,
                resized_height,
                location
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                row.original_name,
                row.optimized_name,
                row.resized_name,
                row.original_size_kb,
                row.optimized_size_kb,
                row.resized_size_kb,
                row.original_width,
                row.original_height,
                row.optimized_width,
                row.optimized_height,
                row.resized_width,
                row.resized_height,
                row.location,
            ],
        )?;
        Ok(())
    }

    /// Number of rows currently in the catalog.
    pub fn count(&self) -> SqlResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))
    }
}
