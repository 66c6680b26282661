//! # photoprep
//!
//! Batch image optimizer for photo portfolios. Point it at a directory and
//! it processes every JPEG/PNG underneath: the source is renamed to
//! `name-original.ext` and kept untouched, an optimized re-encode takes
//! over the source's name, and a 1/8-scale `name-min.ext` thumbnail is
//! written alongside. What happened is recorded twice — as `photos.json`
//! (one structured record per image, plus a "series" record per top-level
//! subdirectory) and as rows in a SQLite `images.db`, both living in the
//! processing root.
//!
//! # Pipeline
//!
//! Each image moves through a strict forward sequence with an
//! abort-in-place policy (see [`pipeline`]):
//!
//! ```text
//! rename → inspect → detect format → optimize → inspect
//!        → resize → inspect → record (manifest + catalog)
//! ```
//!
//! The rename doubles as the re-run guard: if `name-original.ext` already
//! exists, the image was processed before and the pipeline stops before
//! touching anything. Partial failures are not rolled back — artifacts
//! written before an abort stay on disk, but only images that reach the
//! final state appear in the manifest or the catalog.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | snapshot-first candidate discovery and the sequential run driver |
//! | [`pipeline`] | the per-image state machine |
//! | [`imaging`] | encoder profiles (JPEG / palette PNG / generic) and downscale math |
//! | [`inspect`] | file size + header-only dimension reads |
//! | [`naming`] | `-original` / `-min` filename convention and skip filter |
//! | [`manifest`] | `photos.json` records and writer |
//! | [`catalog`] | the `images.db` row store |
//! | [`series`] | series records from the root's immediate subdirectories |
//! | [`slug`] | URL-safe slug derivation |
//!
//! # Design Notes
//!
//! ## Everything Stays On Disk
//!
//! Nothing is ever deleted: originals are renamed, not replaced, and both
//! derived variants are additions. A run is cheap to undo by hand and
//! cheap to repeat — repeats are no-ops thanks to the rename guard.
//!
//! ## Sequential By Design
//!
//! One image at a time, one catalog connection, one manifest accumulator.
//! The tool's consistency story (abort-in-place, per-insert commits)
//! depends on there being no overlap between images, so there is none.
//!
//! ## Hard-Coded Encoder Profiles
//!
//! Three profiles, no knobs: progressive quality-70 JPEG (4:2:0),
//! adaptive-palette PNG, and a generic same-format fallback. The point is
//! a predictable size reduction across a whole portfolio tree, not
//! per-image tuning.

pub mod catalog;
pub mod imaging;
pub mod inspect;
pub mod manifest;
pub mod naming;
pub mod pipeline;
pub mod scan;
pub mod series;
pub mod slug;
