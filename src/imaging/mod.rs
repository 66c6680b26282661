//! Image transformation: encoding policy and downscale math.
//!
//! - **Calculations**: pure dimension math (unit testable without pixels)
//! - **Operations**: the per-family optimize profiles that actually encode
//!
//! Decoding and resampling go through the `image` crate; the JPEG profile
//! encodes with mozjpeg, the PNG profile with an adaptive palette via
//! `color_quant` + the `png` crate.

mod calculations;
pub mod operations;

pub use calculations::min_dimensions;
pub use operations::{EncodeError, FormatFamily, save_optimized};
