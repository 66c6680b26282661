//! The per-family encoding policy.
//!
//! Three fixed profiles, chosen by the content-detected format:
//!
//! | Family | Re-encode |
//! |---|---|
//! | JPEG | mozjpeg, quality 70, progressive scans, 4:2:0 chroma |
//! | PNG  | adaptive 256-color palette (when the source has color or alpha), indexed encode at best compression |
//! | other | generic re-encode in the source's own format |
//!
//! The same profile handles both the full-size optimize and the thumbnail:
//! callers hand in whatever pixel buffer they want written.

use color_quant::NeuQuant;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{DynamicImage, ImageFormat};
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
    #[error("PNG encode error: {0}")]
    Png(#[from] png::EncodingError),
}

/// Format family driving the encoder profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFamily {
    Jpeg,
    Png,
    /// Anything else is re-encoded generically in its own format.
    Other(ImageFormat),
}

impl FormatFamily {
    pub fn from_format(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => Self::Jpeg,
            ImageFormat::Png => Self::Png,
            other => Self::Other(other),
        }
    }
}

/// JPEG profile constant: quality for both the optimized and min variants.
const JPEG_QUALITY: f32 = 70.0;

/// Sampling factor for the NeuQuant palette learner (1 = slowest/best,
/// 30 = fastest). 10 is the quantizer's own recommended tradeoff.
const NEUQUANT_SAMPLE_FAC: i32 = 10;

/// Re-encode `img` through the family's optimize profile, writing to `path`.
pub fn save_optimized(
    img: &DynamicImage,
    family: FormatFamily,
    path: &Path,
) -> Result<(), EncodeError> {
    match family {
        FormatFamily::Jpeg => save_jpeg(img, path),
        FormatFamily::Png => save_png(img, path),
        FormatFamily::Other(format) => {
            img.save_with_format(path, format)?;
            Ok(())
        }
    }
}

/// Progressive JPEG at quality 70. libjpeg's default 2×2 luma sampling
/// gives 4:2:0 chroma subsampling, and mozjpeg's defaults include
/// optimized entropy coding.
fn save_jpeg(img: &DynamicImage, path: &Path) -> Result<(), EncodeError> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut compress = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
    compress.set_size(width as usize, height as usize);
    compress.set_quality(JPEG_QUALITY);
    compress.set_progressive_mode();

    let mut started = compress.start_compress(Vec::new())?;
    started.write_scanlines(rgb.as_raw())?;
    let encoded = started.finish()?;

    std::fs::write(path, encoded)?;
    Ok(())
}

/// PNG profile: full-color or alpha-carrying sources are quantized to an
/// adaptive palette and written as indexed PNG; everything else (grayscale
/// and friends) is re-encoded losslessly at best compression.
fn save_png(img: &DynamicImage, path: &Path) -> Result<(), EncodeError> {
    let color = img.color();
    if color.has_color() || color.has_alpha() {
        save_quantized_png(img, path)
    } else {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        let encoder =
            PngEncoder::new_with_quality(writer, CompressionType::Best, PngFilterType::Adaptive);
        img.write_with_encoder(encoder)?;
        Ok(())
    }
}

fn save_quantized_png(img: &DynamicImage, path: &Path) -> Result<(), EncodeError> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let quantizer = NeuQuant::new(NEUQUANT_SAMPLE_FAC, 256, rgba.as_raw());

    // Split the learned RGBA palette into the PLTE and tRNS chunks.
    let palette_rgba = quantizer.color_map_rgba();
    let mut palette = Vec::with_capacity(palette_rgba.len() / 4 * 3);
    let mut alpha = Vec::with_capacity(palette_rgba.len() / 4);
    for entry in palette_rgba.chunks_exact(4) {
        palette.extend_from_slice(&entry[..3]);
        alpha.push(entry[3]);
    }

    let indices: Vec<u8> = rgba
        .pixels()
        .map(|pixel| quantizer.index_of(&pixel.0) as u8)
        .collect();

    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(palette);
    encoder.set_trns(alpha);
    encoder.set_compression(png::Compression::Best);
    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&indices)?;
    png_writer.finish()?;
    Ok(())
}
