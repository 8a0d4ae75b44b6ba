//! PNG export for heightmaps and textures.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma, RgbaImage};
use log::info;
use thiserror::Error;

use crate::terrain::Heightmap;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid height range: min ({0}) >= max ({1})")]
    InvalidHeightRange(f32, f32),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// Height mapped to black.
    pub min_height: f32,
    /// Height mapped to white.
    pub max_height: f32,
    pub compression: CompressionType,
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            min_height: -1.0,
            max_height: 1.0,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngExportOptions {
    /// Creates options spanning the heightmap's actual range.
    ///
    /// A flat map gets a minimally widened range, see [`export_range`].
    pub fn auto_range(heightmap: &Heightmap) -> Self {
        let (min, max) = export_range(heightmap);
        Self {
            min_height: min,
            max_height: max,
            ..Default::default()
        }
    }
}

/// Height range to quantize `heightmap` over.
///
/// A flat map has no usable range, so `max` is nudged above `min` by a few
/// ulps relative to its magnitude.
pub fn export_range(heightmap: &Heightmap) -> (f32, f32) {
    let (min, max) = heightmap.height_range();
    if max > min {
        (min, max)
    } else {
        (min, min + min.abs().max(1.0) * f32::EPSILON * 4.0)
    }
}

/// Exports a heightmap as a 16-bit grayscale PNG.
pub fn export_heightmap_png(
    heightmap: &Heightmap,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let min = options.min_height;
    let max = options.max_height;

    if min >= max {
        return Err(PngExportError::InvalidHeightRange(min, max));
    }

    let (width, height) = (heightmap.width(), heightmap.height());
    let range = max - min;

    let img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_fn(width, height, |x, y| {
        let normalized = ((heightmap.get(x, y) - min) / range).clamp(0.0, 1.0);
        Luma([(normalized * 65535.0) as u16])
    });

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    // PNG stores 16-bit samples big-endian; the encoder expects native u16s.
    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());

    encoder.write_image(byte_slice, width, height, image::ExtendedColorType::L16)?;

    info!("Wrote 16-bit heightmap PNG to {}", path.display());
    Ok(())
}

/// Exports an RGBA texture as an 8-bit PNG.
pub fn export_texture_png(
    texture: &RgbaImage,
    path: &Path,
    compression: CompressionType,
    filter: FilterType,
) -> Result<(), PngExportError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, compression, filter);
    encoder.write_image(
        texture.as_raw(),
        texture.width(),
        texture.height(),
        image::ExtendedColorType::Rgba8,
    )?;

    info!("Wrote texture PNG to {}", path.display());
    Ok(())
}
