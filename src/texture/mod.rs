//! Texture building from heightmaps.
//!
//! Maps each height to a color (grayscale by default) and lays the colors
//! out row-major, one pixel per heightmap cell.

mod color;

use image::RgbaImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::terrain::Heightmap;

pub use color::{band_color, lerp_gray, lerp_rgba, ColorBand, BLACK, WHITE};

/// Options for texture building.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureSettings {
    /// Remap heights to [0, 1] over their actual range before coloring.
    ///
    /// Without it, raw heights are used and anything outside [0, 1] clamps.
    pub normalize: bool,
    /// Region palette; empty means grayscale.
    pub bands: Vec<ColorBand>,
}

fn prepared(heightmap: &Heightmap, normalize: bool) -> std::borrow::Cow<'_, Heightmap> {
    if normalize {
        std::borrow::Cow::Owned(heightmap.normalized())
    } else {
        std::borrow::Cow::Borrowed(heightmap)
    }
}

/// Builds the grayscale color map of a heightmap.
///
/// Pixel `(x, y)` is at index `y * width + x`.
pub fn build_color_map(heightmap: &Heightmap) -> Vec<[u8; 4]> {
    let width = heightmap.width() as usize;
    let mut colors = vec![BLACK; heightmap.len()];

    colors
        .par_chunks_mut(width)
        .zip(heightmap.values().par_chunks(width))
        .for_each(|(out, heights)| {
            for (pixel, &h) in out.iter_mut().zip(heights) {
                *pixel = lerp_gray(h);
            }
        });

    colors
}

fn fill_image(heightmap: &Heightmap, color: impl Fn(f32) -> [u8; 4] + Sync) -> RgbaImage {
    let width = heightmap.width() as usize;
    let mut image = RgbaImage::new(heightmap.width(), heightmap.height());
    let buffer: &mut [u8] = &mut image;

    buffer
        .par_chunks_mut(width * 4)
        .zip(heightmap.values().par_chunks(width))
        .for_each(|(out, heights)| {
            for (pixel, &h) in out.chunks_exact_mut(4).zip(heights) {
                pixel.copy_from_slice(&color(h));
            }
        });

    image
}

/// Builds a grayscale RGBA texture, black at height 0 and white at height 1.
pub fn build_texture(heightmap: &Heightmap, normalize: bool) -> RgbaImage {
    let source = prepared(heightmap, normalize);
    fill_image(&source, lerp_gray)
}

/// Builds a texture colored by height regions.
pub fn build_gradient_texture(heightmap: &Heightmap, bands: &[ColorBand], normalize: bool) -> RgbaImage {
    let source = prepared(heightmap, normalize);
    fill_image(&source, |h| band_color(bands, h))
}

/// Builds a texture according to `settings`.
pub fn build_texture_with(heightmap: &Heightmap, settings: &TextureSettings) -> RgbaImage {
    if settings.bands.is_empty() {
        build_texture(heightmap, settings.normalize)
    } else {
        build_gradient_texture(heightmap, &settings.bands, settings.normalize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Heightmap {
        Heightmap::from_values(3, 2, vec![-1.0, 0.0, 0.5, 1.0, 2.0, 0.25]).unwrap()
    }

    #[test]
    fn test_color_map_layout() {
        let colors = build_color_map(&ramp());
        assert_eq!(colors.len(), 6);
        assert_eq!(colors[0], BLACK);
        assert_eq!(colors[1], BLACK);
        assert_eq!(colors[2], [128, 128, 128, 255]);
        assert_eq!(colors[3], WHITE);
        assert_eq!(colors[4], WHITE);
        assert_eq!(colors[5], lerp_gray(0.25));
    }

    #[test]
    fn test_texture_matches_color_map() {
        let map = ramp();
        let texture = build_texture(&map, false);
        assert_eq!(texture.dimensions(), (3, 2));
        for (i, color) in build_color_map(&map).iter().enumerate() {
            let (x, y) = ((i % 3) as u32, (i / 3) as u32);
            assert_eq!(&texture.get_pixel(x, y).0, color);
        }
    }

    #[test]
    fn test_normalized_texture_spans_full_range() {
        let texture = build_texture(&ramp(), true);
        assert_eq!(texture.get_pixel(0, 0).0, BLACK);
        assert_eq!(texture.get_pixel(1, 1).0, WHITE);
        // 0.0 sits a third of the way between -1.0 and 2.0.
        assert_eq!(texture.get_pixel(1, 0).0, lerp_gray(1.0 / 3.0));
    }

    #[test]
    fn test_gradient_texture() {
        let bands = vec![
            ColorBand::new("low", 0.5, [0, 0, 255]),
            ColorBand::new("high", 1.0, [0, 255, 0]),
        ];
        let texture = build_gradient_texture(&ramp(), &bands, false);
        assert_eq!(texture.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(texture.get_pixel(0, 1).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_settings_dispatch() {
        let settings = TextureSettings::default();
        assert_eq!(build_texture_with(&ramp(), &settings), build_texture(&ramp(), false));
    }
}
