//! Height to color mapping.

use serde::{Deserialize, Serialize};

pub const BLACK: [u8; 4] = [0, 0, 0, 255];
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Linearly interpolates between two RGBA colors, with `t` clamped to [0, 1].
pub fn lerp_rgba(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let mut out = [0u8; 4];
    for i in 0..4 {
        let v = a[i] as f32 + (b[i] as f32 - a[i] as f32) * t;
        out[i] = v.round() as u8;
    }
    out
}

/// Grayscale color for a height: black at 0.0, white at 1.0.
pub fn lerp_gray(t: f32) -> [u8; 4] {
    lerp_rgba(BLACK, WHITE, t)
}

/// A terrain region drawn with a flat color up to a height threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBand {
    pub name: String,
    /// Inclusive upper bound of the band in normalized height.
    pub max_height: f32,
    pub color: [u8; 3],
}

impl ColorBand {
    pub fn new(name: &str, max_height: f32, color: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            max_height,
            color,
        }
    }

    /// A water-to-snow palette for normalized heights.
    pub fn default_terrain() -> Vec<ColorBand> {
        vec![
            ColorBand::new("deep_water", 0.3, [25, 50, 120]),
            ColorBand::new("shallow_water", 0.4, [55, 100, 190]),
            ColorBand::new("sand", 0.45, [210, 200, 125]),
            ColorBand::new("grass", 0.55, [85, 150, 30]),
            ColorBand::new("forest", 0.6, [60, 105, 25]),
            ColorBand::new("rock", 0.7, [90, 70, 60]),
            ColorBand::new("mountain", 0.9, [70, 60, 55]),
            ColorBand::new("snow", 1.0, [250, 250, 250]),
        ]
    }
}

/// Color of the first band whose threshold is at or above `height`.
///
/// Heights above every band take the last band's color; an empty palette
/// falls back to grayscale.
pub fn band_color(bands: &[ColorBand], height: f32) -> [u8; 4] {
    let band = bands
        .iter()
        .find(|band| height <= band.max_height)
        .or_else(|| bands.last());
    match band {
        Some(band) => [band.color[0], band.color[1], band.color[2], 255],
        None => lerp_gray(height),
    }
}
