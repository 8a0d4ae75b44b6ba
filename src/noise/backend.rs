//! Single-octave gradient noise sources.

use ::noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};
use simdnoise::*;

/// Which gradient noise implementation feeds the fractal sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseBackend {
    /// Classic 2D Perlin noise, sampled per cell.
    Perlin,
    /// SIMD gradient noise, generated a row at a time.
    SimdGradient,
}

impl Default for NoiseBackend {
    fn default() -> Self {
        Self::Perlin
    }
}

impl NoiseBackend {
    pub fn name(&self) -> &'static str {
        match self {
            NoiseBackend::Perlin => "perlin",
            NoiseBackend::SimdGradient => "simd-gradient",
        }
    }
}

/// A seeded instance of a [`NoiseBackend`].
///
/// Every value it produces is clamped to [-1, 1].
#[derive(Debug, Clone)]
pub enum NoiseSource {
    Perlin(Perlin),
    SimdGradient { seed: i32 },
}

impl NoiseSource {
    pub fn new(backend: NoiseBackend, seed: i32) -> Self {
        match backend {
            NoiseBackend::Perlin => NoiseSource::Perlin(Perlin::new(seed as u32)),
            NoiseBackend::SimdGradient => NoiseSource::SimdGradient { seed },
        }
    }

    /// Samples the noise at a single point.
    pub fn sample(&self, x: f64, y: f64) -> f32 {
        match self {
            NoiseSource::Perlin(perlin) => (perlin.get([x, y]) as f32).clamp(-1.0, 1.0),
            NoiseSource::SimdGradient { seed } => simd_point(*seed, x, y),
        }
    }

    /// Writes noise for the points `(start_x + i * step, y)` into `out[i]`.
    ///
    /// `step` must be non-zero.
    pub fn fill_row(&self, start_x: f64, step: f64, y: f64, out: &mut [f32]) {
        if out.is_empty() {
            return;
        }
        match self {
            NoiseSource::Perlin(perlin) => {
                for (i, value) in out.iter_mut().enumerate() {
                    let x = start_x + i as f64 * step;
                    *value = (perlin.get([x, y]) as f32).clamp(-1.0, 1.0);
                }
            }
            NoiseSource::SimdGradient { seed } => {
                // simdnoise samples (offset + i) * freq, so express the
                // origin in step units.
                let freq = step as f32;
                let origin_x = (start_x / step) as f32;
                let origin_y = (y / step) as f32;
                let end_x = origin_x + out.len() as f32;

                if !(freq.is_normal() && origin_x.is_finite() && origin_y.is_finite() && end_x.is_finite()) {
                    // Step not representable in f32: sample each point directly.
                    for (i, value) in out.iter_mut().enumerate() {
                        *value = simd_point(*seed, start_x + i as f64 * step, y);
                    }
                    return;
                }

                let (row, _, _) = NoiseBuilder::gradient_2d_offset(origin_x, out.len(), origin_y, 1)
                    .with_seed(*seed)
                    .with_freq(freq)
                    .generate();

                for (value, noise) in out.iter_mut().zip(row) {
                    *value = finite_clamped(noise);
                }
            }
        }
    }
}

fn simd_point(seed: i32, x: f64, y: f64) -> f32 {
    let (noise, _, _) = NoiseBuilder::gradient_2d_offset(x as f32, 1, y as f32, 1)
        .with_seed(seed)
        .with_freq(1.0)
        .generate();
    noise.first().copied().map_or(0.0, finite_clamped)
}

/// Clamps to [-1, 1]. Non-finite noise (coordinates past f32 range)
/// contributes nothing.
fn finite_clamped(noise: f32) -> f32 {
    if noise.is_finite() {
        noise.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perlin_range() {
        let source = NoiseSource::new(NoiseBackend::Perlin, 7);
        for i in 0..200 {
            let v = source.sample(i as f64 * 0.173, i as f64 * -0.311);
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_perlin_row_matches_points() {
        let source = NoiseSource::new(NoiseBackend::Perlin, 3);
        let mut row = vec![0.0f32; 16];
        source.fill_row(10.0, 0.25, 4.5, &mut row);
        for (i, &v) in row.iter().enumerate() {
            let single = source.sample(10.0 + i as f64 * 0.25, 4.5);
            assert!((v - single).abs() < 1e-6);
        }
    }

    #[test]
    fn test_simd_row_in_range_and_reproducible() {
        let source = NoiseSource::new(NoiseBackend::SimdGradient, 11);
        let mut a = vec![0.0f32; 32];
        let mut b = vec![0.0f32; 32];
        source.fill_row(-25.0, 0.1, 3.0, &mut a);
        source.fill_row(-25.0, 0.1, 3.0, &mut b);
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_simd_row_matches_points() {
        let source = NoiseSource::new(NoiseBackend::SimdGradient, 5);
        let mut row = vec![0.0f32; 24];
        source.fill_row(3.7, 0.04, -1.25, &mut row);
        for (i, &v) in row.iter().enumerate() {
            let single = source.sample(3.7 + i as f64 * 0.04, -1.25);
            assert!((v - single).abs() < 1e-4, "i={} row={} single={}", i, v, single);
        }
    }

    #[test]
    fn test_simd_degenerate_steps_stay_finite() {
        let source = NoiseSource::new(NoiseBackend::SimdGradient, 9);
        let mut row = vec![0.0f32; 8];
        for step in [4e40, 1e-50] {
            source.fill_row(0.0, step, 0.0, &mut row);
            assert!(row.iter().all(|v| v.is_finite() && (-1.0..=1.0).contains(v)), "step {}", step);
        }
        assert!(source.sample(1e300, -1e300).is_finite());
    }

    #[test]
    fn test_empty_row() {
        let source = NoiseSource::new(NoiseBackend::SimdGradient, 0);
        let mut out: [f32; 0] = [];
        source.fill_row(0.0, 1.0, 0.0, &mut out);
    }

    #[test]
    fn test_backend_serde_names() {
        let json = serde_json::to_string(&NoiseBackend::SimdGradient).unwrap();
        assert_eq!(json, "\"simd_gradient\"");
    }
}
