//! Multi-octave fractal noise summation over a 2D grid.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::backend::{NoiseBackend, NoiseSource};
use super::config::NoiseConfiguration;

/// Half-width of the range each octave's random offset is drawn from.
pub const OCTAVE_OFFSET_RANGE: i32 = 100_000;

/// Draws the random integer shift of every octave from an RNG seeded with
/// `config.seed`, each component in `[-100000, 100000)`.
fn octave_shifts(config: &NoiseConfiguration) -> Vec<Vec2> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed as u32 as u64);

    (0..config.octaves)
        .map(|_| {
            let x = rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE) as f32;
            let y = rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE) as f32;
            Vec2::new(x, y)
        })
        .collect()
}

/// Computes the sampling origin of every octave.
///
/// Each octave is shifted by a random integer offset in
/// `[-100000, 100000)` per axis, drawn from an RNG seeded with
/// `config.seed`, plus the configured `offset`.
pub fn octave_offsets(config: &NoiseConfiguration) -> Vec<Vec2> {
    octave_shifts(config)
        .into_iter()
        .map(|shift| shift + config.offset)
        .collect()
}

/// Seed of one SIMD octave. The random shift selects the noise field
/// instead of translating it, so simdnoise's f32 coordinates stay near
/// the configured offset.
fn simd_octave_seed(seed: i32, octave: usize, shift: Vec2) -> i32 {
    seed.wrapping_add(octave as i32 * 31337)
        ^ (shift.x as i32).wrapping_mul(73_856_093)
        ^ (shift.y as i32).wrapping_mul(19_349_663)
}

#[derive(Debug, Clone)]
struct Octave {
    source: NoiseSource,
    origin: Vec2,
}

/// Samples fractal noise for grid cells of a fixed configuration.
///
/// Octave `i` has amplitude `persistence^i` and frequency `lacunarity^i`.
/// A cell `(x, y)` is sampled at `(x / scale * f + ox, y / scale * f + oy)`.
#[derive(Debug, Clone)]
pub struct FractalSampler {
    octaves: Vec<Octave>,
    scale: f64,
    lacunarity: f64,
    persistence: f32,
    envelope: f32,
}

impl FractalSampler {
    pub fn new(config: &NoiseConfiguration) -> Self {
        let octaves = match config.backend {
            NoiseBackend::Perlin => {
                let source = NoiseSource::new(NoiseBackend::Perlin, config.seed);
                octave_offsets(config)
                    .into_iter()
                    .map(|origin| Octave {
                        source: source.clone(),
                        origin,
                    })
                    .collect()
            }
            NoiseBackend::SimdGradient => octave_shifts(config)
                .into_iter()
                .enumerate()
                .map(|(i, shift)| Octave {
                    source: NoiseSource::new(
                        NoiseBackend::SimdGradient,
                        simd_octave_seed(config.seed, i, shift),
                    ),
                    origin: config.offset,
                })
                .collect(),
        };

        Self {
            octaves,
            scale: config.effective_scale() as f64,
            lacunarity: config.lacunarity as f64,
            persistence: config.persistence,
            envelope: config.amplitude_envelope(),
        }
    }

    /// Bound on the absolute value of any sample.
    pub fn envelope(&self) -> f32 {
        self.envelope
    }

    pub fn octave_count(&self) -> usize {
        self.octaves.len()
    }

    /// Samples the fractal value of a single cell.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let mut amplitude = 1.0f32;
        let mut frequency = 1.0f64;
        let mut total = 0.0f32;

        for octave in &self.octaves {
            let sample_x = x as f64 / self.scale * frequency + octave.origin.x as f64;
            let sample_y = y as f64 / self.scale * frequency + octave.origin.y as f64;

            total += octave.source.sample(sample_x, sample_y) * amplitude;

            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        total
    }

    /// Samples every cell of row `y`, writing `out[x]` for `x in 0..out.len()`.
    pub fn sample_row(&self, y: u32, out: &mut [f32]) {
        out.fill(0.0);
        let mut layer = vec![0.0f32; out.len()];

        let mut amplitude = 1.0f32;
        let mut frequency = 1.0f64;

        for octave in &self.octaves {
            let step = frequency / self.scale;
            let origin_x = octave.origin.x as f64;
            let sample_y = y as f64 / self.scale * frequency + octave.origin.y as f64;

            // Zero-frequency octaves collapse onto a single point.
            if step != 0.0 {
                octave.source.fill_row(origin_x, step, sample_y, &mut layer);
            } else {
                layer.fill(octave.source.sample(origin_x, sample_y));
            }

            for (total, value) in out.iter_mut().zip(&layer) {
                *total += value * amplitude;
            }

            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }
    }
}
