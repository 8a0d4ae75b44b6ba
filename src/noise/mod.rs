//! Noise generation module for heightmap synthesis.
//!
//! Sums octaves of 2D gradient noise (Perlin by default, or simdnoise
//! gradient noise) into a fractal value per grid cell.

mod backend;
mod config;
mod fractal;

pub use backend::{NoiseBackend, NoiseSource};
pub use config::{NoiseConfigError, NoiseConfiguration, MIN_SCALE};
pub use fractal::{octave_offsets, FractalSampler, OCTAVE_OFFSET_RANGE};
