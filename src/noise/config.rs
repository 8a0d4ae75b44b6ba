//! Noise map generation parameters.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::backend::NoiseBackend;

/// Smallest usable noise scale. Non-positive scales are clamped to this.
pub const MIN_SCALE: f32 = 0.0001;

/// Errors produced when a configuration cannot drive generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoiseConfigError {
    #[error("Invalid dimensions: {width}x{height} (both must be > 0)")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Octave count must be at least 1")]
    NoOctaves,
    #[error("Parameter '{0}' must be finite, got {1}")]
    NonFinite(&'static str, f32),
}

/// Configuration for the fractal noise map generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfiguration {
    /// Width of the noise map in cells.
    pub width: u32,
    /// Height of the noise map in cells.
    pub height: u32,
    /// Number of individual layers of noise.
    pub octaves: u8,
    /// Frequency multiplier applied per octave.
    pub lacunarity: f32,
    /// Amplitude multiplier applied per octave.
    pub persistence: f32,
    /// Offset added to every octave's sampling origin.
    pub offset: Vec2,
    /// Random seed for reproducible generation.
    pub seed: i32,
    /// Zoom of the noise: cells per unit of noise space.
    pub scale: f32,
    /// Gradient noise implementation.
    pub backend: NoiseBackend,
}

impl Default for NoiseConfiguration {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            octaves: 3,
            lacunarity: 2.0,
            persistence: 0.5,
            offset: Vec2::ZERO,
            seed: 0,
            scale: 25.0,
            backend: NoiseBackend::default(),
        }
    }
}

impl NoiseConfiguration {
    /// Creates a new configuration with the given seed.
    pub fn with_seed(seed: i32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Rolling hills: few octaves, fast amplitude falloff.
    pub fn smooth(seed: i32) -> Self {
        Self {
            octaves: 2,
            lacunarity: 2.0,
            persistence: 0.35,
            scale: 60.0,
            seed,
            ..Default::default()
        }
    }

    /// Broken, mountainous terrain with many detailed octaves.
    pub fn rugged(seed: i32) -> Self {
        Self {
            octaves: 6,
            lacunarity: 2.2,
            persistence: 0.55,
            scale: 40.0,
            seed,
            ..Default::default()
        }
    }

    /// Sets the grid dimensions.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Checks that the configuration describes a non-empty, finite noise map.
    pub fn validate(&self) -> Result<(), NoiseConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(NoiseConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.octaves == 0 {
            return Err(NoiseConfigError::NoOctaves);
        }
        let finite = [
            ("lacunarity", self.lacunarity),
            ("persistence", self.persistence),
            ("offset.x", self.offset.x),
            ("offset.y", self.offset.y),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(NoiseConfigError::NonFinite(name, value));
            }
        }
        Ok(())
    }

    /// Scale actually used for sampling.
    pub fn effective_scale(&self) -> f32 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            MIN_SCALE
        }
    }

    /// Upper bound of `|height|`: the sum of all octave amplitudes.
    pub fn amplitude_envelope(&self) -> f32 {
        let mut amplitude = 1.0f32;
        let mut total = 0.0f32;
        for _ in 0..self.octaves {
            total += amplitude.abs();
            amplitude *= self.persistence;
        }
        total
    }

    /// Number of cells in the noise map.
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}
