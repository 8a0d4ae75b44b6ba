//! Heightmap generation using fractal noise.

use log::debug;
use rayon::prelude::*;
use thiserror::Error;

use super::heightmap::{Heightmap, HeightmapError};
use crate::noise::{FractalSampler, NoiseConfigError, NoiseConfiguration};

/// Errors that can occur while generating a heightmap.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Invalid noise configuration: {0}")]
    Config(#[from] NoiseConfigError),
    #[error("Heightmap assembly failed: {0}")]
    Heightmap(#[from] HeightmapError),
}

/// Generates heightmaps from a fixed [`NoiseConfiguration`].
#[derive(Debug, Clone)]
pub struct MapGenerator {
    config: NoiseConfiguration,
}

impl MapGenerator {
    pub fn new(config: NoiseConfiguration) -> Self {
        Self { config }
    }

    /// Configuration used for noise map generation.
    pub fn configuration(&self) -> &NoiseConfiguration {
        &self.config
    }

    /// Generates a heightmap using the stored configuration.
    ///
    /// Rows are filled in parallel with rayon; each row only writes its own
    /// slice, so the result does not depend on scheduling.
    pub fn generate_heightmap(&self) -> Result<Heightmap, GenerateError> {
        generate_heightmap(&self.config)
    }

    /// Generates a heightmap with `seed` and `scale` overriding the stored values.
    pub fn generate_with(&self, seed: i32, scale: f32) -> Result<Heightmap, GenerateError> {
        let config = NoiseConfiguration {
            seed,
            scale,
            ..self.config.clone()
        };
        generate_heightmap(&config)
    }
}

/// Generates a heightmap for the given configuration.
pub fn generate_heightmap(config: &NoiseConfiguration) -> Result<Heightmap, GenerateError> {
    config.validate()?;

    if config.scale != config.effective_scale() {
        debug!(
            "Noise scale {} is not positive, using {}",
            config.scale,
            config.effective_scale()
        );
    }

    let sampler = FractalSampler::new(config);
    let width = config.width as usize;
    let mut values = vec![0.0f32; config.cell_count()];

    values
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| sampler.sample_row(y as u32, row));

    let heightmap = Heightmap::from_values(config.width, config.height, values)?;

    let (min, max) = heightmap.height_range();
    debug!(
        "Generated {}x{} heightmap ({} octaves, {}): range [{:.4}, {:.4}], envelope {:.4}",
        config.width,
        config.height,
        sampler.octave_count(),
        config.backend.name(),
        min,
        max,
        sampler.envelope()
    );

    Ok(heightmap)
}
