//! Top-level generator configuration.
//!
//! Bundles noise, mesh and texture settings so a whole run can be described
//! by a single JSON file. Missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mesh::MeshSettings;
use crate::noise::{NoiseConfigError, NoiseConfiguration};
use crate::texture::TextureSettings;

/// Errors that can occur while loading or saving a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] NoiseConfigError),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub noise: NoiseConfiguration,
    pub mesh: MeshSettings,
    pub texture: TextureSettings,
}

impl GeneratorConfig {
    /// Reads and validates a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = serde_json::from_str(text)?;
        config.noise.validate()?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseBackend;
    use crate::terrain::HeightCurve;
    use tempfile::tempdir;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GeneratorConfig::from_json(
            r#"{ "noise": { "seed": 7, "backend": "simd_gradient" }, "mesh": { "height_scale": 3.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.noise.seed, 7);
        assert_eq!(config.noise.backend, NoiseBackend::SimdGradient);
        assert_eq!(config.noise.width, 200);
        assert_eq!(config.mesh.height_scale, 3.0);
        assert!(config.mesh.curve.is_identity());
        assert!(!config.texture.normalize);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = GeneratorConfig::from_json(r#"{ "noise": { "width": 0 } }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        assert!(matches!(GeneratorConfig::from_json("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = GeneratorConfig::default();
        config.noise = NoiseConfiguration::rugged(99).with_size(64, 64);
        config.mesh.curve = HeightCurve::ease_in();
        config.texture.normalize = true;

        config.save(&path).unwrap();
        let loaded = GeneratorConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = GeneratorConfig::load(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
