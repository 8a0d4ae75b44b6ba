//! Procedural terrain from fractal noise.
//!
//! This crate generates heightmaps by summing octaves of 2D Perlin noise,
//! maps them to grayscale (or banded) textures, and triangulates them into
//! regular grid meshes.

pub mod config;
pub mod export;
pub mod mesh;
pub mod noise;
pub mod terrain;
pub mod texture;

pub use config::{ConfigError, GeneratorConfig};
pub use mesh::{build_mesh, MeshData, MeshError, MeshSettings};
pub use crate::noise::{NoiseBackend, NoiseConfiguration};
pub use terrain::{generate_heightmap, HeightCurve, Heightmap, MapGenerator};
pub use texture::{build_color_map, build_texture, TextureSettings};
