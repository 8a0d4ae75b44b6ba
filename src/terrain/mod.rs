//! Terrain generation module.
//!
//! Provides the Heightmap data structure, the fractal noise map generator,
//! and height curves used to shape terrain before meshing.

mod curve;
mod generator;
mod heightmap;

pub use curve::{CurveError, CurveKey, HeightCurve};
pub use generator::{generate_heightmap, GenerateError, MapGenerator};
pub use heightmap::{Heightmap, HeightmapError};
