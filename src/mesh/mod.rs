//! Grid mesh construction from heightmaps.
//!
//! Produces plain vertex/UV/index buffers; uploading them to a renderer is
//! left to the caller.

mod builder;
mod data;

pub use builder::{build_mesh, build_mesh_with, MeshSettings};
pub use data::{MeshData, MeshError, MAX_VERTICES};
