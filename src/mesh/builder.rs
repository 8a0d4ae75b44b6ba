//! Grid triangulation of heightmaps.

use glam::{Vec2, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use super::data::{MeshData, MeshError};
use crate::terrain::{HeightCurve, Heightmap};

/// Options for mesh building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshSettings {
    /// Vertical scale applied after the height curve.
    pub height_scale: f32,
    /// Curve applied to each height before scaling.
    pub curve: HeightCurve,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            height_scale: 10.0,
            curve: HeightCurve::default(),
        }
    }
}

/// Builds a grid mesh with one vertex per heightmap cell.
///
/// The grid is centered on the origin in the XZ plane: cell `(x, y)`
/// becomes vertex `(x - (w-1)/2, curve(h) * height_scale, (h-1)/2 - y)`
/// with UV `(x / w, y / h)`. Each interior cell emits two triangles.
pub fn build_mesh(
    heightmap: &Heightmap,
    height_scale: f32,
    curve: &HeightCurve,
) -> Result<MeshData, MeshError> {
    let width = heightmap.width();
    let height = heightmap.height();
    let top_left_x = (width as f32 - 1.0) / -2.0;
    let top_left_z = (height as f32 - 1.0) / 2.0;

    let mut mesh = MeshData::new(width, height)?;
    let mut vertex_index = 0u32;

    for (y, row) in heightmap.rows().enumerate() {
        let y = y as u32;
        for (x, &h) in row.iter().enumerate() {
            let x = x as u32;
            let i = vertex_index as usize;

            mesh.vertices[i] = Vec3::new(
                top_left_x + x as f32,
                curve.evaluate(h) * height_scale,
                top_left_z - y as f32,
            );
            mesh.uvs[i] = Vec2::new(x as f32 / width as f32, y as f32 / height as f32);

            if x < width - 1 && y < height - 1 {
                mesh.add_triangle(vertex_index, vertex_index + width + 1, vertex_index + width);
                mesh.add_triangle(vertex_index + width + 1, vertex_index, vertex_index + 1);
            }
            vertex_index += 1;
        }
    }

    debug!(
        "Built {}x{} mesh: {} vertices, {} triangles",
        width,
        height,
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

/// Builds a mesh according to `settings`.
pub fn build_mesh_with(heightmap: &Heightmap, settings: &MeshSettings) -> Result<MeshData, MeshError> {
    build_mesh(heightmap, settings.height_scale, &settings.curve)
}
