//! Mesh buffers for a regular grid.

use glam::{Vec2, Vec3};
use thiserror::Error;

/// Vertex ceiling for a single mesh (16-bit index buffers).
pub const MAX_VERTICES: usize = 65_000;

/// Errors that can occur when allocating mesh buffers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("Mesh is too large: {vertices} vertices (a mesh must have fewer than {max})")]
    TooManyVertices { vertices: usize, max: usize },
    #[error("Mesh grid must be at least 1x1, got {0}x{1}")]
    Empty(u32, u32),
}

/// Vertex, UV and triangle buffers of a grid mesh.
///
/// Buffers are sized from the grid dimensions up front: `width * height`
/// vertices and UVs, `(width - 1) * (height - 1) * 6` triangle indices.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub triangles: Vec<u32>,
    width: u32,
    height: u32,
    triangle_index: usize,
}

impl MeshData {
    /// Allocates buffers for a `width` x `height` vertex grid.
    pub fn new(width: u32, height: u32) -> Result<Self, MeshError> {
        if width == 0 || height == 0 {
            return Err(MeshError::Empty(width, height));
        }
        let vertex_count = (width as usize) * (height as usize);
        if vertex_count >= MAX_VERTICES {
            return Err(MeshError::TooManyVertices {
                vertices: vertex_count,
                max: MAX_VERTICES,
            });
        }
        let index_count = (width as usize - 1) * (height as usize - 1) * 6;

        Ok(Self {
            vertices: vec![Vec3::ZERO; vertex_count],
            uvs: vec![Vec2::ZERO; vertex_count],
            triangles: vec![0; index_count],
            width,
            height,
            triangle_index: 0,
        })
    }

    /// Writes the next triangle into the index buffer.
    ///
    /// # Panics
    /// Panics if the index buffer is already full.
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        let i = self.triangle_index;
        self.triangles[i..i + 3].copy_from_slice(&[a, b, c]);
        self.triangle_index += 3;
    }

    /// Number of triangle indices written so far.
    pub fn index(&self) -> usize {
        self.triangle_index
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// True once every triangle slot has been written.
    pub fn is_complete(&self) -> bool {
        self.triangle_index == self.triangles.len()
    }

    /// Area-weighted per-vertex normals.
    ///
    /// Vertices not referenced by any triangle get `Vec3::Y`.
    pub fn recalculate_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];

        for tri in self.triangles[..self.triangle_index].chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face = (self.vertices[b] - self.vertices[a]).cross(self.vertices[c] - self.vertices[a]);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }

        for normal in &mut normals {
            *normal = normal.try_normalize().unwrap_or(Vec3::Y);
        }
        normals
    }

    /// Raw vertex positions, three `f32`s per vertex.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw UV coordinates, two `f32`s per vertex.
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Triangle indices narrowed to 16 bits.
    ///
    /// Always lossless: the vertex ceiling is below `u16::MAX`.
    pub fn indices_u16(&self) -> Vec<u16> {
        self.triangles.iter().map(|&i| i as u16).collect()
    }

    /// Raw 32-bit triangle indices.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sizes() {
        let mesh = MeshData::new(4, 3).unwrap();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.uvs.len(), 12);
        assert_eq!(mesh.triangles.len(), 3 * 2 * 6);
        assert_eq!(mesh.index(), 0);
        assert!(!mesh.is_complete());
    }

    #[test]
    fn test_vertex_ceiling() {
        // 250 * 260 = 65000 sits exactly on the ceiling.
        assert_eq!(
            MeshData::new(250, 260),
            Err(MeshError::TooManyVertices {
                vertices: 65_000,
                max: MAX_VERTICES
            })
        );
        assert!(MeshData::new(254, 255).is_ok());
        assert!(matches!(MeshData::new(255, 255), Err(MeshError::TooManyVertices { .. })));
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert_eq!(MeshData::new(0, 5), Err(MeshError::Empty(0, 5)));
    }

    #[test]
    fn test_single_row_has_no_triangles() {
        let mesh = MeshData::new(5, 1).unwrap();
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.is_complete());
    }

    #[test]
    fn test_add_triangle() {
        let mut mesh = MeshData::new(2, 2).unwrap();
        mesh.add_triangle(0, 3, 2);
        mesh.add_triangle(3, 0, 1);
        assert_eq!(mesh.triangles, vec![0, 3, 2, 3, 0, 1]);
        assert!(mesh.is_complete());
    }

    #[test]
    #[should_panic]
    fn test_add_triangle_overflow_panics() {
        let mut mesh = MeshData::new(2, 2).unwrap();
        for _ in 0..3 {
            mesh.add_triangle(0, 1, 2);
        }
    }

    #[test]
    fn test_flat_quad_normals_point_up() {
        let mut mesh = MeshData::new(2, 2).unwrap();
        mesh.vertices = vec![
            Vec3::new(-0.5, 0.0, 0.5),
            Vec3::new(0.5, 0.0, 0.5),
            Vec3::new(-0.5, 0.0, -0.5),
            Vec3::new(0.5, 0.0, -0.5),
        ];
        mesh.add_triangle(0, 3, 2);
        mesh.add_triangle(3, 0, 1);
        for n in mesh.recalculate_normals() {
            assert!((n - Vec3::Y).length() < 1e-6, "normal {:?}", n);
        }
    }

    #[test]
    fn test_byte_views() {
        let mesh = MeshData::new(3, 3).unwrap();
        assert_eq!(mesh.vertex_bytes().len(), 9 * 12);
        assert_eq!(mesh.uv_bytes().len(), 9 * 8);
        assert_eq!(mesh.index_bytes().len(), 24 * 4);
        assert_eq!(mesh.indices_u16().len(), 24);
    }
}
