//! Wavefront OBJ export for grid meshes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glam::Vec3;
use log::info;
use thiserror::Error;

use crate::mesh::MeshData;

#[derive(Error, Debug)]
pub enum ObjExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Normal count {normals} does not match vertex count {vertices}")]
    NormalCountMismatch { normals: usize, vertices: usize },
}

/// Writes `mesh` to any writer in OBJ text form.
///
/// Emits `v`, `vt`, optional `vn`, then one `f` record per triangle with
/// 1-based indices.
pub fn write_obj<W: Write>(mesh: &MeshData, normals: Option<&[Vec3]>, out: &mut W) -> Result<(), ObjExportError> {
    if let Some(normals) = normals {
        if normals.len() != mesh.vertex_count() {
            return Err(ObjExportError::NormalCountMismatch {
                normals: normals.len(),
                vertices: mesh.vertex_count(),
            });
        }
    }

    writeln!(out, "# {}x{} grid mesh", mesh.width(), mesh.height())?;
    for v in &mesh.vertices {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for uv in &mesh.uvs {
        writeln!(out, "vt {} {}", uv.x, uv.y)?;
    }
    if let Some(normals) = normals {
        for n in normals {
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }

    for tri in mesh.triangles.chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        if normals.is_some() {
            writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        } else {
            writeln!(out, "f {a}/{a} {b}/{b} {c}/{c}")?;
        }
    }

    Ok(())
}

/// Exports a mesh with computed normals to an OBJ file.
pub fn export_mesh_obj(mesh: &MeshData, path: &Path) -> Result<(), ObjExportError> {
    let normals = mesh.recalculate_normals();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_obj(mesh, Some(normals.as_slice()), &mut writer)?;
    writer.flush()?;

    info!(
        "Wrote mesh ({} vertices, {} triangles) to {}",
        mesh.vertex_count(),
        mesh.triangle_count(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_mesh;
    use crate::terrain::{HeightCurve, Heightmap};
    use tempfile::tempdir;

    fn quad() -> MeshData {
        let map = Heightmap::from_values(2, 2, vec![0.0; 4]).unwrap();
        build_mesh(&map, 1.0, &HeightCurve::default()).unwrap()
    }

    #[test]
    fn test_write_obj_records() {
        let mut out = Vec::new();
        write_obj(&quad(), None, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("vt ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 0);
        let faces: Vec<_> = text.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(faces, vec!["f 1/1 4/4 3/3", "f 4/4 1/1 2/2"]);
    }

    #[test]
    fn test_normal_count_mismatch() {
        let mut out = Vec::new();
        let normals = vec![Vec3::Y; 3];
        assert!(matches!(
            write_obj(&quad(), Some(normals.as_slice()), &mut out),
            Err(ObjExportError::NormalCountMismatch { normals: 3, vertices: 4 })
        ));
    }

    #[test]
    fn test_export_mesh_obj() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mesh.obj");
        export_mesh_obj(&quad(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 4);
        assert!(text.contains("f 1/1/1 4/4/4 3/3/3"));
    }
}
