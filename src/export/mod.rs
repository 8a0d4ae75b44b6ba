//! Export module for saving terrain data to files.
//!
//! Supports 16-bit PNG and RAW heightmaps, 8-bit RGBA texture PNGs and
//! Wavefront OBJ meshes.

mod obj;
mod png;
mod raw;

pub use obj::{export_mesh_obj, write_obj, ObjExportError};
pub use png::{export_heightmap_png, export_range, export_texture_png, PngExportError, PngExportOptions};
pub use raw::{expected_file_size, export_heightmap_raw, RawExportError, RawFormat};
