//! RAW heightmap export for game engine imports.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::terrain::Heightmap;

/// Errors that can occur during RAW export.
#[derive(Error, Debug)]
pub enum RawExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid height range: min ({0}) >= max ({1})")]
    InvalidHeightRange(f32, f32),
}

/// RAW sample encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RawFormat {
    /// 16-bit unsigned integer, little-endian.
    #[default]
    R16LittleEndian,
    /// 16-bit unsigned integer, big-endian.
    R16BigEndian,
    /// 32-bit float, little-endian (unnormalized).
    R32Float,
}

impl RawFormat {
    pub fn bytes_per_sample(&self) -> u64 {
        match self {
            RawFormat::R16LittleEndian | RawFormat::R16BigEndian => 2,
            RawFormat::R32Float => 4,
        }
    }
}

fn quantize(height: f32, min: f32, range: f32) -> u16 {
    let normalized = ((height - min) / range).clamp(0.0, 1.0);
    (normalized * 65535.0) as u16
}

/// Writes a heightmap as headerless row-major samples.
///
/// R16 formats map `[min_height, max_height]` onto `[0, 65535]`; R32 writes
/// heights unchanged and ignores the range.
pub fn export_heightmap_raw(
    heightmap: &Heightmap,
    path: &Path,
    format: RawFormat,
    min_height: f32,
    max_height: f32,
) -> Result<(), RawExportError> {
    if format != RawFormat::R32Float && min_height >= max_height {
        return Err(RawExportError::InvalidHeightRange(min_height, max_height));
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let range = max_height - min_height;

    match format {
        RawFormat::R16LittleEndian => {
            for &height in heightmap.values() {
                writer.write_all(&quantize(height, min_height, range).to_le_bytes())?;
            }
        }
        RawFormat::R16BigEndian => {
            for &height in heightmap.values() {
                writer.write_all(&quantize(height, min_height, range).to_be_bytes())?;
            }
        }
        RawFormat::R32Float => {
            for &height in heightmap.values() {
                writer.write_all(&height.to_le_bytes())?;
            }
        }
    }

    writer.flush()?;
    info!("Wrote {:?} heightmap to {}", format, path.display());
    Ok(())
}

/// Returns the expected file size for a RAW export.
pub fn expected_file_size(width: u32, height: u32, format: RawFormat) -> u64 {
    (width as u64) * (height as u64) * format.bytes_per_sample()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ramp(width: u32, height: u32) -> Heightmap {
        let n = (width * height) as usize;
        let values = (0..n).map(|i| (i as f32 / n as f32) * 2.0 - 1.0).collect();
        Heightmap::from_values(width, height, values).unwrap()
    }

    #[test]
    fn test_export_raw_r16() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.raw");

        export_heightmap_raw(&ramp(64, 32), &path, RawFormat::R16LittleEndian, -1.0, 1.0).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert_eq!(metadata.len(), expected_file_size(64, 32, RawFormat::R16LittleEndian));
    }

    #[test]
    fn test_export_raw_r32() {
        let map = ramp(8, 8);
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.raw");

        export_heightmap_raw(&map, &path, RawFormat::R32Float, 0.0, 0.0).unwrap();

        let data = std::fs::read(&path).unwrap();
        assert_eq!(data.len() as u64, expected_file_size(8, 8, RawFormat::R32Float));
        let first = f32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        assert_eq!(first, map.get(0, 0));
    }

    #[test]
    fn test_invalid_range_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.raw");
        let result = export_heightmap_raw(&ramp(4, 4), &path, RawFormat::R16BigEndian, 1.0, -1.0);
        assert!(matches!(result, Err(RawExportError::InvalidHeightRange(_, _))));
    }

    #[test]
    fn test_raw_content_correctness() {
        let map = Heightmap::from_values(2, 2, vec![-1.0, 0.0, 0.5, 1.0]).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.raw");

        export_heightmap_raw(&map, &path, RawFormat::R16LittleEndian, -1.0, 1.0).unwrap();

        let data = std::fs::read(&path).unwrap();
        assert_eq!(data.len(), 8);
        assert_eq!(u16::from_le_bytes([data[0], data[1]]), 0);
        let mid = u16::from_le_bytes([data[2], data[3]]);
        assert!((mid as i32 - 32767).abs() < 2);
        assert_eq!(u16::from_le_bytes([data[6], data[7]]), 65535);
    }

    #[test]
    fn test_big_endian_byte_order() {
        let map = Heightmap::from_values(1, 1, vec![1.0]).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("be.raw");
        export_heightmap_raw(&map, &path, RawFormat::R16BigEndian, 0.0, 2.0).unwrap();
        let data = std::fs::read(&path).unwrap();
        assert_eq!(u16::from_be_bytes([data[0], data[1]]), 32767);
    }
}
