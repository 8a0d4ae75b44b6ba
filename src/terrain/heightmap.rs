//! Dense 2D grid of height values.

use thiserror::Error;

/// Errors that can occur when building a heightmap from raw data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeightmapError {
    #[error("Invalid dimensions: {0}x{1} (both must be > 0)")]
    InvalidDimensions(u32, u32),
    #[error("Value count {actual} does not match {width}x{height} = {expected}")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// A generated heightmap.
///
/// Values are stored in row-major order (`index = y * width + x`). The map
/// has no mutators: transformations return a new heightmap.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl Heightmap {
    /// Wraps row-major values as a heightmap.
    pub fn from_values(width: u32, height: u32, values: Vec<f32>) -> Result<Self, HeightmapError> {
        if width == 0 || height == 0 {
            return Err(HeightmapError::InvalidDimensions(width, height));
        }
        let expected = (width as usize) * (height as usize);
        if values.len() != expected {
            return Err(HeightmapError::LengthMismatch {
                width,
                height,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { width, height, values })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the total number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row-major view of all height values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns the height at the given cell.
    ///
    /// # Panics
    /// Panics if x or y is out of bounds.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        assert!(x < self.width && y < self.height, "cell ({}, {}) out of bounds", x, y);
        self.values[cell_index(self.width, x, y)]
    }

    /// Returns the height at the given cell, or `None` when out of bounds.
    pub fn try_get(&self, x: u32, y: u32) -> Option<f32> {
        (x < self.width && y < self.height).then(|| self.values[cell_index(self.width, x, y)])
    }

    /// Iterates rows from top (y = 0) to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        self.values.chunks_exact(self.width as usize)
    }

    /// Returns the minimum height value.
    pub fn min_height(&self) -> f32 {
        self.values.iter().cloned().fold(f32::MAX, f32::min)
    }

    /// Returns the maximum height value.
    pub fn max_height(&self) -> f32 {
        self.values.iter().cloned().fold(f32::MIN, f32::max)
    }

    /// Returns (min, max) height range.
    pub fn height_range(&self) -> (f32, f32) {
        (self.min_height(), self.max_height())
    }

    /// Remaps heights linearly so the lowest becomes 0.0 and the highest 1.0.
    ///
    /// A flat map normalizes to all zeros.
    pub fn normalized(&self) -> Heightmap {
        let (min, max) = self.height_range();
        let range = max - min;
        let values = if range > 0.0 {
            self.values.iter().map(|&h| ((h - min) / range).clamp(0.0, 1.0)).collect()
        } else {
            vec![0.0; self.values.len()]
        };
        Heightmap {
            width: self.width,
            height: self.height,
            values,
        }
    }
}

/// Row-major index of `(x, y)`, computed in `usize` so maps with more than
/// `u32::MAX` cells index correctly.
fn cell_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Heightmap {
        let values = (0..width * height).map(|i| i as f32).collect();
        Heightmap::from_values(width, height, values).unwrap()
    }

    #[test]
    fn test_from_values_checks_length() {
        let err = Heightmap::from_values(4, 4, vec![0.0; 15]).unwrap_err();
        assert_eq!(
            err,
            HeightmapError::LengthMismatch {
                width: 4,
                height: 4,
                expected: 16,
                actual: 15
            }
        );
        assert!(matches!(
            Heightmap::from_values(0, 4, vec![]),
            Err(HeightmapError::InvalidDimensions(0, 4))
        ));
    }

    #[test]
    fn test_row_major_indexing() {
        let map = gradient(5, 3);
        assert_eq!(map.get(0, 0), 0.0);
        assert_eq!(map.get(4, 0), 4.0);
        assert_eq!(map.get(0, 1), 5.0);
        assert_eq!(map.get(2, 2), 12.0);
        assert_eq!(map.try_get(5, 0), None);
    }

    #[test]
    fn test_cell_index_past_u32() {
        assert_eq!(cell_index(5, 2, 2), 12);
        assert_eq!(cell_index(70_000, 69_999, 69_999), 70_000 * 70_000 - 1);
        assert!(cell_index(70_000, 0, 69_999) > u32::MAX as usize);
    }

    #[test]
    fn test_rows() {
        let map = gradient(3, 2);
        let rows: Vec<_> = map.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], &[3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_height_range() {
        let map = Heightmap::from_values(2, 2, vec![-0.5, 0.2, 1.5, 0.0]).unwrap();
        assert_eq!(map.height_range(), (-0.5, 1.5));
    }

    #[test]
    fn test_normalized() {
        let map = Heightmap::from_values(2, 2, vec![-1.0, 0.0, 1.0, 0.5]).unwrap();
        let n = map.normalized();
        assert_eq!(n.values(), &[0.0, 0.5, 1.0, 0.75]);
    }

    #[test]
    fn test_normalized_flat_map() {
        let map = Heightmap::from_values(3, 1, vec![0.3; 3]).unwrap();
        assert!(map.normalized().values().iter().all(|&h| h == 0.0));
    }
}
