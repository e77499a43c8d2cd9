//! PixelGrid: the rectangular `[u8; 3]` grid exchanged with image codecs.

use thiserror::Error;

use crate::color::{unpack_rgb, ColorVector};

/// Error type for grid construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Pixel (or byte) count does not match the declared dimensions
    #[error("grid dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch {
        /// `width * height` (times 3 for interleaved byte input)
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },
}

/// A `width × height` grid of 8-bit RGB triples in row-major order.
///
/// This is the boundary type on both sides of the core: image decoders
/// produce one, and [`QuantizedImage::to_grid()`](crate::QuantizedImage::to_grid)
/// produces one with identical dimensions for the encoder.
///
/// # Example
///
/// ```
/// use kmeans_quant::PixelGrid;
///
/// let grid = PixelGrid::from_packed(2, 1, &[0x00FF_0000, 0x0000_00FF]).unwrap();
/// assert_eq!(grid.get(0, 0), Some([255, 0, 0]));
/// assert_eq!(grid.get(1, 0), Some([0, 0, 255]));
/// assert_eq!(grid.get(2, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl PixelGrid {
    /// Create a grid from row-major pixels.
    ///
    /// # Errors
    ///
    /// [`GridError::DimensionMismatch`] if `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 3]>) -> Result<Self, GridError> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(GridError::DimensionMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a grid whose length is already known to match.
    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<[u8; 3]>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a grid from interleaved `[R, G, B, R, G, B, ...]` bytes.
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, GridError> {
        let expected = width * height * 3;
        if bytes.len() != expected {
            return Err(GridError::DimensionMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|px| [px[0], px[1], px[2]])
            .collect();
        Self::new(width, height, pixels)
    }

    /// Create a grid from packed `0xAARRGGBB` integers (alpha ignored).
    pub fn from_packed(width: usize, height: usize, packed: &[u32]) -> Result<Self, GridError> {
        let pixels = packed.iter().map(|&argb| unpack_rgb(argb)).collect();
        Self::new(width, height, pixels)
    }

    /// Returns the grid width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Returns true if the grid has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`, or `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Convert every pixel to a [`ColorVector`], preserving order.
    pub fn to_color_vectors(&self) -> Vec<ColorVector> {
        self.pixels.iter().map(|&px| ColorVector::from_bytes(px)).collect()
    }

    /// Flatten to interleaved RGB bytes (`width * height * 3` long).
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.iter().copied()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = PixelGrid::new(2, 2, vec![[0, 0, 0]; 3]).unwrap_err();
        assert_eq!(
            err,
            GridError::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        );
        assert_eq!(
            err.to_string(),
            "grid dimension mismatch: expected 4 values, got 3"
        );
    }

    #[test]
    fn test_from_rgb_bytes_layout() {
        let bytes = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let grid = PixelGrid::from_rgb_bytes(2, 2, &bytes).unwrap();

        assert_eq!(grid.get(0, 0), Some([1, 2, 3]));
        assert_eq!(grid.get(1, 0), Some([4, 5, 6]));
        assert_eq!(grid.get(0, 1), Some([7, 8, 9]));
        assert_eq!(grid.get(1, 1), Some([10, 11, 12]));
        assert_eq!(grid.to_rgb_bytes(), bytes.to_vec());
    }

    #[test]
    fn test_from_rgb_bytes_rejects_partial_pixel() {
        let err = PixelGrid::from_rgb_bytes(1, 1, &[1, 2]).unwrap_err();
        assert_eq!(
            err,
            GridError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = PixelGrid::new(3, 1, vec![[9, 9, 9]; 3]).unwrap();
        assert_eq!(grid.get(2, 0), Some([9, 9, 9]));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 1), None);
    }

    #[test]
    fn test_empty_grid_is_allowed() {
        let grid = PixelGrid::new(0, 0, Vec::new()).unwrap();
        assert!(grid.is_empty());
        assert!(grid.to_color_vectors().is_empty());
    }

    #[test]
    fn test_to_color_vectors_preserves_order() {
        let grid = PixelGrid::from_packed(3, 1, &[0x0001_0203, 0x0004_0506, 0x0007_0809]).unwrap();
        let vectors = grid.to_color_vectors();
        assert_eq!(vectors[0], ColorVector::from_u8(1, 2, 3));
        assert_eq!(vectors[2], ColorVector::from_u8(7, 8, 9));
    }
}
