//! QuantizedImage: palette indices plus the palette they refer to.

use super::quantizer::QuantizeError;
use crate::grid::PixelGrid;

/// The output of the quantizer.
///
/// Stores one palette index per pixel in row-major order, the image
/// dimensions, and the palette (the rounded centroid colors, in cluster
/// order). The indexed form is canonical; RGB output is looked up on demand.
///
/// # Example
///
/// ```
/// use kmeans_quant::QuantizedImage;
///
/// let image = QuantizedImage::new(vec![0, 1, 1, 0], 2, 2, vec![[0, 0, 0], [255, 255, 255]]).unwrap();
/// assert_eq!(image.color_at(1, 0), Some([255, 255, 255]));
/// assert_eq!(image.to_rgb_bytes().len(), 2 * 2 * 3);
/// assert_eq!(image.histogram(), vec![2, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedImage {
    indices: Vec<u32>,
    width: usize,
    height: usize,
    palette: Vec<[u8; 3]>,
}

impl QuantizedImage {
    /// Create a quantized image from palette indices.
    ///
    /// # Errors
    ///
    /// - [`QuantizeError::DimensionMismatch`] if `indices.len()` is not
    ///   `width * height`
    /// - [`QuantizeError::IndexOutOfRange`] if an index does not address a
    ///   palette entry
    pub fn new(
        indices: Vec<u32>,
        width: usize,
        height: usize,
        palette: Vec<[u8; 3]>,
    ) -> Result<Self, QuantizeError> {
        if indices.len() != width * height {
            return Err(QuantizeError::DimensionMismatch {
                expected: width * height,
                actual: indices.len(),
            });
        }
        if let Some(position) = indices.iter().position(|&i| i as usize >= palette.len()) {
            return Err(QuantizeError::IndexOutOfRange {
                position,
                index: indices[position],
                palette_len: palette.len(),
            });
        }
        Ok(Self::from_parts(indices, width, height, palette))
    }

    /// Assemble without validation; callers guarantee the invariants.
    pub(crate) fn from_parts(indices: Vec<u32>, width: usize, height: usize, palette: Vec<[u8; 3]>) -> Self {
        debug_assert_eq!(indices.len(), width * height);
        debug_assert!(indices.iter().all(|&i| (i as usize) < palette.len()));
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    /// Palette indices, one per pixel, row-major.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The palette, indexed by cluster.
    #[inline]
    pub fn palette(&self) -> &[[u8; 3]] {
        &self.palette
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Output color at column `x`, row `y`, or `None` when out of bounds.
    pub fn color_at(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.indices[y * self.width + x];
        Some(self.palette[idx as usize])
    }

    /// Number of pixels using each palette entry.
    pub fn histogram(&self) -> Vec<usize> {
        let mut counts = vec![0; self.palette.len()];
        for &idx in &self.indices {
            counts[idx as usize] += 1;
        }
        counts
    }

    /// Flat `[R, G, B, ...]` bytes, `width * height * 3` long.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.indices.len() * 3);
        for &idx in &self.indices {
            rgb.extend_from_slice(&self.palette[idx as usize]);
        }
        rgb
    }

    /// Expand into a [`PixelGrid`] with the same dimensions as the input.
    pub fn to_grid(&self) -> PixelGrid {
        let pixels: Vec<[u8; 3]> = self
            .indices
            .iter()
            .map(|&idx| self.palette[idx as usize])
            .collect();
        PixelGrid::from_parts(self.width, self.height, pixels)
    }
}
