//! Nearest-representative recoloring.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use thiserror::Error;

use super::quantized_image::QuantizedImage;
use crate::cluster::{nearest_centroid, ClusterModel};
use crate::color::ColorVector;
use crate::grid::PixelGrid;

/// Error type for quantization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantizeError {
    /// The cluster model has no centroids to map pixels to
    #[error("cluster model has no centroids")]
    EmptyClusterModel,
    /// Index count does not match the image dimensions
    #[error("index count mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    /// A pixel refers to a palette entry that does not exist
    #[error("palette index {index} at pixel {position} out of range for {palette_len} colors")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        palette_len: usize,
    },
}

/// Maps every pixel to the color of its nearest cluster representative.
///
/// Each pixel is compared against the model's real-valued centroids with
/// [`nearest_centroid`], the same squared Euclidean distance and
/// lowest-index tie-break used while clustering. The winning centroid is
/// then rounded half up and clamped ([`ClusterModel::palette()`]) to give
/// the output color.
///
/// Pixels are independent; with parallelism enabled they are spread across
/// the rayon pool.
///
/// # Example
///
/// ```
/// use kmeans_quant::{ClusterModel, ColorVector, PixelGrid, Quantizer};
///
/// let model = ClusterModel::from_centroids(vec![
///     ColorVector::new(11.0, 11.0, 11.0),
///     ColorVector::new(201.0, 201.0, 201.0),
/// ]);
/// let grid = PixelGrid::new(2, 1, vec![[0, 20, 5], [180, 255, 210]]).unwrap();
///
/// let image = Quantizer::new().quantize(&grid, &model).unwrap();
/// assert_eq!(image.indices(), &[0, 1]);
/// assert_eq!(image.to_grid().pixels(), &[[11, 11, 11], [201, 201, 201]]);
/// ```
#[derive(Debug, Clone)]
pub struct Quantizer {
    parallel: bool,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl Quantizer {
    /// Create a quantizer with parallelism enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable data-parallel execution.
    #[inline]
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Recolor `grid` with the palette of `model`.
    ///
    /// # Errors
    ///
    /// [`QuantizeError::EmptyClusterModel`] if `model` has no centroids.
    pub fn quantize(&self, grid: &PixelGrid, model: &ClusterModel) -> Result<QuantizedImage, QuantizeError> {
        if model.is_empty() {
            return Err(QuantizeError::EmptyClusterModel);
        }

        let centroids = model.centroids();
        let indices = self.map_pixels(grid.pixels(), |&px| {
            nearest_centroid(&ColorVector::from_bytes(px), centroids).0 as u32
        });

        Ok(QuantizedImage::from_parts(indices, grid.width(), grid.height(), model.palette()))
    }

    #[cfg(feature = "parallel")]
    fn map_pixels<F>(&self, pixels: &[[u8; 3]], f: F) -> Vec<u32>
    where
        F: Fn(&[u8; 3]) -> u32 + Sync + Send,
    {
        if self.parallel {
            pixels.par_iter().map(f).collect()
        } else {
            pixels.iter().map(f).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn map_pixels<F>(&self, pixels: &[[u8; 3]], f: F) -> Vec<u32>
    where
        F: Fn(&[u8; 3]) -> u32,
    {
        pixels.iter().map(f).collect()
    }
}
