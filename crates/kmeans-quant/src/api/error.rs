//! Unified error type for the kmeans-quant public API.
//!
//! [`QuantError`] wraps all error types from the crate into a single enum
//! for convenient `?` propagation in application code.

use thiserror::Error;

use crate::cluster::ClusterError;
use crate::grid::GridError;
use crate::quantize::QuantizeError;

/// Unified error type for the kmeans-quant public API.
///
/// # Example
///
/// ```
/// use kmeans_quant::{ColorQuantizer, PixelGrid, QuantError};
///
/// fn reduce(bytes: &[u8], width: usize, height: usize) -> Result<Vec<u8>, QuantError> {
///     let grid = PixelGrid::from_rgb_bytes(width, height, bytes)?;
///     let outcome = ColorQuantizer::new(2).seed(0).run(&grid)?;
///     Ok(outcome.image.to_rgb_bytes())
/// }
///
/// assert!(reduce(&[0, 0, 0, 255, 255, 255], 2, 1).is_ok());
/// assert!(matches!(reduce(&[0, 0, 0], 2, 1), Err(QuantError::Grid(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantError {
    /// Clustering precondition failed (empty input or bad `k`)
    #[error("clustering error: {0}")]
    Cluster(#[from] ClusterError),
    /// Quantization failed (empty model or malformed image)
    #[error("quantization error: {0}")]
    Quantize(#[from] QuantizeError),
    /// Input grid was malformed
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}
