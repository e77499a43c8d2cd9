//! ClusterModel and ClusterReport: the artifacts of a k-means run.

use super::assign::nearest_centroid;
use crate::color::ColorVector;

/// The final ordered set of centroids produced by clustering.
///
/// Centroid `i` is the representative of cluster `i`; the order is the
/// order in which the centroids were initialized and never changes during
/// a run. The model is immutable once produced and is the only thing the
/// [`Quantizer`](crate::Quantizer) needs.
///
/// # Example
///
/// ```
/// use kmeans_quant::{ClusterModel, ColorVector};
///
/// let model = ClusterModel::from_centroids(vec![
///     ColorVector::new(11.0, 11.0, 11.0),
///     ColorVector::new(200.6, 200.4, 201.5),
/// ]);
/// assert_eq!(model.palette(), vec![[11, 11, 11], [201, 200, 202]]);
/// assert_eq!(model.nearest(&ColorVector::from_u8(190, 190, 190)).0, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterModel {
    centroids: Vec<ColorVector>,
}

impl ClusterModel {
    /// Wrap an explicit centroid list.
    ///
    /// No validation is done here; an empty model is representable and is
    /// rejected by the quantizer.
    pub fn from_centroids(centroids: Vec<ColorVector>) -> Self {
        Self { centroids }
    }

    /// All centroids in cluster-index order.
    #[inline]
    pub fn centroids(&self) -> &[ColorVector] {
        &self.centroids
    }

    /// Centroid of cluster `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn centroid(&self, idx: usize) -> ColorVector {
        self.centroids[idx]
    }

    /// Number of centroids.
    #[inline]
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    /// Returns true if the model has no centroids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// Index and squared distance of the centroid nearest to `point`.
    #[inline]
    pub fn nearest(&self, point: &ColorVector) -> (usize, f64) {
        nearest_centroid(point, &self.centroids)
    }

    /// The centroids rounded to 8-bit colors (half up, clamped).
    pub fn palette(&self) -> Vec<[u8; 3]> {
        self.centroids.iter().map(|c| c.to_bytes()).collect()
    }

    /// Sum of squared distances from each point to its nearest centroid.
    pub fn inertia(&self, points: &[ColorVector]) -> f64 {
        points.iter().map(|p| self.nearest(p).1).sum()
    }
}

/// Outcome of [`KMeansClusterer::fit()`](super::KMeansClusterer::fit).
///
/// Wraps the [`ClusterModel`] together with statistics about the run that
/// produced it. When several restarts ran, this describes the winning one.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterReport {
    /// The final centroids.
    pub model: ClusterModel,
    /// Number of update steps performed (`1..=max_iterations`).
    pub iterations: usize,
    /// True if assignments stopped changing before the iteration cap.
    pub converged: bool,
    /// Inertia of the final assignment against the final centroids.
    pub inertia: f64,
    /// Inertia against the initial centroids, then after every iteration.
    ///
    /// Has `iterations + 1` entries and never increases (up to
    /// floating-point rounding).
    pub inertia_history: Vec<f64>,
    /// Number of points assigned to each centroid under the final assignment.
    pub cluster_sizes: Vec<usize>,
    /// Seed the run was initialized with.
    pub seed: u64,
}
