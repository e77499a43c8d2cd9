//! Lloyd's algorithm over color vectors.

use super::assign::{accumulate, assign};
use super::error::ClusterError;
use super::init::initial_centroids;
use super::model::{ClusterModel, ClusterReport};
use super::options::ClusterOptions;
use crate::color::ColorVector;
use crate::grid::PixelGrid;

/// K-means clusterer (Lloyd's algorithm).
///
/// Produces a [`ClusterModel`] of exactly `k` centroids from a non-empty set
/// of color vectors:
///
/// 1. Pick `k` initial centroids according to [`Initialization`](super::Initialization).
/// 2. Assign every point to its nearest centroid (squared Euclidean
///    distance, lowest index wins exact ties).
/// 3. Move each centroid to the mean of its points. A centroid with no
///    points stays where it is.
/// 4. Reassign. Stop when no assignment changed or after `max_iterations`
///    update steps, whichever comes first.
///
/// Each run always performs at least one update step, so with `k = 1` the
/// single centroid is the mean of all points even when `max_iterations` is 1.
///
/// # Example
///
/// ```
/// use kmeans_quant::{ClusterOptions, ColorVector, KMeansClusterer};
///
/// let points = [
///     ColorVector::from_u8(10, 10, 10),
///     ColorVector::from_u8(12, 12, 12),
///     ColorVector::from_u8(200, 200, 200),
///     ColorVector::from_u8(202, 202, 202),
/// ];
/// let report = KMeansClusterer::new(ClusterOptions::new(2).seed(1))
///     .fit(&points)
///     .unwrap();
///
/// assert_eq!(report.model.len(), 2);
/// assert!(report.converged);
/// ```
#[derive(Debug, Clone)]
pub struct KMeansClusterer {
    options: ClusterOptions,
}

impl KMeansClusterer {
    /// Create a clusterer with the given options.
    pub fn new(options: ClusterOptions) -> Self {
        Self { options }
    }

    /// The options this clusterer runs with.
    #[inline]
    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    /// Cluster the pixels of a grid.
    pub fn fit_grid(&self, grid: &PixelGrid) -> Result<ClusterReport, ClusterError> {
        self.fit(&grid.to_color_vectors())
    }

    /// Cluster `points` into `k` clusters.
    ///
    /// # Errors
    ///
    /// - [`ClusterError::EmptyInput`] if `points` is empty
    /// - [`ClusterError::InvalidClusterCount`] if `k` is 0 or exceeds
    ///   `points.len()` (duplicate points count individually)
    pub fn fit(&self, points: &[ColorVector]) -> Result<ClusterReport, ClusterError> {
        if points.is_empty() {
            return Err(ClusterError::EmptyInput);
        }
        let k = self.options.k;
        if k == 0 || k > points.len() {
            return Err(ClusterError::InvalidClusterCount {
                k,
                points: points.len(),
            });
        }

        let base_seed = self.options.seed.unwrap_or_else(rand::random);
        let runs = if self.options.initialization.is_randomized() {
            self.options.restarts.max(1)
        } else {
            1
        };

        let mut best = self.run_once(points, base_seed);
        for restart in 1..runs {
            let candidate = self.run_once(points, base_seed.wrapping_add(restart as u64));
            if candidate.inertia < best.inertia {
                best = candidate;
            }
        }

        Ok(best)
    }

    /// A single seeded Lloyd run.
    fn run_once(&self, points: &[ColorVector], seed: u64) -> ClusterReport {
        let k = self.options.k;
        let max_iterations = self.options.max_iterations.max(1);
        let parallel = self.options.parallel;

        let mut centroids = initial_centroids(points, k, self.options.initialization, seed);
        let mut assignment = assign(points, &centroids, parallel);
        let mut inertia_history = vec![assignment.inertia];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < max_iterations {
            // `assignment` is complete here; only now may centroids move.
            let sums = accumulate(points, &assignment.labels, k, parallel);
            centroids = sums.means(&centroids);
            iterations += 1;

            let next = assign(points, &centroids, parallel);
            inertia_history.push(next.inertia);

            if next.labels == assignment.labels {
                converged = true;
                assignment = next;
                break;
            }
            assignment = next;
        }

        let mut cluster_sizes = vec![0; k];
        for &label in &assignment.labels {
            cluster_sizes[label] += 1;
        }

        ClusterReport {
            model: ClusterModel::from_centroids(centroids),
            iterations,
            converged,
            inertia: assignment.inertia,
            inertia_history,
            cluster_sizes,
            seed,
        }
    }
}
