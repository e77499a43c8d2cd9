//! Error type for k-means clustering.

use thiserror::Error;

/// Precondition failures of [`KMeansClusterer::fit()`](super::KMeansClusterer::fit).
///
/// Both are detected before any iteration runs. Clustering is deterministic
/// for a given seed, so retrying with the same input reproduces the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    /// No points were supplied
    #[error("cannot cluster an empty point set")]
    EmptyInput,
    /// `k` is zero or larger than the number of points
    #[error("invalid cluster count {k}: must be between 1 and {points}")]
    InvalidClusterCount {
        /// Requested cluster count
        k: usize,
        /// Number of available points (duplicates counted individually)
        points: usize,
    },
}
