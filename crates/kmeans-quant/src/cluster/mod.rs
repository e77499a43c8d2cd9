//! K-means clustering of color vectors.
//!
//! [`KMeansClusterer`] runs Lloyd's algorithm and returns a [`ClusterReport`]
//! whose [`ClusterModel`] is the only artifact the quantizer consumes.
//! Assignments are recomputed from the centroids on every iteration through
//! [`nearest_centroid`] and are never kept beyond the run.

mod assign;
mod error;
mod init;
mod kmeans;
mod model;
mod options;

pub use assign::nearest_centroid;
pub use error::ClusterError;
pub use kmeans::KMeansClusterer;
pub use model::{ClusterModel, ClusterReport};
pub use options::{ClusterOptions, Initialization, DEFAULT_MAX_ITERATIONS};
