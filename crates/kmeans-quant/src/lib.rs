//! kmeans-quant: K-means color quantization
//!
//! This library reduces an RGB image to `k` representative colors. It finds
//! the colors with Lloyd's k-means algorithm and then recolors every pixel
//! with the representative nearest to it.
//!
//! # Quick Start
//!
//! The [`ColorQuantizer`] builder is the primary entry point:
//!
//! ```
//! use kmeans_quant::{ColorQuantizer, PixelGrid};
//!
//! let grid = PixelGrid::new(
//!     2,
//!     2,
//!     vec![[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]],
//! )
//! .unwrap();
//!
//! let outcome = ColorQuantizer::new(4).seed(7).run(&grid).unwrap();
//! assert_eq!(outcome.image.to_grid(), grid);
//! ```
//!
//! # Two Stages
//!
//! The builder is a thin wrapper over two independent stages that can be
//! used directly:
//!
//! ```
//! use kmeans_quant::{ClusterOptions, KMeansClusterer, PixelGrid, Quantizer};
//!
//! let grid = PixelGrid::from_packed(4, 1, &[0x0A0A0A, 0x0C0C0C, 0xC8C8C8, 0xCACACA]).unwrap();
//!
//! let report = KMeansClusterer::new(ClusterOptions::new(2).seed(1))
//!     .fit_grid(&grid)
//!     .unwrap();
//! let image = Quantizer::new().quantize(&grid, &report.model).unwrap();
//!
//! assert_eq!(image.palette().len(), 2);
//! ```
//!
//! ```text
//! PixelGrid ──> KMeansClusterer ──> ClusterReport { model, stats }
//!     │                                     │
//!     └──────────────> Quantizer <──────────┘
//!                          │
//!                          v
//!                   QuantizedImage { indices, palette }
//! ```
//!
//! # Distance and Ties
//!
//! Distances are squared Euclidean in plain RGB. When a point is equally
//! close to several centroids the lowest centroid index wins, both while
//! clustering and while quantizing.
//!
//! # Output Palette
//!
//! Centroids are real-valued. The quantizer picks each pixel's nearest raw
//! centroid (the same distance and tie-break as clustering) and only then
//! emits that centroid rounded half up and clamped to `0..=255`
//! ([`ClusterModel::palette()`]).
//!
//! # Parallelism
//!
//! With the default `parallel` feature, assignment, centroid accumulation
//! and quantization run on the rayon thread pool. Each stage finishes
//! completely before the next starts, and results are identical to a
//! single-threaded run up to floating-point summation order.

pub mod api;
pub mod cluster;
pub mod color;
pub mod grid;
pub mod quantize;


pub use api::{ColorQuantizer, QuantError, QuantizeOutcome};
pub use cluster::{
    nearest_centroid, ClusterError, ClusterModel, ClusterOptions, ClusterReport, Initialization,
    KMeansClusterer, DEFAULT_MAX_ITERATIONS,
};
pub use color::{pack_rgb, unpack_rgb, ColorVector};
pub use grid::{GridError, PixelGrid};
pub use quantize::{QuantizeError, QuantizedImage, Quantizer};
