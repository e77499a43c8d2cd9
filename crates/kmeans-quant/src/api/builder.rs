//! ColorQuantizer builder -- the one-call entry point for the crate.
//!
//! [`ColorQuantizer`] runs clustering and quantization back to back with a
//! single fluent configuration.

use super::error::QuantError;
use crate::cluster::{ClusterOptions, ClusterReport, Initialization, KMeansClusterer};
use crate::grid::PixelGrid;
use crate::quantize::{QuantizedImage, Quantizer};

/// Result of [`ColorQuantizer::run()`].
#[derive(Debug, Clone)]
pub struct QuantizeOutcome {
    /// The recolored image.
    pub image: QuantizedImage,
    /// Statistics and model of the clustering run.
    pub report: ClusterReport,
}

/// High-level color quantization builder.
///
/// # Design
///
/// - Constructor takes the cluster count; everything else has defaults
/// - Configuration methods consume and return `self`
/// - [`run()`](Self::run) takes `&self`, so one builder can process many
///   images
///
/// # Example
///
/// ```
/// use kmeans_quant::{ColorQuantizer, Initialization, PixelGrid};
///
/// let grid = PixelGrid::from_packed(
///     2,
///     2,
///     &[0x000A_0A0A, 0x000C_0C0C, 0x00C8_C8C8, 0x00CA_CACA],
/// )
/// .unwrap();
///
/// let outcome = ColorQuantizer::new(2)
///     .max_iterations(10)
///     .seed(42)
///     .initialization(Initialization::KMeansPlusPlus)
///     .run(&grid)
///     .unwrap();
///
/// assert_eq!(outcome.image.width(), 2);
/// assert_eq!(outcome.image.palette().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ColorQuantizer {
    options: ClusterOptions,
}

impl ColorQuantizer {
    /// Create a quantizer targeting `k` colors with default settings.
    pub fn new(k: usize) -> Self {
        Self {
            options: ClusterOptions::new(k),
        }
    }

    /// Create a quantizer from fully specified options.
    pub fn with_options(options: ClusterOptions) -> Self {
        Self { options }
    }

    /// Set the Lloyd iteration cap.
    #[inline]
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.options = self.options.max_iterations(max_iterations);
        self
    }

    /// Fix the initialization seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.options = self.options.seed(seed);
        self
    }

    /// Set the initial centroid policy.
    #[inline]
    pub fn initialization(mut self, initialization: Initialization) -> Self {
        self.options = self.options.initialization(initialization);
        self
    }

    /// Set the number of restarts.
    #[inline]
    pub fn restarts(mut self, restarts: usize) -> Self {
        self.options = self.options.restarts(restarts);
        self
    }

    /// Enable or disable data-parallel execution for both stages.
    #[inline]
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.options = self.options.parallel(enabled);
        self
    }

    /// The clustering options in effect.
    #[inline]
    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    /// Cluster the grid's colors and recolor every pixel.
    ///
    /// 1. Fit a [`ClusterReport`] with [`KMeansClusterer`]
    /// 2. Quantize the grid against the report's model
    pub fn run(&self, grid: &PixelGrid) -> Result<QuantizeOutcome, QuantError> {
        let report = KMeansClusterer::new(self.options.clone()).fit_grid(grid)?;
        let image = Quantizer::new()
            .parallel(self.options.parallel)
            .quantize(grid, &report.model)?;
        Ok(QuantizeOutcome { image, report })
    }
}
