//! Clustering options and configuration.
//!
//! This module provides the [`ClusterOptions`] struct and the
//! [`Initialization`] policy enum for configuring [`KMeansClusterer`](super::KMeansClusterer).

/// Default hard cap on Lloyd iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 20;

/// Policy for choosing the initial `k` centroids.
///
/// Every policy is reproducible: the seeded ones draw from a ChaCha8 RNG
/// seeded with the run's seed, and [`FirstDistinct`](Self::FirstDistinct)
/// uses no randomness at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Initialization {
    /// Sample `k` distinct input colors without replacement.
    ///
    /// When the input has fewer than `k` distinct colors, all of them are
    /// used and the remaining slots are filled with a seeded sample of the
    /// full point list (so some centroids start out identical).
    #[default]
    SeededSample,

    /// Take the first `k` distinct colors in input order.
    ///
    /// Short inputs are filled from the start of the point list, as with
    /// [`SeededSample`](Self::SeededSample). Ignores the seed.
    FirstDistinct,

    /// k-means++ seeding (Arthur & Vassilvitskii, 2007).
    ///
    /// The first centroid is a uniform draw; each following one is drawn
    /// with probability proportional to its squared distance from the
    /// nearest centroid chosen so far. Falls back to a uniform draw once
    /// every point coincides with a chosen centroid.
    KMeansPlusPlus,
}

impl Initialization {
    /// Whether this policy consumes the RNG (and so benefits from restarts).
    #[inline]
    pub fn is_randomized(self) -> bool {
        !matches!(self, Initialization::FirstDistinct)
    }
}

/// Configuration for a k-means run.
///
/// # Defaults
///
/// - Max iterations: 20
/// - Seed: none (a fresh seed is drawn per run and reported back)
/// - Initialization: [`Initialization::SeededSample`]
/// - Restarts: 1
/// - Parallel: enabled
///
/// # Example
///
/// ```
/// use kmeans_quant::{ClusterOptions, Initialization};
///
/// let options = ClusterOptions::new(8)
///     .max_iterations(50)
///     .seed(7)
///     .initialization(Initialization::KMeansPlusPlus);
/// assert_eq!(options.k, 8);
/// assert_eq!(options.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterOptions {
    /// Number of clusters to produce.
    pub k: usize,

    /// Hard cap on update steps. Always at least 1.
    ///
    /// Default: `20`
    pub max_iterations: usize,

    /// Seed for initialization. `None` draws one from OS entropy.
    ///
    /// Default: `None`
    pub seed: Option<u64>,

    /// Initial centroid policy.
    ///
    /// Default: [`Initialization::SeededSample`]
    pub initialization: Initialization,

    /// Number of independent runs; the lowest final inertia wins.
    ///
    /// Run `i` uses `seed + i`. Ignored by deterministic initialization.
    ///
    /// Default: `1`
    pub restarts: usize,

    /// Split assignment, reduction and quantization across the rayon pool.
    ///
    /// Has no effect when the crate's `parallel` feature is disabled.
    ///
    /// Default: `true`
    pub parallel: bool,
}

impl ClusterOptions {
    /// Create options for `k` clusters with default settings.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
            initialization: Initialization::default(),
            restarts: 1,
            parallel: true,
        }
    }

    /// Set the iteration cap. Values below 1 are raised to 1.
    #[inline]
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Fix the initialization seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the initial centroid policy.
    #[inline]
    pub fn initialization(mut self, initialization: Initialization) -> Self {
        self.initialization = initialization;
        self
    }

    /// Set the number of restarts. Values below 1 are raised to 1.
    #[inline]
    pub fn restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts.max(1);
        self
    }

    /// Enable or disable data-parallel execution.
    #[inline]
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }
}
