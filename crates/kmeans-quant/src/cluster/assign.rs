//! Assignment and reduction steps of Lloyd's algorithm.
//!
//! Both steps are data-parallel across points. The assignment step maps
//! every point independently; the reduction folds points into per-cluster
//! [`ClusterSums`] and merges the partial sums. A full assignment is always
//! collected before any reduction starts, which is the barrier between the
//! assignment and update sub-steps.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::color::ColorVector;

/// Index and squared distance of the centroid nearest to `point`.
///
/// Linear scan with a strict `<` comparison: on an exact distance tie the
/// lowest index wins. No epsilon is applied. Returns `(0, f64::INFINITY)`
/// for an empty centroid slice.
///
/// # Example
///
/// ```
/// use kmeans_quant::{nearest_centroid, ColorVector};
///
/// let centroids = [ColorVector::from_u8(0, 0, 0), ColorVector::from_u8(10, 0, 0)];
/// // Equidistant: index 0 wins
/// assert_eq!(nearest_centroid(&ColorVector::from_u8(5, 0, 0), &centroids), (0, 25.0));
/// assert_eq!(nearest_centroid(&ColorVector::from_u8(6, 0, 0), &centroids), (1, 16.0));
/// ```
#[inline]
pub fn nearest_centroid(point: &ColorVector, centroids: &[ColorVector]) -> (usize, f64) {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;

    for (i, centroid) in centroids.iter().enumerate() {
        let dist = point.squared_distance(centroid);
        if dist < best_dist {
            best_dist = dist;
            best_idx = i;
        }
    }

    (best_idx, best_dist)
}

/// One complete assignment of points to centroids.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Assignment {
    /// Nearest centroid index per point, in point order
    pub labels: Vec<usize>,
    /// Sum of squared distances from each point to its assigned centroid
    pub inertia: f64,
}

/// Assign every point to its nearest centroid.
pub(crate) fn assign(points: &[ColorVector], centroids: &[ColorVector], parallel: bool) -> Assignment {
    let nearest: Vec<(usize, f64)> = map_points(points, parallel, |p| nearest_centroid(p, centroids));

    let inertia = nearest.iter().map(|&(_, d)| d).sum();
    let labels = nearest.into_iter().map(|(idx, _)| idx).collect();

    Assignment { labels, inertia }
}

#[cfg(feature = "parallel")]
fn map_points<T, F>(points: &[ColorVector], parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&ColorVector) -> T + Sync + Send,
{
    if parallel {
        points.par_iter().map(f).collect()
    } else {
        points.iter().map(f).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn map_points<T, F>(points: &[ColorVector], _parallel: bool, f: F) -> Vec<T>
where
    F: Fn(&ColorVector) -> T,
{
    points.iter().map(f).collect()
}

/// Running per-cluster component sums and member counts.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ClusterSums {
    sums: Vec<[f64; 3]>,
    counts: Vec<usize>,
}

impl ClusterSums {
    pub fn new(k: usize) -> Self {
        Self {
            sums: vec![[0.0; 3]; k],
            counts: vec![0; k],
        }
    }

    #[inline]
    pub fn add(&mut self, point: &ColorVector, cluster: usize) {
        let sum = &mut self.sums[cluster];
        sum[0] += point.r;
        sum[1] += point.g;
        sum[2] += point.b;
        self.counts[cluster] += 1;
    }

    /// Combine two partial accumulations.
    pub fn merge(mut self, other: ClusterSums) -> ClusterSums {
        for (sum, o) in self.sums.iter_mut().zip(&other.sums) {
            sum[0] += o[0];
            sum[1] += o[1];
            sum[2] += o[2];
        }
        for (count, o) in self.counts.iter_mut().zip(&other.counts) {
            *count += o;
        }
        self
    }

    #[cfg(test)]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Mean of each cluster's members. Empty clusters keep their `previous`
    /// position so no cluster is ever dropped.
    pub fn means(&self, previous: &[ColorVector]) -> Vec<ColorVector> {
        self.sums
            .iter()
            .zip(&self.counts)
            .zip(previous)
            .map(|((sum, &count), &prev)| {
                if count == 0 {
                    prev
                } else {
                    let n = count as f64;
                    ColorVector::new(sum[0] / n, sum[1] / n, sum[2] / n)
                }
            })
            .collect()
    }
}

/// Reduce `points` into per-cluster sums under `labels`.
pub(crate) fn accumulate(points: &[ColorVector], labels: &[usize], k: usize, parallel: bool) -> ClusterSums {
    debug_assert_eq!(points.len(), labels.len());

    #[cfg(feature = "parallel")]
    {
        if parallel {
            return points
                .par_iter()
                .zip(labels.par_iter())
                .fold(
                    || ClusterSums::new(k),
                    |mut acc, (p, &label)| {
                        acc.add(p, label);
                        acc
                    },
                )
                .reduce(|| ClusterSums::new(k), ClusterSums::merge);
        }
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    let mut acc = ClusterSums::new(k);
    for (p, &label) in points.iter().zip(labels) {
        acc.add(p, label);
    }
    acc
}
