//! Initial centroid selection.

use std::collections::HashSet;

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::options::Initialization;
use crate::color::ColorVector;

/// Pick `k` initial centroids from `points`.
///
/// Callers guarantee `1 <= k <= points.len()`.
pub(crate) fn initial_centroids(
    points: &[ColorVector],
    k: usize,
    policy: Initialization,
    seed: u64,
) -> Vec<ColorVector> {
    debug_assert!(k >= 1 && k <= points.len());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    match policy {
        Initialization::SeededSample => seeded_sample(points, k, &mut rng),
        Initialization::FirstDistinct => first_distinct(points, k),
        Initialization::KMeansPlusPlus => kmeans_plus_plus(points, k, &mut rng),
    }
}

/// Distinct points in first-occurrence order (exact bit equality).
pub(crate) fn distinct_points(points: &[ColorVector]) -> Vec<ColorVector> {
    let mut seen = HashSet::with_capacity(points.len().min(1 << 16));
    points
        .iter()
        .filter(|p| seen.insert(p.key()))
        .copied()
        .collect()
}

fn seeded_sample(points: &[ColorVector], k: usize, rng: &mut ChaCha8Rng) -> Vec<ColorVector> {
    let distinct = distinct_points(points);

    if distinct.len() >= k {
        return distinct.choose_multiple(rng, k).copied().collect();
    }

    // Not enough distinct colors: use them all, then pad with duplicates.
    let mut centroids = distinct;
    let missing = k - centroids.len();
    centroids.extend(points.choose_multiple(rng, missing).copied());
    centroids
}

fn first_distinct(points: &[ColorVector], k: usize) -> Vec<ColorVector> {
    let mut centroids: Vec<ColorVector> = distinct_points(points).into_iter().take(k).collect();
    let missing = k - centroids.len();
    centroids.extend(points.iter().take(missing).copied());
    centroids
}

fn kmeans_plus_plus(points: &[ColorVector], k: usize, rng: &mut ChaCha8Rng) -> Vec<ColorVector> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())]);

    // Squared distance from each point to its nearest chosen centroid
    let mut weights: Vec<f64> = points
        .iter()
        .map(|p| p.squared_distance(&centroids[0]))
        .collect();

    while centroids.len() < k {
        let next = match WeightedIndex::new(&weights) {
            Ok(dist) => points[dist.sample(rng)],
            // All weights zero: every point already sits on a centroid
            Err(_) => points[rng.gen_range(0..points.len())],
        };
        centroids.push(next);

        for (w, p) in weights.iter_mut().zip(points) {
            let d = p.squared_distance(&next);
            if d < *w {
                *w = d;
            }
        }
    }

    centroids
}
