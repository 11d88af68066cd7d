//! Deterministic k-means (Lloyd's algorithm) over profile feature vectors.
//!
//! Clustering groups the requester and the candidate pool into "lifestyle
//! neighborhoods". Initialization is seed-free: centroids are picked at evenly
//! spaced positions from the distinct vectors sorted by budget, so identical
//! input always yields identical clusters.

use std::cmp::Ordering;

use crate::core::distance::nearest_centroid;
use crate::models::{FeatureVector, FEATURE_COUNT};

/// Cluster assignment for every input vector
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Cluster id per input vector, in input order
    pub assignments: Vec<usize>,
    /// Number of clusters actually used
    pub k: usize,
    /// Assignment passes performed
    pub iterations: usize,
    /// Whether assignments stopped changing before the iteration cap
    pub converged: bool,
}

impl Clustering {
    /// Everything in cluster 0, used when there is nothing to separate
    fn single(n: usize) -> Self {
        Self {
            assignments: vec![0; n],
            k: 1,
            iterations: 0,
            converged: true,
        }
    }

    #[inline]
    pub fn cluster_of(&self, index: usize) -> usize {
        self.assignments.get(index).copied().unwrap_or(0)
    }
}

/// K-means parameters
#[derive(Debug, Clone, Copy)]
pub struct KMeans {
    k: usize,
    max_iterations: usize,
}

impl KMeans {
    pub fn new(k: usize, max_iterations: usize) -> Self {
        Self { k, max_iterations }
    }

    /// Partition `vectors` into at most `k` clusters
    ///
    /// `k` is capped at the number of distinct vectors. With fewer than two
    /// distinct vectors every vector lands in cluster 0.
    pub fn fit(&self, vectors: &[FeatureVector]) -> Clustering {
        let n = vectors.len();
        let distinct = distinct_sorted(vectors);
        let k = self.k.min(distinct.len());

        if distinct.len() < 2 || k < 2 {
            tracing::debug!(
                "Skipping clustering: {} vectors, {} distinct, k={}",
                n,
                distinct.len(),
                self.k
            );
            return Clustering::single(n);
        }

        let mut centroids = initial_centroids(&distinct, k);
        let mut assignments = vec![usize::MAX; n];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            iterations += 1;

            // Assignment step
            let mut changed = false;
            for (i, vector) in vectors.iter().enumerate() {
                let nearest = nearest_centroid(vector, &centroids)
                    .map(|(index, _)| index)
                    .unwrap_or(0);
                if assignments[i] != nearest {
                    assignments[i] = nearest;
                    changed = true;
                }
            }

            if !changed {
                converged = true;
                break;
            }

            // Update step
            centroids = recompute_centroids(vectors, &assignments, &centroids);
        }

        tracing::debug!(
            "K-means finished: n={}, k={}, iterations={}, converged={}",
            n,
            k,
            iterations,
            converged
        );

        Clustering {
            assignments,
            k,
            iterations,
            converged,
        }
    }
}

fn compare_vectors(a: &FeatureVector, b: &FeatureVector) -> Ordering {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(x, y)| x.total_cmp(y))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Distinct vectors ordered by budget first, remaining features breaking ties
fn distinct_sorted(vectors: &[FeatureVector]) -> Vec<FeatureVector> {
    let mut sorted = vectors.to_vec();
    sorted.sort_by(compare_vectors);
    sorted.dedup_by(|a, b| compare_vectors(a, b) == Ordering::Equal);
    sorted
}

/// Take every `ceil(m/k)`-th distinct vector as a starting centroid
///
/// Positions past the end are pulled back just far enough to keep all `k`
/// picks distinct.
fn initial_centroids(distinct: &[FeatureVector], k: usize) -> Vec<FeatureVector> {
    let m = distinct.len();
    let step = (m + k - 1) / k;
    (0..k)
        .map(|i| distinct[(i * step).min(m - k + i)])
        .collect()
}

/// Mean of each cluster's members; empty clusters are re-seeded
///
/// An empty cluster takes the vector lying farthest from its nearest
/// surviving centroid. Re-seeded centroids count as surviving for the next
/// empty cluster, so two empty clusters never share a seed.
fn recompute_centroids(
    vectors: &[FeatureVector],
    assignments: &[usize],
    previous: &[FeatureVector],
) -> Vec<FeatureVector> {
    let k = previous.len();
    let mut sums = vec![[0.0f64; FEATURE_COUNT]; k];
    let mut counts = vec![0usize; k];

    for (vector, &cluster) in vectors.iter().zip(assignments) {
        if cluster >= k {
            continue;
        }
        counts[cluster] += 1;
        for (sum, value) in sums[cluster].iter_mut().zip(vector.0.iter()) {
            *sum += value;
        }
    }

    let mut centroids: Vec<Option<FeatureVector>> = sums
        .iter()
        .zip(&counts)
        .map(|(sum, &count)| {
            if count == 0 {
                return None;
            }
            let mut mean = [0.0f64; FEATURE_COUNT];
            for (m, s) in mean.iter_mut().zip(sum.iter()) {
                *m = s / count as f64;
            }
            Some(FeatureVector(mean))
        })
        .collect();

    for cluster in 0..k {
        if centroids[cluster].is_some() {
            continue;
        }
        let surviving: Vec<FeatureVector> = centroids.iter().flatten().copied().collect();
        let seed = farthest_from(vectors, &surviving).unwrap_or(previous[cluster]);
        tracing::debug!("Re-seeding empty cluster {}", cluster);
        centroids[cluster] = Some(seed);
    }

    centroids
        .into_iter()
        .zip(previous)
        .map(|(centroid, fallback)| centroid.unwrap_or(*fallback))
        .collect()
}

/// Vector with the largest distance to its nearest centroid, lowest index on ties
fn farthest_from(vectors: &[FeatureVector], centroids: &[FeatureVector]) -> Option<FeatureVector> {
    let mut best: Option<(FeatureVector, f64)> = None;
    for vector in vectors {
        let distance = nearest_centroid(vector, centroids)
            .map(|(_, d)| d)
            .unwrap_or(f64::INFINITY);
        match best {
            Some((_, best_distance)) if distance <= best_distance => {}
            _ => best = Some((*vector, distance)),
        }
    }
    best.map(|(vector, _)| vector)
}
