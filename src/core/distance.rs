use crate::models::FeatureVector;

/// Squared Euclidean distance between two feature vectors
#[inline]
pub fn squared_euclidean(a: &FeatureVector, b: &FeatureVector) -> f64 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

/// Index of the nearest centroid and its squared distance
///
/// Ties go to the lowest index. Returns `None` when `centroids` is empty.
#[inline]
pub fn nearest_centroid(
    vector: &FeatureVector,
    centroids: &[FeatureVector],
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = squared_euclidean(vector, centroid);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best
}

/// Compare two location labels, ignoring case and surrounding whitespace
#[inline]
pub fn same_location(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_euclidean() {
        let a = FeatureVector([0.0, 1.0, 0.0, 0.0, 0.0, 0.5]);
        let b = FeatureVector([1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
        assert!((squared_euclidean(&a, &b) - 2.25).abs() < 1e-12);
        assert_eq!(squared_euclidean(&a, &a), 0.0);
    }

    #[test]
    fn test_nearest_centroid_breaks_ties_low() {
        let point = FeatureVector([0.5, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let centroids = [
            FeatureVector([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            FeatureVector([1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ];
        assert_eq!(nearest_centroid(&point, &centroids).map(|(i, _)| i), Some(0));
        assert!(nearest_centroid(&point, &[]).is_none());
    }

    #[test]
    fn test_same_location() {
        assert!(same_location("  Mumbai ", "mumbai"));
        assert!(!same_location("Mumbai", "Pune"));
    }
}
