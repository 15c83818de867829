//! Nearest-neighbor statistics over a point set.
//!
//! Each point's nearest-neighbor distance is divided by a normalization
//! size (usually the canvas size) and the resulting list is summarized.
//!
//! Degenerate inputs are not special-cased. They fall out of the
//! arithmetic:
//!
//! | points | minimum | maximum | average | median | maxDiffFromAverageNorm |
//! |--------|---------|---------|---------|--------|------------------------|
//! | 0      | +∞      | −∞      | NaN     | NaN    | NaN                    |
//! | 1      | +∞      | +∞      | +∞      | +∞     | NaN                    |

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::Point;

/// Summary of nearest-neighbor distances, normalized by size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointStats {
    pub average: f64,
    /// Lower-middle element for even counts; no interpolation
    pub median: f64,
    pub minimum: f64,
    pub maximum: f64,
    /// Largest |d - average| over all points, divided by `average`
    pub max_diff_from_average_norm: f64,
}

impl PointStats {
    /// True when every field is a finite number.
    pub fn is_finite(&self) -> bool {
        [
            self.average,
            self.median,
            self.minimum,
            self.maximum,
            self.max_diff_from_average_norm,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Nearest-neighbor distance of every point, divided by `size`.
///
/// O(N²). A lone point has no neighbor and gets `+∞`.
pub fn nearest_neighbor_distances(points: &[Point], size: f64) -> Vec<f64> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let nearest = points
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, q)| p.distance(*q))
                .fold(f64::INFINITY, f64::min);
            nearest / size
        })
        .collect()
}

/// Compute [`PointStats`] for `points`, normalized by `size`.
pub fn compute_point_stats(points: &[Point], size: f64) -> PointStats {
    let distances = nearest_neighbor_distances(points, size);

    let minimum = distances.iter().copied().fold(f64::INFINITY, f64::min);
    let maximum = distances.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let average = distances.iter().sum::<f64>() / distances.len() as f64;

    let mut sorted = distances.clone();
    sorted.sort_by(f64::total_cmp);
    let median = sorted
        .get(sorted.len().saturating_sub(1) / 2)
        .copied()
        .unwrap_or(f64::NAN);

    let max_diff = distances
        .iter()
        .map(|d| (d - average).abs())
        .fold(f64::NEG_INFINITY, max_propagating_nan);

    debug!(points = points.len(), average, minimum, maximum, "computed point stats");

    PointStats {
        average,
        median,
        minimum,
        maximum,
        max_diff_from_average_norm: max_diff / average,
    }
}

/// Like `f64::max`, but a NaN on either side wins.
fn max_propagating_nan(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::{generate_lattice, generate_sunflower, Stride};

    #[test]
    fn two_points_share_one_distance() {
        let points = [Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
        let stats = compute_point_stats(&points, 1.0);
        assert_eq!(stats.average, 5.0);
        assert_eq!(stats.minimum, 5.0);
        assert_eq!(stats.maximum, 5.0);
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.max_diff_from_average_norm, 0.0);
    }

    #[test]
    fn distances_are_normalized_by_size() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let stats = compute_point_stats(&points, 100.0);
        assert!((stats.average - 0.1).abs() < 1e-12);
    }

    #[test]
    fn single_point_is_infinite() {
        let stats = compute_point_stats(&[Point::new(1.0, 1.0)], 1.0);
        assert_eq!(stats.minimum, f64::INFINITY);
        assert_eq!(stats.maximum, f64::INFINITY);
        assert_eq!(stats.average, f64::INFINITY);
        assert_eq!(stats.median, f64::INFINITY);
        assert!(stats.max_diff_from_average_norm.is_nan());
        assert!(!stats.is_finite());
    }

    #[test]
    fn empty_set_is_degenerate() {
        let stats = compute_point_stats(&[], 1.0);
        assert_eq!(stats.minimum, f64::INFINITY);
        assert_eq!(stats.maximum, f64::NEG_INFINITY);
        assert!(stats.average.is_nan());
        assert!(stats.median.is_nan());
        assert!(stats.max_diff_from_average_norm.is_nan());
    }

    #[test]
    fn median_takes_lower_middle() {
        // Nearest distances: 1, 1, 2, 4
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(7.0, 0.0),
        ];
        let d = nearest_neighbor_distances(&points, 1.0);
        assert_eq!(d, vec![1.0, 1.0, 2.0, 4.0]);

        let stats = compute_point_stats(&points, 1.0);
        assert_eq!(stats.median, 1.0);
        assert_eq!(stats.minimum, 1.0);
        assert_eq!(stats.maximum, 4.0);
        assert_eq!(stats.average, 2.0);
        assert_eq!(stats.max_diff_from_average_norm, 1.0);
    }

    #[test]
    fn median_of_odd_count_is_middle() {
        // Nearest distances: 1, 1, 3
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(4.0, 0.0)];
        let stats = compute_point_stats(&points, 1.0);
        assert_eq!(stats.median, 1.0);
        assert_eq!(stats.maximum, 3.0);
    }

    #[test]
    fn sunflower_is_evenly_spaced() {
        let size = 400.0;
        let points = generate_sunflower(500, 2.0, size, Stride::Golden);
        let stats = compute_point_stats(&points, size);

        assert!(stats.is_finite());
        assert!(stats.minimum > 0.0);
        assert!(stats.minimum <= stats.median && stats.median <= stats.maximum);
        assert!(stats.minimum <= stats.average && stats.average <= stats.maximum);
        // Golden-angle packing keeps every gap within a small factor of the mean
        assert!(stats.max_diff_from_average_norm < 1.0);
    }

    #[test]
    fn uniform_ring_has_no_spread() {
        // Single ring of 12 points, center dropped
        let points: Vec<Point> = generate_lattice(usize::MAX, 2, 11.0, 200.0, 0.0)
            .into_iter()
            .skip(1)
            .collect();
        assert_eq!(points.len(), 12);
        let stats = compute_point_stats(&points, 200.0);
        assert!(stats.max_diff_from_average_norm < 0.01);
    }
}
