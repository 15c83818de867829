//! Phyllotaxis (sunflower) point placement.
//!
//! Point k of n sits at angle `k * stride` and radius `sqrt(k - 0.5)`,
//! normalized so the outermost interior point lands on the unit circle.
//! The last `b = round(alpha * sqrt(n))` points are pinned to the rim,
//! which smooths the boundary.
//!
//! Algorithm:
//!   for k in 1..=n:
//!     r = 1                                       if k > n - b
//!       = sqrt(k - 0.5) / sqrt(n - (b + 1) / 2)   otherwise
//!     place_point(r * size / 2, k * stride)

use std::f64::consts::TAU;

use crate::geometry::Point;

/// φ = (1 + √5) / 2
pub const GOLDEN_RATIO: f64 = 1.618033988749894848;

/// Angular step between consecutive points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stride {
    /// Golden angle 2π/φ² ≈ 137.508°
    Golden,
    /// 360·φ degrees, converted to radians
    Geodesic,
}

impl Stride {
    /// Step in radians.
    pub fn radians(&self) -> f64 {
        match self {
            Stride::Golden => TAU / (GOLDEN_RATIO * GOLDEN_RATIO),
            Stride::Geodesic => (360.0 * GOLDEN_RATIO).to_radians(),
        }
    }
}

/// Number of points pinned to the boundary circle.
pub fn boundary_count(n: usize, alpha: f64) -> usize {
    (alpha * (n as f64).sqrt()).round() as usize
}

/// Radius factor (0..=1) of point `k` out of `n` with `b` boundary points.
fn radius_factor(k: usize, n: usize, b: usize) -> f64 {
    if k + b > n {
        1.0
    } else {
        (k as f64 - 0.5).sqrt() / (n as f64 - (b as f64 + 1.0) / 2.0).sqrt()
    }
}

/// Generate exactly `n` sunflower points inside a circle of diameter `size`.
///
/// Output order is k = 1..=n, so radius grows along the sequence and later
/// points are drawn on top.
pub fn generate_sunflower(n: usize, alpha: f64, size: f64, stride: Stride) -> Vec<Point> {
    let b = boundary_count(n, alpha);
    let step = stride.radians();
    let half = size / 2.0;

    (1..=n)
        .map(|k| {
            let radius = radius_factor(k, n, b) * half;
            let angle = k as f64 * step;
            Point::from_polar_rounded(radius, angle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn golden_angle_is_correct() {
        let degrees = Stride::Golden.radians() * 180.0 / PI;
        assert!((degrees - 137.5077).abs() < 1e-3);
    }

    #[test]
    fn geodesic_stride_is_degree_based() {
        let expected = 360.0 * GOLDEN_RATIO * PI / 180.0;
        assert!((Stride::Geodesic.radians() - expected).abs() < 1e-12);
    }

    #[test]
    fn produces_exactly_n_points() {
        for n in [0, 1, 2, 7, 100, 1234] {
            assert_eq!(generate_sunflower(n, 2.0, 100.0, Stride::Golden).len(), n);
            assert_eq!(generate_sunflower(n, 0.0, 100.0, Stride::Geodesic).len(), n);
        }
    }

    #[test]
    fn zero_points_is_empty() {
        assert!(generate_sunflower(0, 1.0, 100.0, Stride::Golden).is_empty());
    }

    #[test]
    fn last_point_on_rim_without_alpha() {
        for n in [1, 5, 64, 999] {
            let points = generate_sunflower(n, 0.0, 100.0, Stride::Golden);
            let last = points.last().unwrap();
            assert!((last.magnitude() - 50.0).abs() < 0.01, "n={} radius={}", n, last.magnitude());
        }
    }

    #[test]
    fn boundary_points_sit_on_rim() {
        let n = 100;
        let alpha = 2.0;
        let b = boundary_count(n, alpha);
        assert_eq!(b, 20);

        let points = generate_sunflower(n, alpha, 200.0, Stride::Golden);
        for p in &points[n - b..] {
            assert!((p.magnitude() - 100.0).abs() < 0.01);
        }
        for p in &points[..n - b] {
            assert!(p.magnitude() < 100.0);
        }
    }

    #[test]
    fn coordinates_are_rounded() {
        let points = generate_sunflower(300, 1.5, 317.0, Stride::Geodesic);
        for p in &points {
            assert_eq!(format!("{:.2}", p.x).parse::<f64>().unwrap(), p.x);
            assert_eq!(format!("{:.2}", p.y).parse::<f64>().unwrap(), p.y);
        }
    }

    #[test]
    fn five_points_match_formula() {
        let points = generate_sunflower(5, 0.0, 100.0, Stride::Golden);
        let expected = [
            Point::new(-12.29, 11.26),
            Point::new(2.52, -28.76),
            Point::new(22.68, 29.58),
            Point::new(-43.42, -7.68),
            Point::new(42.19, -26.84),
        ];
        assert_eq!(points, expected);
    }

    #[test]
    fn geodesic_five_points_match_formula() {
        let points = generate_sunflower(5, 0.0, 100.0, Stride::Geodesic);
        let expected = [
            Point::new(-12.29, -11.26),
            Point::new(2.52, 28.76),
            Point::new(22.68, -29.58),
            Point::new(-43.42, 7.68),
            Point::new(42.19, 26.84),
        ];
        assert_eq!(points, expected);
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate_sunflower(777, 1.2, 640.0, Stride::Golden);
        let b = generate_sunflower(777, 1.2, 640.0, Stride::Golden);
        assert_eq!(a, b);
    }
}
