//! Concentric ring lattice.
//!
//! Ring `layer` has radius `layer * size / (2 * layers)` and carries
//! `round(1 + layer * n_per_layer)` evenly spaced points, rotated by
//! `twist * layer * π`. Ring 0 is the single center point.
//!
//! When the rings hold more than `n` points the sequence is thinned by an
//! even stride, so the result never exceeds `n`.

use std::f64::consts::{PI, TAU};

use tracing::trace;

use crate::geometry::Point;

/// Number of points on ring `layer`.
pub fn lattice_ring_count(layer: usize, n_per_layer: f64) -> usize {
    ((1.0 + layer as f64 * n_per_layer).round() as usize).max(1)
}

/// Generate the ring lattice, thinned to at most `n` points.
pub fn generate_lattice(
    n: usize,
    layers: usize,
    n_per_layer: f64,
    size: f64,
    twist: f64,
) -> Vec<Point> {
    let mut points = Vec::new();

    for layer in 0..layers {
        let count = lattice_ring_count(layer, n_per_layer);
        let step = TAU / count as f64;
        let radius = layer as f64 * size / (2.0 * layers as f64);
        let offset = twist * layer as f64 * PI;

        points.extend((0..count).map(|i| {
            let angle = i as f64 * step + offset;
            Point::from_polar_rounded(radius, angle)
        }));
    }

    decimate(points, n)
}

/// Keep indices 0, stride, 2·stride, … where `stride = floor(len / n)`.
///
/// Sets already within `n` pass through untouched.
fn decimate(points: Vec<Point>, n: usize) -> Vec<Point> {
    if points.len() <= n {
        return points;
    }
    if n == 0 {
        return Vec::new();
    }

    let stride = points.len() / n;
    trace!(total = points.len(), n, stride, "thinning lattice");
    points.into_iter().step_by(stride).take(n).collect()
}
