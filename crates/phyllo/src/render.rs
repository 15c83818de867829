//! Map a point set onto a square canvas as simple vector shapes.

use serde::{Deserialize, Serialize};

use crate::geometry::{Line, Point};

/// Crosshair arm length relative to the dot radius (whole segment).
pub const CROSSHAIR_SCALE: f64 = 1.5;

/// Rendering toggles. They never affect generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// Mark each point's exact coordinate with a zero-radius outline
    pub center: bool,
    /// Draw a small cross through each point
    pub crosshair: bool,
}

impl Style {
    /// Dots are filled only when no reference mark has to show through.
    pub fn fills_dots(&self) -> bool {
        !(self.center || self.crosshair)
    }
}

/// One drawable element, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Dot { center: Point, radius: f64, filled: bool },
    Cross(Line),
    Marker(Point),
}

/// A square canvas of side `size` with shapes in draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub size: f64,
    pub shapes: Vec<Shape>,
}

impl Drawing {
    /// Number of dots (one per rendered point).
    pub fn dot_count(&self) -> usize {
        self.shapes.iter().filter(|s| matches!(s, Shape::Dot { .. })).count()
    }
}

/// Render origin-centered `points` onto a canvas of side `size`.
///
/// Shapes are emitted point by point, so a later point's dot covers an
/// earlier point's marks.
pub fn render_points(points: &[Point], style: Style, dot_radius: f64, size: f64) -> Drawing {
    let offset = size / 2.0;
    let half_arm = dot_radius * CROSSHAIR_SCALE / 2.0;
    let filled = style.fills_dots();

    let mut shapes = Vec::with_capacity(points.len() * shapes_per_point(style));

    for p in points {
        let center = p.translate(offset, offset);
        shapes.push(Shape::Dot { center, radius: dot_radius, filled });

        if style.crosshair {
            shapes.push(Shape::Cross(Line::new(
                center.x - half_arm,
                center.y,
                center.x + half_arm,
                center.y,
            )));
            shapes.push(Shape::Cross(Line::new(
                center.x,
                center.y - half_arm,
                center.x,
                center.y + half_arm,
            )));
        }

        if style.center {
            shapes.push(Shape::Marker(center));
        }
    }

    Drawing { size, shapes }
}

fn shapes_per_point(style: Style) -> usize {
    1 + if style.crosshair { 2 } else { 0 } + if style.center { 1 } else { 0 }
}
