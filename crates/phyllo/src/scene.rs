//! A generated point set together with everything derived from it.
//!
//! Stats and drawing are computed from the one `points` vector inside the
//! same call, so a consumer holding a `Scene` can never show stats for a
//! different point set than the one drawn.

use serde::Serialize;

use crate::geometry::Point;
use crate::points::{generate_points, GenerationParams};
use crate::render::{render_points, Drawing, Style};
use crate::stats::{compute_point_stats, PointStats};
use crate::svg::drawing_to_svg;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub params: GenerationParams,
    pub style: Style,
    pub dot_radius: f64,
    /// Side of the output canvas; also the stats normalization size
    pub canvas_size: f64,
    pub points: Vec<Point>,
    pub stats: PointStats,
    pub drawing: Drawing,
}

impl Scene {
    /// Generate points for `params`, then derive stats and drawing.
    ///
    /// `canvas_size` may differ from `params.size` when the caller shrinks
    /// the generation circle so rim dots are not clipped.
    pub fn compose(params: &GenerationParams, style: Style, dot_radius: f64, canvas_size: f64) -> Self {
        let points = generate_points(params);
        let stats = compute_point_stats(&points, canvas_size);
        let drawing = render_points(&points, style, dot_radius, canvas_size);

        Self {
            params: params.clone(),
            style,
            dot_radius,
            canvas_size,
            points,
            stats,
            drawing,
        }
    }

    /// Serialize the drawing to SVG markup.
    pub fn to_svg(&self) -> String {
        drawing_to_svg(&self.drawing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::Mode;

    #[test]
    fn stats_and_drawing_describe_the_same_points() {
        let params = GenerationParams { n: 120, ..Default::default() };
        let scene = Scene::compose(&params, Style::default(), 3.0, params.size);

        assert_eq!(scene.points.len(), 120);
        assert_eq!(scene.drawing.dot_count(), scene.points.len());
        assert_eq!(scene.stats, compute_point_stats(&scene.points, params.size));
    }

    #[test]
    fn smaller_generation_circle_stays_centered_on_canvas() {
        let params = GenerationParams { n: 10, alpha: 0.0, size: 80.0, ..Default::default() };
        let scene = Scene::compose(&params, Style::default(), 10.0, 100.0);

        // Every dot fits inside the canvas
        for shape in &scene.drawing.shapes {
            if let crate::render::Shape::Dot { center, radius, .. } = shape {
                assert!(center.x - radius >= -0.01 && center.x + radius <= 100.01);
                assert!(center.y - radius >= -0.01 && center.y + radius <= 100.01);
            }
        }
    }

    #[test]
    fn unknown_mode_composes_an_empty_scene() {
        let params = GenerationParams { mode: Mode::Unknown, ..Default::default() };
        let scene = Scene::compose(&params, Style::default(), 2.0, 100.0);

        assert!(scene.points.is_empty());
        assert!(scene.stats.average.is_nan());
        assert!(scene.to_svg().contains("<svg"));
        assert!(!scene.to_svg().contains("<circle"));
    }
}
