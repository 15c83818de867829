//! SVG export - serialize a [`Drawing`] to standalone markup.
//!
//! The output is a single `<svg>` element meant to be pasted into another
//! document, so there is no XML declaration. Coordinates are written with
//! two decimals, matching the generator's precision.

use std::fmt::Write;

use crate::render::{Drawing, Shape};

/// Stroke color for outlines, cross segments and markers.
const INK: &str = "black";

/// Stroke width in drawing units.
const STROKE_WIDTH: f64 = 0.5;

/// Convert a drawing to SVG markup.
///
/// ## Rust Lesson #4: `write!` into a String
///
/// `String` implements `std::fmt::Write`, so `write!` appends formatted
/// text without allocating a temporary for every element. Writing to a
/// String cannot fail; the `fmt::Result` is discarded.
pub fn drawing_to_svg(drawing: &Drawing) -> String {
    let size = drawing.size;
    let mut svg = String::new();

    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.2}" height="{:.2}" viewBox="0 0 {:.2} {:.2}">
<g stroke-width="{}">
"#,
        size, size, size, size, STROKE_WIDTH
    );

    for shape in &drawing.shapes {
        let _ = match shape {
            Shape::Dot { center, radius, filled: true } => writeln!(
                svg,
                "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
                center.x, center.y, radius, INK
            ),
            Shape::Dot { center, radius, filled: false } => writeln!(
                svg,
                "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"none\" stroke=\"{}\"/>",
                center.x, center.y, radius, INK
            ),
            Shape::Cross(line) => writeln!(
                svg,
                "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\"/>",
                line.x1, line.y1, line.x2, line.y2, INK
            ),
            Shape::Marker(p) => writeln!(
                svg,
                "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"0\" fill=\"none\" stroke=\"{}\"/>",
                p.x, p.y, INK
            ),
        };
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::render::{render_points, Style};

    fn count(svg: &str, needle: &str) -> usize {
        svg.matches(needle).count()
    }

    #[test]
    fn writes_one_circle_per_point() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 10.0), Point::new(-20.0, 5.0)];
        let drawing = render_points(&points, Style::default(), 2.0, 100.0);
        let svg = drawing_to_svg(&drawing);

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 100.00 100.00""#));
        assert_eq!(count(&svg, "<circle"), 3);
        assert_eq!(count(&svg, r#"fill="black""#), 3);
        assert!(svg.contains(r#"<circle cx="60.00" cy="60.00" r="2.00" fill="black"/>"#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn outlined_style_writes_lines_and_markers() {
        let style = Style { center: true, crosshair: true };
        let drawing = render_points(&[Point::new(0.0, 0.0)], style, 4.0, 20.0);
        let svg = drawing_to_svg(&drawing);

        assert_eq!(count(&svg, "<line"), 2);
        assert_eq!(count(&svg, "<circle"), 2);
        assert_eq!(count(&svg, r#"r="0""#), 1);
        assert!(!svg.contains(r#"fill="black""#));
        assert!(svg.contains(r#"<line x1="7.00" y1="10.00" x2="13.00" y2="10.00" stroke="black"/>"#));
    }

    #[test]
    fn empty_drawing_is_still_a_document() {
        let drawing = render_points(&[], Style::default(), 1.0, 50.0);
        let svg = drawing_to_svg(&drawing);
        assert_eq!(count(&svg, "<circle"), 0);
        assert!(usvg::Tree::from_str(&svg, &usvg::Options::default()).is_ok());
    }

    #[test]
    fn output_parses_as_svg() {
        let points = [Point::new(-5.0, 0.0), Point::new(5.0, 0.0)];
        let drawing = render_points(&points, Style::default(), 3.0, 40.0);
        let svg = drawing_to_svg(&drawing);

        let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
        assert_eq!(tree.size().width(), 40.0);
        assert!(!tree.root().children().is_empty());
    }
}
