//! Rasterize drawings with resvg, and the `render` command.

use std::fmt;

use image::{DynamicImage, RgbaImage};
use resvg::usvg;
use tiny_skia::{Color, Pixmap, Transform};
use tracing::debug;

use phyllo::Drawing;

use super::common::{SETTINGS_OPTIONS_HELP, fail, parse_settings_args, parse_value, take_value};

/// Default image side for `phyllo render`.
pub const DEFAULT_PIXELS: u32 = 1024;

/// Error turning a drawing into pixels.
#[derive(Debug)]
pub enum RenderError {
    Svg(String),
    Pixmap(u32),
    Encode(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Svg(msg) => write!(f, "Generated SVG did not parse: {}", msg),
            RenderError::Pixmap(side) => write!(f, "Cannot allocate a {}x{} pixmap", side, side),
            RenderError::Encode(msg) => write!(f, "Failed to write image: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Render a drawing to a square image `pixels` wide, on white.
pub fn drawing_to_image(drawing: &Drawing, pixels: u32) -> Result<DynamicImage, RenderError> {
    let svg = phyllo::drawing_to_svg(drawing);

    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(&svg, &options).map_err(|e| RenderError::Svg(e.to_string()))?;

    let mut pixmap = Pixmap::new(pixels, pixels).ok_or(RenderError::Pixmap(pixels))?;
    pixmap.fill(Color::WHITE);

    let scale = if drawing.size > 0.0 { pixels as f32 / drawing.size as f32 } else { 1.0 };
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    debug!(pixels, shapes = drawing.shapes.len(), "rasterized drawing");

    let rgba = RgbaImage::from_raw(pixels, pixels, pixmap.take()).ok_or(RenderError::Pixmap(pixels))?;
    Ok(DynamicImage::ImageRgba8(rgba))
}

/// Execute the render command.
pub fn cmd_render(args: &[String]) {
    let parsed = parse_settings_args(args).unwrap_or_else(|e| fail(&e));

    let mut output_path: Option<String> = None;
    let mut pixels = DEFAULT_PIXELS;

    let rest = &parsed.rest;
    let mut i = 0;
    while i < rest.len() {
        let arg = rest[i].as_str();
        match arg {
            "-o" | "--output" => {
                output_path = Some(take_value(rest, &mut i, arg).unwrap_or_else(|e| fail(&e)).to_string());
            }
            "--pixels" => {
                pixels = parse_value(rest, &mut i, arg).unwrap_or_else(|e| fail(&e));
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other => fail(&format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let output_path = output_path.unwrap_or_else(|| {
        print_usage();
        fail("Output file required (-o out.png)")
    });

    let scene = parsed.settings.scene();
    eprintln!("Generated {} points", scene.points.len());

    let image = drawing_to_image(&scene.drawing, pixels).unwrap_or_else(|e| fail(&e.to_string()));
    image
        .save(&output_path)
        .map_err(|e| RenderError::Encode(e.to_string()))
        .unwrap_or_else(|e| fail(&e.to_string()));
    eprintln!("Wrote: {}", output_path);
}

fn print_usage() {
    eprintln!("Usage: phyllo render -o <out.png> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>    Output image (format from extension)");
    eprintln!("  --pixels <n>           Image width and height (default: {})", DEFAULT_PIXELS);
    eprintln!("{}", SETTINGS_OPTIONS_HELP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use phyllo::{render_points, Point, Style};

    #[test]
    fn dot_is_painted_black_on_white() {
        let drawing = render_points(&[Point::new(0.0, 0.0)], Style::default(), 10.0, 100.0);
        let image = drawing_to_image(&drawing, 100).unwrap().to_rgba8();

        assert_eq!(image.dimensions(), (100, 100));
        assert_eq!(image.get_pixel(50, 50).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(2, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn image_scales_to_requested_pixels() {
        let drawing = render_points(&[Point::new(0.0, 0.0)], Style::default(), 10.0, 100.0);
        let image = drawing_to_image(&drawing, 200).unwrap().to_rgba8();

        assert_eq!(image.dimensions(), (200, 200));
        assert_eq!(image.get_pixel(100, 100).0, [0, 0, 0, 255]);
        // Radius 10 scaled to 20 pixels
        assert_eq!(image.get_pixel(100, 85).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(100, 70).0, [255, 255, 255, 255]);
    }

    #[test]
    fn empty_drawing_is_blank() {
        let drawing = render_points(&[], Style::default(), 10.0, 100.0);
        let image = drawing_to_image(&drawing, 32).unwrap().to_rgba8();
        assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn zero_pixels_is_an_error() {
        let drawing = render_points(&[], Style::default(), 10.0, 100.0);
        assert!(matches!(drawing_to_image(&drawing, 0), Err(RenderError::Pixmap(0))));
    }
}
