//! Generate command implementation.

use std::time::Instant;

use serde::Serialize;
use tracing::info;

use phyllo::{Point, PointStats, Scene};

use super::common::{
    OutputFormat, SETTINGS_OPTIONS_HELP, fail, parse_settings_args, take_value, write_output,
};

/// JSON output: the point set, plus stats when requested.
#[derive(Serialize)]
struct JsonOutput<'a> {
    mode: &'static str,
    size: f64,
    count: usize,
    points: &'a [Point],
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a PointStats>,
}

/// Execute the generate command.
pub fn cmd_generate(args: &[String]) {
    let parsed = parse_settings_args(args).unwrap_or_else(|e| fail(&e));

    let mut output_path: Option<String> = None;
    let mut format = OutputFormat::Svg;
    let mut with_stats = false;

    let rest = &parsed.rest;
    let mut i = 0;
    while i < rest.len() {
        let arg = rest[i].as_str();
        match arg {
            "-o" | "--output" => {
                output_path = Some(take_value(rest, &mut i, arg).unwrap_or_else(|e| fail(&e)).to_string());
            }
            "-f" | "--format" => {
                let name = take_value(rest, &mut i, arg).unwrap_or_else(|e| fail(&e));
                format = OutputFormat::from_name(name).unwrap_or_else(|| {
                    fail(&format!("Unknown format: {}. Use 'svg' or 'json'.", name))
                });
            }
            "--json" => format = OutputFormat::Json,
            "--stats" => with_stats = true,
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other => fail(&format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let start = Instant::now();
    let scene = parsed.settings.scene();
    let elapsed = start.elapsed();
    info!(points = scene.points.len(), ?elapsed, "scene ready");
    eprintln!("Generated {} points in {:?}", scene.points.len(), elapsed);

    let output = render_output(&scene, format, with_stats).unwrap_or_else(|e| fail(&e));
    write_output(output_path.as_deref(), &output).unwrap_or_else(|e| fail(&e));
}

/// Format a scene for output.
///
/// SVG with `--stats` appends the pretty-printed stats as an XML comment so
/// the markup stays valid.
pub fn render_output(scene: &Scene, format: OutputFormat, with_stats: bool) -> Result<String, String> {
    match format {
        OutputFormat::Svg => {
            let mut svg = scene.to_svg();
            if with_stats {
                let stats = serde_json::to_string_pretty(&scene.stats)
                    .map_err(|e| format!("Failed to serialize stats: {}", e))?;
                svg.push_str(&format!("<!-- nearest-neighbor stats\n{}\n-->\n", stats));
            }
            Ok(svg)
        }
        OutputFormat::Json => {
            let output = JsonOutput {
                mode: scene.params.mode.name(),
                size: scene.canvas_size,
                count: scene.points.len(),
                points: &scene.points,
                stats: with_stats.then_some(&scene.stats),
            };
            serde_json::to_string(&output).map_err(|e| format!("Failed to serialize JSON: {}", e))
        }
    }
}

fn print_usage() {
    eprintln!("Usage: phyllo generate [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>    Output file (- for stdout, default: stdout)");
    eprintln!("  -f, --format <fmt>     Output format: svg, json (default: svg)");
    eprintln!("  --json                 Same as --format json");
    eprintln!("  --stats                Include nearest-neighbor stats");
    eprintln!("{}", SETTINGS_OPTIONS_HELP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::settings::Settings;

    #[test]
    fn json_lists_every_point() {
        let scene = Settings { n: 25, ..Default::default() }.scene();
        let json = render_output(&scene, OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["count"], 25);
        assert_eq!(value["points"].as_array().unwrap().len(), 25);
        assert_eq!(value["mode"], "sunflower");
        assert!(value.get("stats").is_none());
    }

    #[test]
    fn json_stats_use_control_names() {
        let scene = Settings { n: 25, ..Default::default() }.scene();
        let json = render_output(&scene, OutputFormat::Json, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let stats = &value["stats"];
        for key in ["average", "median", "minimum", "maximum", "maxDiffFromAverageNorm"] {
            assert!(stats[key].is_number(), "missing {}", key);
        }
    }

    #[test]
    fn svg_stats_stay_inside_a_comment() {
        let scene = Settings { n: 10, ..Default::default() }.scene();
        let svg = render_output(&scene, OutputFormat::Svg, true).unwrap();
        assert!(svg.contains("<!-- nearest-neighbor stats"));
        assert!(usvg::Tree::from_str(&svg, &usvg::Options::default()).is_ok());
    }

    #[test]
    fn degenerate_stats_serialize_as_null() {
        let scene = Settings { n: 1, ..Default::default() }.scene();
        let json = render_output(&scene, OutputFormat::Json, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["stats"]["average"].is_null());
    }
}
