//! Stats command implementation.

use serde::Serialize;

use phyllo::{PointStats, Scene};

use super::common::{SETTINGS_OPTIONS_HELP, fail, parse_settings_args, take_value, write_output};

#[derive(Serialize)]
struct StatsReport<'a> {
    mode: &'static str,
    points: usize,
    #[serde(flatten)]
    stats: &'a PointStats,
}

/// Execute the stats command.
pub fn cmd_stats(args: &[String]) {
    let parsed = parse_settings_args(args).unwrap_or_else(|e| fail(&e));

    let mut output_path: Option<String> = None;

    let rest = &parsed.rest;
    let mut i = 0;
    while i < rest.len() {
        let arg = rest[i].as_str();
        match arg {
            "-o" | "--output" => {
                output_path = Some(take_value(rest, &mut i, arg).unwrap_or_else(|e| fail(&e)).to_string());
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other => fail(&format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let scene = parsed.settings.scene();
    let report = stats_report(&scene).unwrap_or_else(|e| fail(&e));
    write_output(output_path.as_deref(), &report).unwrap_or_else(|e| fail(&e));
}

/// Pretty-printed stats for a scene.
pub fn stats_report(scene: &Scene) -> Result<String, String> {
    let report = StatsReport {
        mode: scene.params.mode.name(),
        points: scene.points.len(),
        stats: &scene.stats,
    };
    serde_json::to_string_pretty(&report).map_err(|e| format!("Failed to serialize stats: {}", e))
}

fn print_usage() {
    eprintln!("Usage: phyllo stats [options]");
    eprintln!();
    eprintln!("Prints nearest-neighbor distance stats, normalized by canvas size.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>    Output file (- for stdout, default: stdout)");
    eprintln!("{}", SETTINGS_OPTIONS_HELP);
}
