//! Common utilities shared across CLI commands.

use std::fs;

use phyllo::Mode;
use tracing::warn;

use super::settings::Settings;

/// Output format for generated points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Svg,
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<OutputFormat> {
        match name.to_lowercase().as_str() {
            "svg" => Some(OutputFormat::Svg),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Usage lines for the options every command understands.
pub const SETTINGS_OPTIONS_HELP: &str = "\
  -c, --config <file>    Load settings from YAML (flags override)
  -m, --mode <name>      sunflower, sunflowerGeodesic, lattice (default: sunflower)
  -n, --count <n>        Point count (default: 500)
  --alpha <a>            Boundary smoothness (default: 2)
  --layers <n>           Lattice ring count (default: 12)
  --per-layer <f>        Lattice ring density growth (default: 6)
  --twist <t>            Lattice per-ring twist (default: 0)
  --size <s>             Canvas size (default: 400)
  -r, --radius <r>       Dot radius (default: 4)
  --center               Mark exact point coordinates
  --crosshair            Draw a cross through each point
  --no-adjust-size       Do not shrink the circle by the dot radius
  --no-clamp             Skip UI bounds on numeric options";

/// Settings assembled from `--config` plus flags, and the unconsumed args.
pub struct ParsedArgs {
    pub settings: Settings,
    pub rest: Vec<String>,
}

/// Build settings from the shared options.
///
/// The config file is loaded first no matter where `--config` appears, so
/// flags always win. Arguments that are not settings options are returned
/// in order for the command to interpret.
pub fn parse_settings_args(args: &[String]) -> Result<ParsedArgs, String> {
    let mut settings = match find_config_path(args) {
        Some(path) => Settings::load(path).map_err(|e| e.to_string())?,
        None => Settings::default(),
    };

    let mut clamp = true;
    let mut rest = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-c" | "--config" => {
                i += 1;
            }
            "-m" | "--mode" => {
                let name = take_value(args, &mut i, arg)?;
                settings.mode = Mode::from_name(name);
                if settings.mode == Mode::Unknown {
                    warn!(mode = name, "unrecognized mode, output will be empty");
                }
            }
            "-n" | "--count" => settings.n = parse_value(args, &mut i, arg)?,
            "--alpha" => settings.alpha = parse_value(args, &mut i, arg)?,
            "--layers" => settings.layers = parse_value(args, &mut i, arg)?,
            "--per-layer" => settings.n_per_layer = parse_value(args, &mut i, arg)?,
            "--twist" => settings.twist = parse_value(args, &mut i, arg)?,
            "--size" => settings.size = parse_value(args, &mut i, arg)?,
            "-r" | "--radius" => settings.radius = parse_value(args, &mut i, arg)?,
            "--center" => settings.center = true,
            "--crosshair" => settings.crosshair = true,
            "--adjust-size" => settings.adjust_size_to_fit_radius = true,
            "--no-adjust-size" => settings.adjust_size_to_fit_radius = false,
            "--svg" => settings.svg = true,
            "--no-clamp" => clamp = false,
            _ => rest.push(args[i].clone()),
        }
        i += 1;
    }

    if clamp {
        settings = settings.clamped();
    }

    Ok(ParsedArgs { settings, rest })
}

fn find_config_path(args: &[String]) -> Option<&str> {
    args.iter()
        .position(|a| a == "-c" || a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// Advance past a flag and return its value.
pub fn take_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

/// Advance past a flag and parse its value.
pub fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize, flag: &str) -> Result<T, String> {
    let raw = take_value(args, i, flag)?;
    raw.parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, raw))
}

/// Write to a file, or stdout for `None` / `-`.
pub fn write_output(output_path: Option<&str>, content: &str) -> Result<(), String> {
    match output_path {
        Some("-") | None => {
            print!("{}", content);
            if !content.ends_with('\n') {
                println!();
            }
            Ok(())
        }
        Some(path) => {
            fs::write(path, content).map_err(|e| format!("Failed to write {}: {}", path, e))?;
            eprintln!("Wrote: {}", path);
            Ok(())
        }
    }
}

/// Print an error and exit with status 1.
pub fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}
