//! Benchmark command implementation.

use std::time::{Duration, Instant};

use phyllo::{compute_point_stats, generate_points};

use super::common::{SETTINGS_OPTIONS_HELP, fail, parse_settings_args, parse_value};

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &[String]) {
    let parsed = parse_settings_args(args).unwrap_or_else(|e| fail(&e));

    let mut iterations: u32 = 20;

    let rest = &parsed.rest;
    let mut i = 0;
    while i < rest.len() {
        let arg = rest[i].as_str();
        match arg {
            "-i" | "--iterations" => {
                iterations = parse_value(rest, &mut i, arg).unwrap_or_else(|e| fail(&e));
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other => fail(&format!("Unknown option: {}", other)),
        }
        i += 1;
    }
    let iterations = iterations.max(1);

    let settings = parsed.settings;
    let params = settings.params();

    let mut gen_time = Duration::ZERO;
    let mut stats_time = Duration::ZERO;
    let mut point_count = 0;

    for _ in 0..iterations {
        let start = Instant::now();
        let points = generate_points(&params);
        gen_time += start.elapsed();

        let start = Instant::now();
        let _ = compute_point_stats(&points, settings.size);
        stats_time += start.elapsed();

        point_count = points.len();
    }

    let per_run = |total: Duration| total.as_secs_f64() * 1000.0 / iterations as f64;

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  PHYLLO BENCHMARK: {}", params.mode.name().to_uppercase());
    println!("═══════════════════════════════════════════════");
    println!("  Points: {}", point_count);
    println!("  Iterations: {}", iterations);
    println!("  Generate (ms/run): {:.3}", per_run(gen_time));
    println!("  Stats (ms/run): {:.3}", per_run(stats_time));
    println!("═══════════════════════════════════════════════");
}

fn print_usage() {
    eprintln!("Usage: phyllo benchmark [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -i, --iterations <n>   Runs to average over (default: 20)");
    eprintln!("{}", SETTINGS_OPTIONS_HELP);
    eprintln!();
    eprintln!("Times point generation and the O(n²) stats pass separately.");
}
