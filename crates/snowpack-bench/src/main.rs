use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use snowpack_bench::report;
use snowpack_bench::runner::BenchmarkRunner;
use snowpack_bench::scenes;
use snowpack_config::{load_preset, PRESET_NAMES};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut tick_count = 120u32;
    let mut preset = String::from("arena");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--baseline" => {
                baseline_path = Some(PathBuf::from(value_of(&args, &mut i)));
            }
            "--output" => {
                output_path = Some(PathBuf::from(value_of(&args, &mut i)));
            }
            "--regression-threshold" => {
                regression_threshold = parse_value(&args, &mut i);
            }
            "--ticks" => {
                tick_count = parse_value(&args, &mut i);
            }
            "--preset" => {
                preset = value_of(&args, &mut i).to_string();
            }
            "--help" | "-h" => {
                eprintln!("Usage: bench-runner [OPTIONS]");
                eprintln!("  --baseline <path>              Load baseline JSON for comparison");
                eprintln!("  --output <path>                Save current results as JSON baseline");
                eprintln!(
                    "  --regression-threshold <pct>   Regression threshold percentage (default: 10)"
                );
                eprintln!("  --ticks <n>                    Ticks per scene (default: 120)");
                eprintln!(
                    "  --preset <name>                Base config: {} (default: arena)",
                    PRESET_NAMES.join(", ")
                );
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let base = match load_preset(&preset) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            eprintln!("Preset '{preset}' is invalid: {e}");
            process::exit(1);
        }
        None => {
            eprintln!("Unknown preset '{preset}'; expected one of {}", PRESET_NAMES.join(", "));
            process::exit(1);
        }
    };
    log::info!("Base preset: {preset}");
    let runner = BenchmarkRunner::new(base, tick_count);

    let scene_configs = scenes::standard_scenes();
    let mut results = Vec::new();

    for config in &scene_configs {
        match runner.run_scene(config) {
            Ok(result) => results.push(result),
            Err(e) => {
                eprintln!("Scene '{}' failed: {e}", config.name);
                process::exit(1);
            }
        }
    }

    // Print markdown summary
    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: run_label(),
            results: results.clone(),
        };
        if let Err(e) = report::save_baseline(path, &baseline) {
            eprintln!("Failed to save baseline to {}: {e}", path.display());
            process::exit(1);
        }
        log::info!("Saved baseline to {}", path.display());
    }

    if let Some(ref path) = baseline_path {
        if let Some(baseline) = report::load_baseline(path) {
            let regressions = report::compare(&results, &baseline, regression_threshold);
            println!(
                "{}",
                report::format_comparison(&regressions, regression_threshold)
            );
            if !regressions.is_empty() {
                eprintln!(
                    "ERROR: {} regressions detected, exiting with code 1",
                    regressions.len()
                );
                process::exit(1);
            }
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    log::info!("Benchmark complete.");
}

/// Consume the value following a flag, exiting if it is missing.
fn value_of<'a>(args: &'a [String], i: &mut usize) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(value) => value,
        None => {
            eprintln!("Missing value for {}", args[*i - 1]);
            process::exit(1);
        }
    }
}

fn parse_value<T: FromStr>(args: &[String], i: &mut usize) -> T {
    let value = value_of(args, i);
    match value.parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            eprintln!("Invalid value for {}: {value}", args[*i - 1]);
            process::exit(1);
        }
    }
}

/// Seconds since the Unix epoch; avoids a date-time dependency.
fn run_label() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("bench-{secs}")
}
