use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use voxbag_bench::report;
use voxbag_bench::runner::BenchmarkRunner;
use voxbag_bench::scenes;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut runs = 5u32;
    let mut iterations = scenes::DEFAULT_ITERATIONS;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--baseline" => {
                i += 1;
                baseline_path = Some(PathBuf::from(flag_value(&args, i, "--baseline")));
            }
            "--output" => {
                i += 1;
                output_path = Some(PathBuf::from(flag_value(&args, i, "--output")));
            }
            "--regression-threshold" => {
                i += 1;
                regression_threshold = parse_flag(&args, i, "--regression-threshold");
            }
            "--runs" => {
                i += 1;
                runs = parse_flag(&args, i, "--runs");
            }
            "--iterations" => {
                i += 1;
                let requested: u32 = parse_flag(&args, i, "--iterations");
                iterations = match scenes::check_iterations(requested) {
                    Some(n) => n,
                    None => {
                        eprintln!(
                            "--iterations must be at most {} (got {requested})",
                            scenes::MAX_ITERATIONS
                        );
                        process::exit(1);
                    }
                };
            }
            "--help" | "-h" => {
                eprintln!("Usage: bench-runner [OPTIONS]");
                eprintln!("  --baseline <path>              Load baseline JSON for comparison");
                eprintln!("  --output <path>                Save current results as JSON baseline");
                eprintln!(
                    "  --regression-threshold <pct>   Regression threshold percentage (default: 10)"
                );
                eprintln!("  --runs <n>                     Timed runs per scene (default: 5)");
                eprintln!(
                    "  --iterations <n>               Operations per run (default: {}, max: {})",
                    scenes::DEFAULT_ITERATIONS,
                    scenes::MAX_ITERATIONS
                );
                eprintln!();
                eprintln!("Memory: the world_* scenes allocate one chunk per 16 diagonal steps");
                eprintln!("(32 KiB each with 16x32x16 chunks). The default 1M iterations touch");
                eprintln!("62,500 chunks, about 2 GiB per world_cold/world_precreated run.");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let runner = BenchmarkRunner::new(runs);
    let results: Vec<_> = scenes::standard_scenes(iterations)
        .iter()
        .map(|config| runner.run_scene(config))
        .collect();

    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: unix_timestamp(),
            results: results.clone(),
        };
        match report::save_baseline(path, &baseline) {
            Ok(()) => log::info!("Saved baseline to {}", path.display()),
            Err(e) => {
                log::error!("Failed to save baseline to {}: {e}", path.display());
                process::exit(1);
            }
        }
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

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(value) => value,
        None => {
            eprintln!("Missing value for {flag}");
            process::exit(1);
        }
    }
}

fn parse_flag<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let raw = flag_value(args, i, flag);
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("Invalid {flag} value: {raw}");
            process::exit(1);
        }
    }
}

/// Seconds since the Unix epoch, as a string.
fn unix_timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("bench-{secs}")
}
