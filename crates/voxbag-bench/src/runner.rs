use std::time::Instant;

use crate::scenes::{self, SceneConfig};

/// Timing data for a single benchmark scene, in milliseconds per run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub operations: u32,
    pub chunk_count: usize,
    pub runs: u32,
    pub timings: TimingSeries,
}

impl BenchmarkResult {
    /// Mean nanoseconds per operation.
    pub fn ns_per_op(&self) -> f64 {
        if self.operations == 0 {
            return 0.0;
        }
        self.timings.mean_ms * 1_000_000.0 / self.operations as f64
    }
}

/// Runs each scene `runs` times on fresh state and collects wall-clock timings.
pub struct BenchmarkRunner {
    runs: u32,
}

impl BenchmarkRunner {
    /// Runner timing each scene `runs` times (at least once).
    pub fn new(runs: u32) -> Self {
        Self { runs: runs.max(1) }
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, config: &SceneConfig) -> BenchmarkResult {
        log::info!(
            "Running scene '{}' ({} ops x {} runs)...",
            config.name,
            config.iterations,
            self.runs
        );

        let mut run_times = Vec::with_capacity(self.runs as usize);
        let mut chunk_count = 0;

        for _ in 0..self.runs {
            let mut state = scenes::prepare(config);

            let start = Instant::now();
            chunk_count = scenes::execute(config, &mut state);
            run_times.push(start.elapsed().as_secs_f64() * 1000.0);
        }

        let timings = compute_timings(&run_times);
        log::info!(
            "  Done: mean={:.2}ms, p95={:.2}ms, {} chunks",
            timings.mean_ms,
            timings.p95_ms,
            chunk_count
        );

        BenchmarkResult {
            scene_name: config.name.to_string(),
            operations: config.iterations,
            chunk_count,
            runs: self.runs,
            timings,
        }
    }
}

/// Compute timing statistics from a list of run times in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}
