// Rust guideline compliant 2026-08-30

//! Benchmark harness -- runs the same workload once concurrently and once
//! sequentially through the processing engine and compares wall-clock time
//! and throughput.
//!
//! Entry point: [`benchmark`]. Both runs persist their records as a side
//! effect; the harness does not roll the store back.

use domain::ExpenseStore;
use engine::{Engine, ProcessingError};
use generator::Generator;
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Timing and throughput of one benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    /// Wall-clock time for the whole run.
    pub elapsed: Duration,
    /// Number of items processed.
    pub count: usize,
    /// Items per second; `f64::INFINITY` when `elapsed` is zero.
    pub throughput: f64,
}

/// Comparison of a concurrent and a sequential run over the same inputs.
///
/// The relative percentages are `None` when either elapsed time is zero --
/// the ratios are undefined there, and an explicit sentinel beats a NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    /// Per-item concurrent-mode run.
    pub concurrent: RunStats,
    /// Strictly sequential baseline run.
    pub sequential: RunStats,
    /// `(sequential - concurrent) / sequential * 100`.
    pub time_reduction_pct: Option<f64>,
    /// `(concurrent_throughput / sequential_throughput - 1) * 100`.
    pub throughput_increase_pct: Option<f64>,
}

// ---------------------------------------------------------------------------
// Benchmark
// ---------------------------------------------------------------------------

/// Generate `count` inputs, run them through the engine concurrently and then
/// sequentially, and report the comparison.
///
/// Both runs consume the *same* generated inputs (the sequential run gets a
/// clone) so the workloads are identical up to RNG state.
///
/// # Errors
///
/// Propagates the first [`ProcessingError`] from either run.
pub async fn benchmark<S: ExpenseStore + 'static>(
    engine: &Engine<S>,
    generator: &Generator,
    count: usize,
) -> Result<BenchmarkReport, ProcessingError> {
    let inputs = generator.generate(count);
    log::info!("harness.benchmark.start: count={count}");

    let start = Instant::now();
    let concurrent_records = engine.process_concurrently(inputs.clone()).await?;
    let concurrent_elapsed = start.elapsed();

    let start = Instant::now();
    let sequential_records = engine.process_sequentially(inputs).await?;
    let sequential_elapsed = start.elapsed();

    let concurrent = run_stats(concurrent_records.len(), concurrent_elapsed);
    let sequential = run_stats(sequential_records.len(), sequential_elapsed);
    let (time_reduction_pct, throughput_increase_pct) = improvement(&concurrent, &sequential);

    log::info!(
        "harness.benchmark.done: concurrent={:?} sequential={:?}",
        concurrent.elapsed,
        sequential.elapsed
    );
    Ok(BenchmarkReport {
        concurrent,
        sequential,
        time_reduction_pct,
        throughput_increase_pct,
    })
}

/// Derive throughput from a run's item count and elapsed time.
fn run_stats(count: usize, elapsed: Duration) -> RunStats {
    let secs = elapsed.as_secs_f64();
    let throughput = if secs > 0.0 { count as f64 / secs } else { f64::INFINITY };
    RunStats { elapsed, count, throughput }
}

/// Relative time-reduction and throughput-increase percentages.
///
/// Both are `None` when either run completed in zero time, since the ratios
/// are undefined.
fn improvement(concurrent: &RunStats, sequential: &RunStats) -> (Option<f64>, Option<f64>) {
    let c = concurrent.elapsed.as_secs_f64();
    let s = sequential.elapsed.as_secs_f64();
    if c <= 0.0 || s <= 0.0 {
        return (None, None);
    }
    let time_reduction = (s - c) / s * 100.0;
    let throughput_increase = (concurrent.throughput / sequential.throughput - 1.0) * 100.0;
    (Some(time_reduction), Some(throughput_increase))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
