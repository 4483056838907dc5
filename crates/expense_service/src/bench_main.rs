// Rust guideline compliant 2026-08-30

//! Benchmark entry point -- concurrent vs. sequential expense processing.
//!
//! For each item count, runs the same generated workload once with per-item
//! fan-out and once strictly sequentially, then prints elapsed time,
//! throughput, and the relative improvement.
//!
//! # Measurement scope
//!
//! The engine simulates 50 ms of blocking I/O per item (the default
//! [`EngineConfig`]), so the numbers demonstrate how scheduled units overlap
//! their I/O waits rather than raw CPU throughput. Storage is the in-memory
//! adapter; real database latency is not measured.
//!
//! No `env_logger::init()`: log macros compile to no-ops, eliminating log I/O
//! overhead from measurements.
//!
//! # Usage
//!
//! ```text
//! # Quick sanity check (debug build)
//! cargo build --bin expense_bench
//!
//! # Accurate numbers (release build)
//! cargo run --bin expense_bench --release
//! ```

mod adapters;

use adapters::in_memory_store::InMemoryStore;
use engine::{Engine, EngineConfig};
use generator::{Generator, GeneratorConfig};
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Benchmark parameters
// ---------------------------------------------------------------------------

/// Item counts exercised per run. Each count gets a fresh store and engine.
const COUNTS: &[usize] = &[10, 50, 100];

/// RNG seed so every run benchmarks an identical workload.
const SEED: u64 = 42;

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("bench: io_delay=50ms per item, in-memory storage, seed={SEED}");
    println!(
        "{:>7} | {:>12} | {:>12} | {:>10} | {:>10} | {:>9} | {:>9}",
        "count", "conc ms", "seq ms", "conc tx/s", "seq tx/s", "time -%", "tput +%"
    );
    println!(
        "{:-<8}+{:-<14}+{:-<14}+{:-<12}+{:-<12}+{:-<11}+{:-<10}",
        "", "", "", "", "", "", ""
    );

    for &count in COUNTS {
        // Fresh store per count: both runs persist, so a shared store would
        // grow across iterations and skew in-memory lookup costs.
        let store = Arc::new(InMemoryStore::new(count * 2));
        let engine = Engine::new(Arc::clone(&store), EngineConfig::default());
        let generator = Generator::new(GeneratorConfig::builder().seed(SEED).build()?);

        let report = harness::benchmark(&engine, &generator, count).await?;

        println!(
            "{:>7} | {:>12.1} | {:>12.1} | {:>10} | {:>10} | {:>9} | {:>9}",
            count,
            millis(report.concurrent.elapsed),
            millis(report.sequential.elapsed),
            fmt_tps(report.concurrent.throughput),
            fmt_tps(report.sequential.throughput),
            fmt_pct(report.time_reduction_pct),
            fmt_pct(report.throughput_increase_pct),
        );
    }

    Ok(())
}

/// Elapsed time as fractional milliseconds.
fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000.0
}

/// Throughput with one decimal, or "inf" for a zero-time run.
fn fmt_tps(tps: f64) -> String {
    if tps.is_finite() { format!("{tps:.1}") } else { "inf".to_owned() }
}

/// Percentage with one decimal, or "n/a" when the ratio is undefined.
fn fmt_pct(pct: Option<f64>) -> String {
    pct.map_or_else(|| "n/a".to_owned(), |p| format!("{p:.1}"))
}
