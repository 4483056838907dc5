// Rust guideline compliant 2026-08-30

//! Expense-service demo entry point -- in-memory storage.
//!
//! Wires the work-item generator and the concurrent processing engine to the
//! in-memory `ExpenseStore` adapter and runs a proof-of-concept end-to-end
//! flow: per-item concurrent processing, batch processing, and the concurrent
//! aggregate-query fan-out.
//!
//! # Usage
//!
//! ```text
//! RUST_LOG=info cargo run --bin expense_service
//!
//! # Also show per-unit debug output
//! RUST_LOG=debug cargo run --bin expense_service
//! ```

mod adapters;

use adapters::in_memory_store::InMemoryStore;
use anyhow::Context as _;
use engine::{Engine, EngineConfig};
use generator::{Generator, GeneratorConfig};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize the log facade before any async work.
    env_logger::init();

    let generator = Generator::new(
        GeneratorConfig::builder()
            .build()
            .context("failed to build generator config")?,
    );
    // Generous capacity: enough for every demo phase combined.
    let store = Arc::new(InMemoryStore::new(10_000));
    // Default config simulates 50 ms of blocking I/O per item.
    let engine = Engine::new(Arc::clone(&store), EngineConfig::default());

    // -- Per-item concurrent mode: one scheduled unit per input --
    let inputs = generator.generate(20);
    let records = engine
        .process_concurrently(inputs)
        .await
        .context("concurrent processing failed")?;
    log::info!("main.concurrent.done: records={}", records.len());

    // -- Batch mode: one scheduled unit per batch of 10 --
    engine
        .process_in_batches(generator.generate(50), 10)
        .await
        .context("batch processing failed")?;
    log::info!("main.batches.done: stored={}", store.len());

    // -- Concurrent aggregate queries --
    let report = engine
        .run_concurrent_queries()
        .await
        .context("concurrent queries failed")?;

    println!("stored records:     {}", report.total_count);
    println!("total amount:       {:.2}", report.total_amount);
    println!("food expenses:      {}", report.food_expenses.len());
    println!("transport expenses: {}", report.transport_expenses.len());

    Ok(())
}
