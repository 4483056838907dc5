// Rust guideline compliant 2026-08-30

//! Expense-service demo entry point -- `SQLite` storage.
//!
//! Identical to the main `expense_service` binary except that storage is
//! backed by a `SQLite` file (`expenses.db` in the current working directory)
//! instead of an in-memory vector. This demonstrates that the hexagonal
//! `ExpenseStore` port is truly swappable: only this entry point and the
//! adapter change; domain, generator and engine crates are untouched.
//!
//! # Usage
//!
//! ```text
//! RUST_LOG=info cargo run --bin expense_service_sqlite
//! ```
//!
//! The file `expenses.db` is created on first run. Inspect rows with any
//! `SQLite` browser (e.g., DB Browser for `SQLite`).

// Load sqlite_store directly so it only enters this binary's module tree,
// avoiding dead_code warnings in the `expense_service` binary (which uses
// InMemoryStore instead).
#[path = "adapters/sqlite_store.rs"]
mod sqlite_store;

use anyhow::Context as _;
use engine::{Engine, EngineConfig};
use generator::{Generator, GeneratorConfig};
use sqlite_store::SqliteStore;
use std::sync::Arc;

/// Database file created in the current working directory on first run.
///
/// Using the current working directory is acceptable for a demo adapter.
/// A production adapter would read this from configuration or environment.
const DB_URL: &str = "sqlite:expenses.db";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize the log facade before any async work.
    env_logger::init();

    let generator = Generator::new(
        GeneratorConfig::builder()
            .build()
            .context("failed to build generator config")?,
    );
    // SqliteStore: opens or creates expenses.db in the working directory.
    let store = Arc::new(
        SqliteStore::new(DB_URL)
            .await
            .context("failed to open SQLite storage")?,
    );
    let engine = Engine::new(Arc::clone(&store), EngineConfig::default());

    // -- Per-item concurrent mode: one scheduled unit per input --
    let records = engine
        .process_concurrently(generator.generate(20))
        .await
        .context("concurrent processing failed")?;
    log::info!("main.concurrent.done: records={}", records.len());

    // -- Batch mode: one scheduled unit per batch of 10 --
    engine
        .process_in_batches(generator.generate(50), 10)
        .await
        .context("batch processing failed")?;
    log::info!("main.batches.done");

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
