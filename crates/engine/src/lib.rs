// Rust guideline compliant 2026-08-30

//! Concurrent processing engine -- fans out independent expense-processing
//! operations as scheduled units on the async runtime and joins them with
//! fail-fast semantics.
//!
//! Entry points: [`Engine::process_concurrently`],
//! [`Engine::process_in_batches`], [`Engine::insert_batches`],
//! [`Engine::run_concurrent_queries`], and the [`partition`] helper.
//!
//! # Join semantics
//!
//! Every fan-out operation waits for all of its scheduled units and surfaces
//! the first failure immediately, discarding partial results. Already-spawned
//! sibling units are **not** cancelled; dropping their join handles detaches
//! them and they run to completion in the background. This mirrors the
//! fail-fast join of the original service rather than adding cancellation
//! semantics it never had.

use domain::{Category, Expense, ExpenseInput, ExpenseStore, StorageError};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

// ---------------------------------------------------------------------------
// ProcessingError
// ---------------------------------------------------------------------------

/// Errors that can occur during concurrent expense processing.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    /// A caller-supplied argument is invalid.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// A scheduled unit failed inside the store collaborator.
    #[error("storage error: {source}")]
    Storage {
        /// The underlying storage error.
        #[from]
        source: StorageError,
    },
    /// A scheduled unit panicked or was aborted before completing.
    #[error("scheduled unit failed: {reason}")]
    Join {
        /// Human-readable description of the join failure.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Batch partitioner
// ---------------------------------------------------------------------------

/// Split `items` into contiguous batches of `size` elements, the last batch
/// possibly shorter.
///
/// Relative order is preserved within and across batches; concatenating the
/// batches in order reconstructs `items` exactly. An empty input yields zero
/// batches.
///
/// # Errors
///
/// Returns [`ProcessingError::InvalidArgument`] when `size` is zero.
pub fn partition<T>(items: Vec<T>, size: usize) -> Result<Vec<Vec<T>>, ProcessingError> {
    if size == 0 {
        return Err(ProcessingError::InvalidArgument {
            reason: "batch size must be >= 1".to_owned(),
        });
    }
    let mut batches = Vec::with_capacity(items.len().div_ceil(size));
    let mut iter = items.into_iter();
    loop {
        let batch: Vec<T> = iter.by_ref().take(size).collect();
        if batch.is_empty() {
            break;
        }
        batches.push(batch);
    }
    Ok(batches)
}

// ---------------------------------------------------------------------------
// AggregateReport
// ---------------------------------------------------------------------------

/// Assembled result of the concurrent aggregate-query fan-out.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    /// All records in the FOOD category.
    pub food_expenses: Vec<Expense>,
    /// All records in the TRANSPORT category.
    pub transport_expenses: Vec<Expense>,
    /// Sum of all stored amounts; `0.0` when the store is empty.
    pub total_amount: f64,
    /// Total number of stored records.
    pub total_count: u64,
}

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Runtime configuration for an [`Engine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Simulated blocking-I/O latency applied once per processed item.
    pub io_delay: Duration,
}

impl Default for EngineConfig {
    /// 50 ms matches the latency the original service simulated per item.
    fn default() -> Self {
        Self { io_delay: Duration::from_millis(50) }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Concurrent processing engine over an [`ExpenseStore`] port.
///
/// Generic over `S: ExpenseStore` for static dispatch; the store handle is
/// the only shared mutable resource and is cloned (`Arc`) into each scheduled
/// unit. The engine exclusively owns its handle -- dropping the engine
/// releases it; there is no process-wide singleton.
#[derive(Debug)]
pub struct Engine<S> {
    store: Arc<S>,
    config: EngineConfig,
}

impl<S: ExpenseStore + 'static> Engine<S> {
    /// Create a new engine over `store` with `config`.
    #[must_use]
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Process one input: simulate the I/O latency, build a fresh record and
    /// persist it.
    ///
    /// Safe to invoke from many scheduled units concurrently; the only shared
    /// state is the store collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::Storage`] when the persist fails.
    pub async fn process_one(&self, input: ExpenseInput) -> Result<Expense, ProcessingError> {
        process_single(self.store.as_ref(), self.config.io_delay, input).await
    }

    /// Process every input on its own scheduled unit and wait for all of them.
    ///
    /// The returned vector index-corresponds to `inputs` regardless of
    /// completion order. An empty input returns an empty vector without
    /// touching the store.
    ///
    /// # Errors
    ///
    /// Fail-fast: the first unit failure is returned immediately as
    /// [`ProcessingError::Storage`] (or [`ProcessingError::Join`] for a
    /// panicked unit); partial results are discarded and remaining siblings
    /// run detached (see module-level join semantics).
    pub async fn process_concurrently(
        &self,
        inputs: Vec<ExpenseInput>,
    ) -> Result<Vec<Expense>, ProcessingError> {
        let handles: Vec<JoinHandle<Result<Expense, ProcessingError>>> = inputs
            .into_iter()
            .map(|input| {
                let store = Arc::clone(&self.store);
                let io_delay = self.config.io_delay;
                tokio::spawn(async move { process_single(store.as_ref(), io_delay, input).await })
            })
            .collect();
        log::debug!("engine.process.spawned: units={}", handles.len());

        // Awaiting in submission order keeps index-correspondence with inputs.
        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(join_unit(handle).await?);
        }
        log::info!("engine.process.completed: records={}", results.len());
        Ok(results)
    }

    /// Process every input strictly one at a time, in order.
    ///
    /// Baseline for the benchmark harness; same per-item operation as
    /// [`process_concurrently`](Self::process_concurrently) without fan-out.
    ///
    /// # Errors
    ///
    /// Returns the first per-item failure.
    pub async fn process_sequentially(
        &self,
        inputs: Vec<ExpenseInput>,
    ) -> Result<Vec<Expense>, ProcessingError> {
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            results.push(self.process_one(input).await?);
        }
        Ok(results)
    }

    /// Partition `inputs` and process each batch on its own scheduled unit.
    ///
    /// Each unit processes its batch sequentially; units run concurrently
    /// with each other. Completion signal only -- records are a side effect
    /// on the store.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::InvalidArgument`] when `batch_size` is
    /// zero; otherwise the same fail-fast join semantics as
    /// [`process_concurrently`](Self::process_concurrently).
    pub async fn process_in_batches(
        &self,
        inputs: Vec<ExpenseInput>,
        batch_size: usize,
    ) -> Result<(), ProcessingError> {
        let batches = partition(inputs, batch_size)?;
        log::debug!("engine.batches.spawned: units={}", batches.len());

        let handles: Vec<JoinHandle<Result<(), ProcessingError>>> = batches
            .into_iter()
            .map(|batch| {
                let store = Arc::clone(&self.store);
                let io_delay = self.config.io_delay;
                tokio::spawn(async move {
                    for input in batch {
                        process_single(store.as_ref(), io_delay, input).await?;
                    }
                    Ok(())
                })
            })
            .collect();

        for handle in handles {
            join_unit(handle).await?;
        }
        log::info!("engine.batches.completed");
        Ok(())
    }

    /// Persist already-constructed records in batches, flushing once per batch.
    ///
    /// One scheduled unit per batch; each unit persists every record in its
    /// batch and then calls [`ExpenseStore::flush`] before finishing.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::InvalidArgument`] when `batch_size` is
    /// zero; otherwise fail-fast on the first persist or flush failure.
    pub async fn insert_batches(
        &self,
        expenses: Vec<Expense>,
        batch_size: usize,
    ) -> Result<(), ProcessingError> {
        let batches = partition(expenses, batch_size)?;
        log::debug!("engine.insert.spawned: units={}", batches.len());

        let handles: Vec<JoinHandle<Result<(), ProcessingError>>> = batches
            .into_iter()
            .map(|batch| {
                let store = Arc::clone(&self.store);
                tokio::spawn(async move {
                    for expense in batch {
                        store.persist(expense).await?;
                    }
                    store.flush().await?;
                    Ok(())
                })
            })
            .collect();

        for handle in handles {
            join_unit(handle).await?;
        }
        log::info!("engine.insert.completed");
        Ok(())
    }

    /// Run the four independent aggregate queries on separate scheduled units
    /// and assemble their results.
    ///
    /// # Errors
    ///
    /// Fail-fast on the first query failure.
    pub async fn run_concurrent_queries(&self) -> Result<AggregateReport, ProcessingError> {
        let food = {
            let store = Arc::clone(&self.store);
            tokio::spawn(async move { store.find_by_category(Category::Food).await })
        };
        let transport = {
            let store = Arc::clone(&self.store);
            tokio::spawn(async move { store.find_by_category(Category::Transport).await })
        };
        let total_amount = {
            let store = Arc::clone(&self.store);
            tokio::spawn(async move { store.sum_amount().await })
        };
        let total_count = {
            let store = Arc::clone(&self.store);
            tokio::spawn(async move { store.count().await })
        };

        let report = AggregateReport {
            food_expenses: join_unit(food).await?,
            transport_expenses: join_unit(transport).await?,
            total_amount: join_unit(total_amount).await?,
            total_count: join_unit(total_count).await?,
        };
        log::info!(
            "engine.queries.completed: food={} transport={} count={}",
            report.food_expenses.len(),
            report.transport_expenses.len(),
            report.total_count
        );
        Ok(report)
    }
}

/// Single-item processing operation shared by all execution modes.
///
/// Suspension points: the simulated I/O delay and the store persist. Both
/// are the only places a scheduled unit yields control.
async fn process_single<S: ExpenseStore>(
    store: &S,
    io_delay: Duration,
    input: ExpenseInput,
) -> Result<Expense, ProcessingError> {
    tokio::time::sleep(io_delay).await;
    let expense = Expense::of(input.amount, input.method, input.category, input.description);
    let stored = store.persist(expense).await?;
    Ok(stored)
}

/// Await one scheduled unit, mapping a panicked/aborted task to
/// [`ProcessingError::Join`] and propagating its own error otherwise.
async fn join_unit<T, E>(handle: JoinHandle<Result<T, E>>) -> Result<T, ProcessingError>
where
    ProcessingError: From<E>,
{
    match handle.await {
        Ok(result) => Ok(result?),
        Err(e) => Err(ProcessingError::Join { reason: e.to_string() }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
