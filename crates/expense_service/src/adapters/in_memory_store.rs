// Rust guideline compliant 2026-08-30

//! In-memory adapter for the `ExpenseStore` port.
//!
//! Intended for proof-of-concept runs and unit tests only.
//! Returns `StorageError::CapacityExceeded` when the configured capacity is
//! exceeded and `StorageError::Duplicate` on a repeated identifier.
//! `StorageError::Unavailable` is part of the port contract but is never
//! returned by this adapter; it is reserved for real backends.

use domain::{Category, Expense, ExpenseStore, PaymentMethod, StorageError};
use std::sync::Mutex;

/// `ExpenseStore` adapter backed by a `Mutex<Vec<Expense>>`.
///
/// The mutex makes the adapter safe for concurrent use from many scheduled
/// units; every operation takes the lock for its full duration, which is
/// acceptable at demo scale.
#[derive(Debug)]
pub struct InMemoryStore {
    inner: Mutex<Vec<Expense>>,
    /// Maximum number of records the store can hold.
    capacity: usize,
}

impl InMemoryStore {
    /// Create an empty store with the given `capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { inner: Mutex::new(vec![]), capacity }
    }

    /// Number of stored records.
    ///
    /// Used by the demo binary and tests to assert persistence counts.
    // #[allow] not #[expect]: dead_code fires in expense_bench but NOT in
    // expense_service, so #[expect] would generate an unfulfilled-expectation
    // warning in one of the two binaries.
    #[allow(dead_code, reason = "used by expense_service binary; dead in expense_bench")]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// `true` when no records are stored.
    // See len() allow(dead_code) comment above.
    #[allow(dead_code, reason = "used in tests only")]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Expense>> {
        // A poisoned lock only means a sibling unit panicked mid-push; the
        // vector itself is still structurally sound.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl ExpenseStore for InMemoryStore {
    /// Append `expense` to the internal store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::CapacityExceeded` when the store is full and
    /// `StorageError::Duplicate` when the identifier is already present.
    async fn persist(&self, expense: Expense) -> Result<Expense, StorageError> {
        let mut inner = self.lock();
        if inner.len() >= self.capacity {
            return Err(StorageError::CapacityExceeded { capacity: self.capacity });
        }
        if inner.iter().any(|e| e.id == expense.id) {
            return Err(StorageError::Duplicate { id: expense.id });
        }
        inner.push(expense.clone());
        Ok(expense)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Expense>, StorageError> {
        Ok(self.lock().iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_category(&self, category: Category) -> Result<Vec<Expense>, StorageError> {
        Ok(self.lock().iter().filter(|e| e.category == category).cloned().collect())
    }

    async fn find_by_method(&self, method: PaymentMethod) -> Result<Vec<Expense>, StorageError> {
        Ok(self.lock().iter().filter(|e| e.method == method).cloned().collect())
    }

    async fn sum_amount(&self) -> Result<f64, StorageError> {
        Ok(self.lock().iter().map(|e| e.amount).sum())
    }

    async fn count(&self) -> Result<u64, StorageError> {
        Ok(self.lock().len() as u64)
    }

    async fn average_amount(&self) -> Result<f64, StorageError> {
        let inner = self.lock();
        if inner.is_empty() {
            return Ok(0.0);
        }
        Ok(inner.iter().map(|e| e.amount).sum::<f64>() / inner.len() as f64)
    }

    /// No-op: the vector is always "durable".
    async fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
