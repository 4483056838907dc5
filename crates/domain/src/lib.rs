// Rust guideline compliant 2026-08-30

//! Shared domain types for the concurrent expense service.
//!
//! Defines `Expense`, `ExpenseInput`, the `PaymentMethod`/`Category`
//! enumerations, `StorageError`, and the hexagonal `ExpenseStore` port.
//! All pipeline components depend on this crate; no other workspace crate
//! is imported here.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Payment method attached to an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    Cash,
    Debit,
    Credit,
}

impl PaymentMethod {
    /// All methods in declaration order; work-item generation cycles over this.
    pub const ALL: [Self; 4] = [Self::Card, Self::Cash, Self::Debit, Self::Credit];

    /// Stable uppercase name used for storage and display.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "CARD",
            Self::Cash => "CASH",
            Self::Debit => "DEBIT",
            Self::Credit => "CREDIT",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CARD" => Ok(Self::Card),
            "CASH" => Ok(Self::Cash),
            "DEBIT" => Ok(Self::Debit),
            "CREDIT" => Ok(Self::Credit),
            other => Err(ParseFieldError {
                field: "payment method",
                value: other.to_owned(),
            }),
        }
    }
}

/// Spending category attached to an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Health,
    Education,
}

impl Category {
    /// All categories in declaration order; work-item generation cycles over this.
    pub const ALL: [Self; 6] = [
        Self::Food,
        Self::Transport,
        Self::Shopping,
        Self::Entertainment,
        Self::Health,
        Self::Education,
    ];

    /// Stable uppercase name used for storage and display.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "FOOD",
            Self::Transport => "TRANSPORT",
            Self::Shopping => "SHOPPING",
            Self::Entertainment => "ENTERTAINMENT",
            Self::Health => "HEALTH",
            Self::Education => "EDUCATION",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FOOD" => Ok(Self::Food),
            "TRANSPORT" => Ok(Self::Transport),
            "SHOPPING" => Ok(Self::Shopping),
            "ENTERTAINMENT" => Ok(Self::Entertainment),
            "HEALTH" => Ok(Self::Health),
            "EDUCATION" => Ok(Self::Education),
            other => Err(ParseFieldError {
                field: "category",
                value: other.to_owned(),
            }),
        }
    }
}

/// A stored enum field could not be mapped back to its variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field}: {value}")]
pub struct ParseFieldError {
    /// Which field failed to parse (e.g. "category").
    pub field: &'static str,
    /// The offending stored value.
    pub value: String,
}

// ---------------------------------------------------------------------------
// ExpenseInput / Expense
// ---------------------------------------------------------------------------

/// A transient, not-yet-persisted expense used to drive synthetic load.
///
/// Immutable once created; the processing engine turns each input into a
/// persisted [`Expense`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseInput {
    /// Amount in currency units. Non-negative by convention, not validated.
    pub amount: f64,
    pub method: PaymentMethod,
    pub category: Category,
    /// Free-text label.
    pub description: String,
}

/// A persisted expense record.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// Opaque unique identifier, assigned exactly once at creation.
    pub id: String,
    pub amount: f64,
    pub method: PaymentMethod,
    pub category: Category,
    /// Creation timestamp, assigned once and preserved across updates.
    pub created_at: DateTime<Utc>,
    pub description: String,
}

impl Expense {
    /// Build a fresh record with a random UUID v4 identifier and the current time.
    #[must_use]
    pub fn of(
        amount: f64,
        method: PaymentMethod,
        category: Category,
        description: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            amount,
            method,
            category,
            created_at: Utc::now(),
            description,
        }
    }

    /// Apply an update while preserving identity.
    ///
    /// Keeps `self.id` and `self.created_at`; takes amount, method, category
    /// and description from `changes`.
    #[must_use]
    pub fn update(&self, changes: &Self) -> Self {
        Self {
            id: self.id.clone(),
            amount: changes.amount,
            method: changes.method,
            category: changes.category,
            created_at: self.created_at,
            description: changes.description.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Storage port
// ---------------------------------------------------------------------------

/// Errors that a storage implementation may return.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// A record with this identifier already exists.
    #[error("duplicate expense id: {id}")]
    Duplicate { id: String },
    /// Storage has reached its maximum capacity.
    #[error("storage full (capacity: {capacity})")]
    CapacityExceeded { capacity: usize },
    /// Backend could not serve the request.
    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Hexagonal port: durable store for expense records.
///
/// Implementations live outside the domain and engine crates (e.g. in the
/// binary crate). The processing engine depends exclusively on this trait --
/// never on a concrete adapter. Implementations must be safe to call from
/// many scheduled units concurrently; the engine adds no locking of its own.
#[async_trait::async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Persist one record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Duplicate` when the identifier already exists,
    /// `StorageError::CapacityExceeded` when the backend is full, or
    /// `StorageError::Unavailable` when it cannot be reached.
    async fn persist(&self, expense: Expense) -> Result<Expense, StorageError>;

    /// Look up one record by identifier.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` when the backend cannot be reached.
    async fn find_by_id(&self, id: &str) -> Result<Option<Expense>, StorageError>;

    /// All records in `category`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` when the backend cannot be reached.
    async fn find_by_category(&self, category: Category) -> Result<Vec<Expense>, StorageError>;

    /// All records paid with `method`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` when the backend cannot be reached.
    async fn find_by_method(&self, method: PaymentMethod) -> Result<Vec<Expense>, StorageError>;

    /// Sum of all amounts; `0.0` when the store is empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` when the backend cannot be reached.
    async fn sum_amount(&self) -> Result<f64, StorageError>;

    /// Number of stored records; `0` when the store is empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` when the backend cannot be reached.
    async fn count(&self) -> Result<u64, StorageError>;

    /// Average amount; `0.0` when the store is empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` when the backend cannot be reached.
    async fn average_amount(&self) -> Result<f64, StorageError>;

    /// Make a prior batch of persists durable before the caller proceeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` when the backend cannot be reached.
    async fn flush(&self) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn method_cycle_order_and_roundtrip() {
        assert_eq!(PaymentMethod::ALL.len(), 4);
        for method in PaymentMethod::ALL {
            let parsed = method.as_str().parse::<PaymentMethod>().unwrap();
            assert_eq!(parsed, method);
        }
        assert_eq!(PaymentMethod::ALL[0], PaymentMethod::Card);
        assert_eq!(PaymentMethod::ALL[3], PaymentMethod::Credit);
    }

    #[test]
    fn category_cycle_order_and_roundtrip() {
        assert_eq!(Category::ALL.len(), 6);
        for category in Category::ALL {
            let parsed = category.as_str().parse::<Category>().unwrap();
            assert_eq!(parsed, category);
        }
        assert_eq!(Category::ALL[0], Category::Food);
        assert_eq!(Category::ALL[5], Category::Education);
    }

    #[test]
    fn unknown_enum_value_rejected() {
        let err = "WIRE".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(err.to_string(), "unknown payment method: WIRE");
        let err = "RENT".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category: RENT");
    }

    #[test]
    fn of_assigns_fresh_identity() {
        let a = Expense::of(10.0, PaymentMethod::Card, Category::Food, "a".to_owned());
        let b = Expense::of(10.0, PaymentMethod::Card, Category::Food, "b".to_owned());
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id, "identifiers must be unique");
        // Identifier is a valid UUID.
        a.id.parse::<uuid::Uuid>().unwrap();
    }

    #[test]
    fn update_preserves_id_and_created_at() {
        let original = Expense::of(10.0, PaymentMethod::Card, Category::Food, "old".to_owned());
        let changes = Expense::of(99.0, PaymentMethod::Cash, Category::Health, "new".to_owned());
        let updated = original.update(&changes);
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert!((updated.amount - 99.0).abs() < f64::EPSILON);
        assert_eq!(updated.method, PaymentMethod::Cash);
        assert_eq!(updated.category, Category::Health);
        assert_eq!(updated.description, "new");
    }

    #[test]
    fn storage_error_variants() {
        let dup = StorageError::Duplicate { id: "x".to_owned() };
        let full = StorageError::CapacityExceeded { capacity: 10 };
        assert_eq!(dup.to_string(), "duplicate expense id: x");
        assert_eq!(full.to_string(), "storage full (capacity: 10)");
        assert_ne!(dup, full);
    }

    /// Verify that a minimal `ExpenseStore` implementation compiles and
    /// satisfies the full port surface.
    #[tokio::test]
    async fn store_trait_compiles_with_minimal_impl() {
        struct MinimalStore {
            inner: Mutex<Vec<Expense>>,
        }

        #[async_trait::async_trait]
        impl ExpenseStore for MinimalStore {
            async fn persist(&self, expense: Expense) -> Result<Expense, StorageError> {
                self.inner.lock().unwrap().push(expense.clone());
                Ok(expense)
            }

            async fn find_by_id(&self, id: &str) -> Result<Option<Expense>, StorageError> {
                Ok(self.inner.lock().unwrap().iter().find(|e| e.id == id).cloned())
            }

            async fn find_by_category(
                &self,
                category: Category,
            ) -> Result<Vec<Expense>, StorageError> {
                Ok(self
                    .inner
                    .lock()
                    .unwrap()
                    .iter()
                    .filter(|e| e.category == category)
                    .cloned()
                    .collect())
            }

            async fn find_by_method(
                &self,
                method: PaymentMethod,
            ) -> Result<Vec<Expense>, StorageError> {
                Ok(self
                    .inner
                    .lock()
                    .unwrap()
                    .iter()
                    .filter(|e| e.method == method)
                    .cloned()
                    .collect())
            }

            async fn sum_amount(&self) -> Result<f64, StorageError> {
                Ok(self.inner.lock().unwrap().iter().map(|e| e.amount).sum())
            }

            async fn count(&self) -> Result<u64, StorageError> {
                Ok(self.inner.lock().unwrap().len() as u64)
            }

            async fn average_amount(&self) -> Result<f64, StorageError> {
                let inner = self.inner.lock().unwrap();
                if inner.is_empty() {
                    return Ok(0.0);
                }
                Ok(inner.iter().map(|e| e.amount).sum::<f64>() / inner.len() as f64)
            }

            async fn flush(&self) -> Result<(), StorageError> {
                Ok(())
            }
        }

        let store = MinimalStore { inner: Mutex::new(vec![]) };
        let expense = Expense::of(12.5, PaymentMethod::Debit, Category::Transport, "t".to_owned());
        let stored = store.persist(expense.clone()).await.unwrap();
        assert_eq!(stored, expense);
        assert_eq!(store.find_by_id(&expense.id).await.unwrap(), Some(expense));
        assert_eq!(store.count().await.unwrap(), 1);
        assert!((store.sum_amount().await.unwrap() - 12.5).abs() < f64::EPSILON);
        assert!((store.average_amount().await.unwrap() - 12.5).abs() < f64::EPSILON);
        assert_eq!(
            store.find_by_category(Category::Transport).await.unwrap().len(),
            1
        );
        assert_eq!(store.find_by_method(PaymentMethod::Debit).await.unwrap().len(), 1);
        store.flush().await.unwrap();
    }
}
