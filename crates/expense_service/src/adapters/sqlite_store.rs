// Rust guideline compliant 2026-08-30

//! SQLite adapter for the `ExpenseStore` port (demo).
//!
//! Persists `Expense` rows to a SQLite file via `sqlx`. Proves that the
//! hexagonal `ExpenseStore` port is truly swappable without touching domain,
//! generator or engine crates.
//!
//! # Dependency note
//!
//! `sqlx` is a hard dependency (no feature flag). This is intentional for
//! a proof-of-concept binary where build-complexity trade-offs favour
//! simplicity over optional compilation.
//!
//! # Durability note
//!
//! The pool autocommits every `INSERT`, so `flush` has nothing buffered to
//! write and is a no-op. Duplicate identifiers are rejected by the primary
//! key and surface as `StorageError::Duplicate`.

use chrono::{DateTime, Utc};
use domain::{Category, Expense, ExpenseStore, PaymentMethod, StorageError};
use sqlx::Row as _;

/// `ExpenseStore` adapter backed by a SQLite database via `sqlx`.
///
/// Connects to (or creates) a SQLite file and ensures the `expenses` table
/// exists. Enum fields are stored as their uppercase names; the creation
/// timestamp is stored as RFC 3339 text.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: sqlx::SqlitePool,
}

impl SqliteStore {
    /// Open or create a SQLite database and initialize the schema.
    ///
    /// Passes `create_if_missing(true)` so the database file is created on
    /// first run without manual setup. The pool is capped at one connection:
    /// `sqlite::memory:` gives every connection its own private database, so
    /// a larger pool would scatter test rows across invisible databases.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` when the connection or schema creation fails.
    pub async fn new(db_url: &str) -> Result<Self, sqlx::Error> {
        let opts = db_url
            .parse::<sqlx::sqlite::SqliteConnectOptions>()?
            .create_if_missing(true);
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS expenses (
                id          TEXT PRIMARY KEY,
                amount      REAL NOT NULL,
                method      TEXT NOT NULL,
                category    TEXT NOT NULL,
                created_at  TEXT NOT NULL,
                description TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }
}

/// Map any non-constraint `sqlx`/decode failure to `StorageError::Unavailable`.
fn unavailable(e: impl std::fmt::Display) -> StorageError {
    StorageError::Unavailable { reason: e.to_string() }
}

/// Decode one `expenses` row back into a domain record.
///
/// A row that fails to decode (unknown enum name, malformed timestamp) maps
/// to `StorageError::Unavailable`: it means the table was written by
/// something other than this adapter.
fn row_to_expense(row: &sqlx::sqlite::SqliteRow) -> Result<Expense, StorageError> {
    let method: String = row.try_get("method").map_err(unavailable)?;
    let category: String = row.try_get("category").map_err(unavailable)?;
    let created_at: String = row.try_get("created_at").map_err(unavailable)?;
    Ok(Expense {
        id: row.try_get("id").map_err(unavailable)?,
        amount: row.try_get("amount").map_err(unavailable)?,
        method: method.parse::<PaymentMethod>().map_err(unavailable)?,
        category: category.parse::<Category>().map_err(unavailable)?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(unavailable)?
            .with_timezone(&Utc),
        description: row.try_get("description").map_err(unavailable)?,
    })
}

#[async_trait::async_trait]
impl ExpenseStore for SqliteStore {
    /// Insert one row; the primary key enforces identifier uniqueness.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Duplicate` on a unique-constraint violation and
    /// `StorageError::Unavailable` on any other `sqlx` error. The underlying
    /// error is logged at `error` level before mapping.
    async fn persist(&self, expense: Expense) -> Result<Expense, StorageError> {
        sqlx::query(
            "INSERT INTO expenses (id, amount, method, category, created_at, description)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&expense.id)
        .bind(expense.amount)
        .bind(expense.method.as_str())
        .bind(expense.category.as_str())
        .bind(expense.created_at.to_rfc3339())
        .bind(&expense.description)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e
                && db.is_unique_violation()
            {
                return StorageError::Duplicate { id: expense.id.clone() };
            }
            log::error!("sqlite.persist: {e}");
            unavailable(e)
        })?;
        Ok(expense)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Expense>, StorageError> {
        let row = sqlx::query("SELECT * FROM expenses WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)?;
        row.as_ref().map(row_to_expense).transpose()
    }

    async fn find_by_category(&self, category: Category) -> Result<Vec<Expense>, StorageError> {
        let rows = sqlx::query("SELECT * FROM expenses WHERE category = ? ORDER BY rowid")
            .bind(category.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(unavailable)?;
        rows.iter().map(row_to_expense).collect()
    }

    async fn find_by_method(&self, method: PaymentMethod) -> Result<Vec<Expense>, StorageError> {
        let rows = sqlx::query("SELECT * FROM expenses WHERE method = ? ORDER BY rowid")
            .bind(method.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(unavailable)?;
        rows.iter().map(row_to_expense).collect()
    }

    async fn sum_amount(&self) -> Result<f64, StorageError> {
        sqlx::query_scalar("SELECT COALESCE(SUM(amount), 0.0) FROM expenses")
            .fetch_one(&self.pool)
            .await
            .map_err(unavailable)
    }

    async fn count(&self) -> Result<u64, StorageError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM expenses")
            .fetch_one(&self.pool)
            .await
            .map_err(unavailable)?;
        u64::try_from(n).map_err(unavailable)
    }

    async fn average_amount(&self) -> Result<f64, StorageError> {
        sqlx::query_scalar("SELECT COALESCE(AVG(amount), 0.0) FROM expenses")
            .fetch_one(&self.pool)
            .await
            .map_err(unavailable)
    }

    /// No-op: every insert is committed as it executes (autocommit pool).
    async fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::SqliteStore;
    use domain::{Category, Expense, ExpenseStore as _, PaymentMethod, StorageError};

    // Each test opens a fresh single-connection pool backed by an in-memory
    // SQLite database, so tests are fully isolated with no on-disk
    // side-effects.
    async fn make_store() -> SqliteStore {
        SqliteStore::new("sqlite::memory:")
            .await
            .expect("in-memory SQLite should open")
    }

    fn make_expense(amount: f64, method: PaymentMethod, category: Category) -> Expense {
        Expense::of(amount, method, category, "sqlite test".to_owned())
    }

    // SQ-T01: a persisted record round-trips through find_by_id field-for-field.
    #[tokio::test]
    async fn persist_roundtrips_through_find_by_id() {
        let store = make_store().await;
        let expense = make_expense(42.5, PaymentMethod::Debit, Category::Transport);
        store.persist(expense.clone()).await.unwrap();

        let found = store.find_by_id(&expense.id).await.unwrap().unwrap();
        assert_eq!(found.id, expense.id);
        assert!((found.amount - expense.amount).abs() < f64::EPSILON);
        assert_eq!(found.method, expense.method);
        assert_eq!(found.category, expense.category);
        assert_eq!(found.description, expense.description);
        // RFC 3339 keeps sub-second precision, so the timestamp survives.
        assert_eq!(found.created_at, expense.created_at);
    }

    // SQ-T02: duplicate identifier violates the primary key.
    #[tokio::test]
    async fn duplicate_id_surfaces_duplicate_error() {
        let store = make_store().await;
        let expense = make_expense(1.0, PaymentMethod::Card, Category::Food);
        store.persist(expense.clone()).await.unwrap();
        let result = store.persist(expense.clone()).await;
        assert!(
            matches!(result, Err(StorageError::Duplicate { id }) if id == expense.id),
            "expected Duplicate"
        );
    }

    // SQ-T03: unknown identifier yields None, not an error.
    #[tokio::test]
    async fn missing_id_is_none() {
        let store = make_store().await;
        assert_eq!(store.find_by_id("no-such-id").await.unwrap(), None);
    }

    // SQ-T04: category filter returns only matching rows in insertion order.
    #[tokio::test]
    async fn category_filter_in_insertion_order() {
        let store = make_store().await;
        let first = make_expense(1.0, PaymentMethod::Card, Category::Food);
        let other = make_expense(2.0, PaymentMethod::Cash, Category::Health);
        let second = make_expense(3.0, PaymentMethod::Card, Category::Food);
        store.persist(first.clone()).await.unwrap();
        store.persist(other).await.unwrap();
        store.persist(second.clone()).await.unwrap();

        let food = store.find_by_category(Category::Food).await.unwrap();
        assert_eq!(food.len(), 2);
        assert_eq!(food[0].id, first.id);
        assert_eq!(food[1].id, second.id);
    }

    // SQ-T05: method filter.
    #[tokio::test]
    async fn method_filter_matches() {
        let store = make_store().await;
        store
            .persist(make_expense(1.0, PaymentMethod::Credit, Category::Shopping))
            .await
            .unwrap();
        store
            .persist(make_expense(2.0, PaymentMethod::Cash, Category::Shopping))
            .await
            .unwrap();
        let by_credit = store.find_by_method(PaymentMethod::Credit).await.unwrap();
        assert_eq!(by_credit.len(), 1);
        assert_eq!(by_credit[0].method, PaymentMethod::Credit);
    }

    // SQ-T06: aggregates on an empty table default to zero.
    #[tokio::test]
    async fn empty_table_aggregates_are_zero() {
        let store = make_store().await;
        assert!((store.sum_amount().await.unwrap()).abs() < f64::EPSILON);
        assert_eq!(store.count().await.unwrap(), 0);
        assert!((store.average_amount().await.unwrap()).abs() < f64::EPSILON);
    }

    // SQ-T07: aggregates over seeded rows.
    #[tokio::test]
    async fn aggregates_over_rows() {
        let store = make_store().await;
        store.persist(make_expense(10.0, PaymentMethod::Card, Category::Food)).await.unwrap();
        store.persist(make_expense(20.0, PaymentMethod::Card, Category::Food)).await.unwrap();
        store.persist(make_expense(60.0, PaymentMethod::Card, Category::Food)).await.unwrap();
        assert!((store.sum_amount().await.unwrap() - 90.0).abs() < 1e-9);
        assert_eq!(store.count().await.unwrap(), 3);
        assert!((store.average_amount().await.unwrap() - 30.0).abs() < 1e-9);
    }

    // SQ-T08: flush always succeeds (autocommit pool).
    #[tokio::test]
    async fn flush_is_noop() {
        let store = make_store().await;
        store.flush().await.unwrap();
    }
}
