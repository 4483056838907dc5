// Rust guideline compliant 2026-08-30

//! Adapters (secondary ports) for the expense-service binaries.
//!
//! Each sub-module implements the hexagonal `ExpenseStore` port defined in
//! the `domain` crate. Adapters are intentionally isolated from engine and
//! generator logic.

pub mod in_memory_store;
