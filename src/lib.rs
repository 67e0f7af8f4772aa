//! Expense Tracker - personal expense tracking from the terminal
//!
//! This library provides the core functionality of the `expense-tracker`
//! command: a store that keeps every expense in a single JSON document and
//! rewrites it whole on every change, plus the reports derived from it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expense, id, money, document)
//! - `storage`: Document backends, JSON encoding, atomic file writes
//! - `services`: The expense store and its policies
//! - `reports`: Spending summaries and budget usage
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command definitions and handlers
//!
//! # Example
//!
//! ```rust
//! use expense_tracker::models::{ExpensePayload, Money};
//! use expense_tracker::services::{ExpenseStore, StoreOptions};
//! use expense_tracker::storage::MemoryBackend;
//!
//! let store = ExpenseStore::new(MemoryBackend::new(), StoreOptions::default());
//! store.initialize()?;
//! store.insert(ExpensePayload::new("Coffee", Money::from_minor(350)).with_category("food"))?;
//! assert_eq!(store.summary(None)?, Money::from_minor(350));
//! # Ok::<(), expense_tracker::ExpenseError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::ExpenseError;
