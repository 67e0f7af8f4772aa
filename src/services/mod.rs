//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, id assignment, ordering policies, and audit logging.

pub mod expense;

pub use expense::{ExpenseStore, IdStrategy, StoreOptions, UpdatePlacement};
