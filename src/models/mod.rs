//! Core data models for the expense tracker
//!
//! This module contains the data structures persisted by the store: the
//! expense record, its identifier and amount types, and the document that
//! wraps the whole collection.

pub mod document;
pub mod expense;
pub mod ids;
pub mod money;

pub use document::{ExpenseDocument, RecordShape};
pub use expense::{Expense, ExpensePayload, ExpenseValidationError};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
