//! Reports over the expense document
//!
//! Monthly and all-time spending totals, and budget usage.

pub mod summary;

pub use summary::{month_name, BudgetUsage, SpendingSummary};
