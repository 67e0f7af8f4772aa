//! Display formatting for terminal output

pub mod expense;

pub use expense::{
    format_budget_status, format_expense_details, format_expense_list, format_summary,
};
