//! Spending summaries and budget usage
//!
//! Pure computations over a loaded expense document. The store wraps these
//! with the current date.

use chrono::{Datelike, Month};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseDocument, Money};

/// Total spending over a period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpendingSummary {
    /// Month filter (1-12), `None` for all time
    pub month: Option<u32>,
    /// Reference year used with the month filter
    pub year: i32,
    /// Sum of matching amounts
    pub total: Money,
    /// Number of matching expenses
    pub count: usize,
}

impl SpendingSummary {
    /// Compute the summary for a month of the given year
    ///
    /// `None` or `Some(0)` sums every expense regardless of year. A month
    /// above 12 is not rejected; it simply matches nothing. Month and year are
    /// read in the offset each expense was recorded with.
    pub fn generate(document: &ExpenseDocument, month: Option<i32>, year: i32) -> ExpenseResult<Self> {
        let month = match month {
            Some(m) if m < 0 => {
                return Err(ExpenseError::Validation(format!(
                    "Month number cannot be negative (got {})",
                    m
                )))
            }
            Some(0) | None => None,
            Some(m) => Some(m as u32),
        };

        let matching: Vec<Money> = document
            .expenses
            .iter()
            .filter(|e| match month {
                None => true,
                Some(m) => e.created_at.month() == m && e.created_at.year() == year,
            })
            .map(|e| e.amount)
            .collect();
        let count = matching.len();
        let total = Money::checked_sum(matching).ok_or_else(total_out_of_range)?;

        Ok(Self {
            month,
            year,
            total,
            count,
        })
    }

    /// English month name of the filter, if it names a real month
    pub fn month_name(&self) -> Option<&'static str> {
        self.month.and_then(month_name)
    }
}

/// All-time spending compared against the stored budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetUsage {
    pub spent: Money,
    pub budget: f64,
}

impl BudgetUsage {
    pub fn from_document(document: &ExpenseDocument) -> ExpenseResult<Self> {
        Ok(Self {
            spent: document.total().ok_or_else(total_out_of_range)?,
            budget: document.budget(),
        })
    }

    /// Spending has reached or passed the budget
    pub fn is_exceeded(&self) -> bool {
        self.spent.as_f64() >= self.budget
    }

    /// Warning text naming the given calendar month, when the budget is reached
    ///
    /// The comparison is all-time even though the message speaks of the month.
    pub fn warning(&self, current_month: u32) -> Option<String> {
        if !self.is_exceeded() {
            return None;
        }
        Some(format!(
            "Your current summarize expenses for this month: [{}] is exceeding your budget!!!",
            month_name(current_month).unwrap_or("unknown")
        ))
    }
}

fn total_out_of_range() -> ExpenseError {
    ExpenseError::Validation("Sum of expense amounts is out of range".into())
}

/// English name of a 1-based month number
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
}
