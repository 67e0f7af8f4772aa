//! Expense model
//!
//! A single tracked spending entry and the payload used to create or
//! replace one.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Store-assigned identifier
    pub id: ExpenseId,

    /// Category label; only present in the extended record shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Amount in minor units, never negative once stored
    pub amount: Money,

    /// When the expense was recorded, in the recorder's UTC offset
    pub created_at: DateTime<FixedOffset>,

    /// When the expense was last modified
    pub updated_at: DateTime<FixedOffset>,
}

impl Expense {
    /// Build a fresh record from a payload
    pub fn new(id: ExpenseId, payload: ExpensePayload, now: impl Into<DateTime<FixedOffset>>) -> Self {
        let now = now.into();
        Self {
            id,
            category: payload.category,
            description: payload.description,
            amount: payload.amount,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build the replacement for this record, keeping its id and creation time
    ///
    /// `updated_at` is bumped past the previous value if the clock has not
    /// moved since the last write.
    pub fn revised(&self, payload: ExpensePayload, now: impl Into<DateTime<FixedOffset>>) -> Self {
        let now = now.into();
        let updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + chrono::Duration::microseconds(1)
        };

        Self {
            id: self.id,
            category: payload.category,
            description: payload.description,
            amount: payload.amount,
            created_at: self.created_at,
            updated_at,
        }
    }

    /// Check whether the record belongs to the given category
    pub fn in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {}",
            self.id,
            self.created_at.format("%Y-%m-%d"),
            self.amount
        )?;
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            write!(f, " [{}]", category)?;
        }
        if !self.description.is_empty() {
            write!(f, " {}", self.description)?;
        }
        Ok(())
    }
}

/// Input for inserting or replacing an expense
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpensePayload {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: String,
    pub amount: Money,
}

impl ExpensePayload {
    /// Create a payload without a category
    pub fn new(description: impl Into<String>, amount: Money) -> Self {
        Self {
            category: None,
            description: description.into(),
            amount,
        }
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Validate the payload
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }
        Ok(())
    }
}

/// Validation errors for expense payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Amount cannot be negative (got {})", amount.minor())
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_new_expense() {
        let payload = ExpensePayload::new("Lunch", Money::from_minor(1200)).with_category("food");
        let expense = Expense::new(ExpenseId::FIRST, payload, at(1_000));

        assert_eq!(expense.id, ExpenseId::FIRST);
        assert_eq!(expense.category.as_deref(), Some("food"));
        assert_eq!(expense.created_at, expense.updated_at);
        assert!(expense.in_category("food"));
        assert!(!expense.in_category("rent"));
    }

    #[test]
    fn test_revised_keeps_identity() {
        let original = Expense::new(
            ExpenseId::new(2),
            ExpensePayload::new("Lunch", Money::from_minor(1200)),
            at(1_000),
        );
        let revised = original.revised(ExpensePayload::new("Dinner", Money::from_minor(3000)), at(2_000));

        assert_eq!(revised.id, original.id);
        assert_eq!(revised.created_at, original.created_at);
        assert_eq!(revised.updated_at, at(2_000));
        assert_eq!(revised.description, "Dinner");
    }

    #[test]
    fn test_revised_with_stalled_clock_still_advances() {
        let original = Expense::new(
            ExpenseId::FIRST,
            ExpensePayload::new("Coffee", Money::from_minor(300)),
            at(5_000),
        );
        let revised = original.revised(ExpensePayload::new("Tea", Money::from_minor(250)), at(4_000));
        assert!(revised.updated_at > original.updated_at);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let payload = ExpensePayload::new("Refund", Money::from_minor(-1));
        assert_eq!(
            payload.validate(),
            Err(ExpenseValidationError::NegativeAmount(Money::from_minor(-1)))
        );
        assert!(ExpensePayload::new("Free", Money::zero()).validate().is_ok());
    }

    #[test]
    fn test_camel_case_serialization() {
        let expense = Expense::new(
            ExpenseId::FIRST,
            ExpensePayload::new("Bus", Money::from_minor(275)),
            at(0),
        );
        let json = serde_json::to_value(&expense).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("category").is_none());
    }
}
