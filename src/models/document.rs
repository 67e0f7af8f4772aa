//! The persisted expense document
//!
//! One document holds the whole collection of expenses plus, in the extended
//! record shape, a spending budget. It is always read and written as a unit.

use serde::{Deserialize, Serialize};

use super::expense::{Expense, ExpensePayload};
use super::ids::ExpenseId;
use super::money::Money;

/// Which fields the persisted records carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordShape {
    /// `{"expenses": [...]}` with no category and no budget
    Minimal,
    /// `{"budget": n, "expenses": [...]}` with a category on every record
    #[default]
    Extended,
}

impl RecordShape {
    /// Whether this shape stores a budget
    pub fn has_budget(&self) -> bool {
        matches!(self, Self::Extended)
    }

    /// Bring a payload in line with the shape's category field
    pub fn normalize(&self, mut payload: ExpensePayload) -> ExpensePayload {
        payload.category = match self {
            Self::Minimal => None,
            Self::Extended => Some(payload.category.unwrap_or_default()),
        };
        payload
    }

    /// The document written on first run
    pub fn empty_document(&self) -> ExpenseDocument {
        ExpenseDocument {
            budget: self.has_budget().then_some(0.0),
            expenses: Vec::new(),
        }
    }
}

/// The full persisted unit: every expense plus the optional budget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDocument {
    /// Spending ceiling compared against total spend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,

    /// Expenses in insertion order
    pub expenses: Vec<Expense>,
}

impl ExpenseDocument {
    /// Budget value, zero when none is stored
    pub fn budget(&self) -> f64 {
        self.budget.unwrap_or(0.0)
    }

    /// Find an expense by id
    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Position of an expense by id
    pub fn position(&self, id: ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|e| e.id == id)
    }

    /// Id of the last expense in insertion order
    pub fn last_id(&self) -> Option<ExpenseId> {
        self.expenses.last().map(|e| e.id)
    }

    /// Highest id present in the collection
    pub fn max_id(&self) -> Option<ExpenseId> {
        self.expenses.iter().map(|e| e.id).max()
    }

    /// Sum of every expense amount, `None` if it does not fit in `Money`
    pub fn total(&self) -> Option<Money> {
        Money::checked_sum(self.expenses.iter().map(|e| e.amount))
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn expense(id: u64, amount: i64) -> Expense {
        Expense::new(
            ExpenseId::new(id),
            ExpensePayload::new(format!("item {}", id), Money::from_minor(amount)),
            Utc::now(),
        )
    }

    #[test]
    fn test_empty_documents() {
        let extended = serde_json::to_value(RecordShape::Extended.empty_document()).unwrap();
        assert_eq!(extended, serde_json::json!({"budget": 0.0, "expenses": []}));

        let minimal = serde_json::to_value(RecordShape::Minimal.empty_document()).unwrap();
        assert_eq!(minimal, serde_json::json!({"expenses": []}));
    }

    #[test]
    fn test_normalize_category() {
        let payload = ExpensePayload::new("Bread", Money::from_minor(300)).with_category("food");
        assert_eq!(RecordShape::Minimal.normalize(payload.clone()).category, None);
        assert_eq!(
            RecordShape::Extended.normalize(payload).category.as_deref(),
            Some("food")
        );

        let uncategorized = ExpensePayload::new("Misc", Money::from_minor(1));
        assert_eq!(
            RecordShape::Extended.normalize(uncategorized).category.as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_ids_and_total() {
        let doc = ExpenseDocument {
            budget: None,
            expenses: vec![expense(3, 100), expense(7, 200), expense(5, 300)],
        };
        assert_eq!(doc.last_id(), Some(ExpenseId::new(5)));
        assert_eq!(doc.max_id(), Some(ExpenseId::new(7)));
        assert_eq!(doc.total(), Some(Money::from_minor(600)));
        assert_eq!(doc.position(ExpenseId::new(7)), Some(1));
        assert!(doc.get(ExpenseId::new(4)).is_none());
        assert_eq!(doc.budget(), 0.0);
    }

    #[test]
    fn test_total_overflow_is_none() {
        let doc = ExpenseDocument {
            budget: None,
            expenses: vec![expense(1, i64::MAX), expense(2, 1)],
        };
        assert_eq!(doc.total(), None);
    }

    #[test]
    fn test_decode_go_style_document() {
        let json = r#"{
            "budget": 500,
            "expenses": [
                {
                    "id": 1,
                    "category": "food",
                    "description": "Groceries",
                    "amount": 4200,
                    "createdAt": "2025-01-15T10:30:00.123456+07:00",
                    "updatedAt": "2025-01-15T10:30:00.123456+07:00"
                }
            ]
        }"#;
        let doc: ExpenseDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.budget(), 500.0);
        assert_eq!(doc.len(), 1);
        assert!(doc.expenses[0].in_category("food"));
        assert_eq!(doc.expenses[0].amount, Money::from_minor(4200));
        assert_eq!(doc.expenses[0].created_at.offset().local_minus_utc(), 7 * 3600);
    }
}
