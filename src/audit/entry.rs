//! Audit log records
//!
//! One `AuditEntry` per change to the expense document: an expense being
//! recorded, revised or removed, or the budget being set.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Expense, ExpenseId};

use super::diff::generate_diff;

/// Fields left out of the change summary; they move on every revision
const VOLATILE_FIELDS: &[&str] = &["updatedAt"];

/// Kind of change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        })
    }
}

/// What a change applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Subject {
    Expense { id: ExpenseId },
    Budget,
}

impl Subject {
    /// The expense this subject refers to, if any
    pub fn expense_id(&self) -> Option<ExpenseId> {
        match self {
            Subject::Expense { id } => Some(*id),
            Subject::Budget => None,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Expense { id } => write!(f, "Expense {}", id),
            Subject::Budget => f.write_str("Budget"),
        }
    }
}

/// A single line of the audit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub subject: Subject,

    /// Expense description at the time of the change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,

    /// Field-level summary, e.g. `amount: 1200 -> 1500`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

impl AuditEntry {
    fn new(operation: Operation, subject: Subject) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            subject,
            label: None,
            before: None,
            after: None,
            changes: None,
        }
    }

    fn for_expense(operation: Operation, expense: &Expense) -> Self {
        let mut entry = Self::new(operation, Subject::Expense { id: expense.id });
        entry.label = Some(expense.description.clone()).filter(|d| !d.is_empty());
        entry
    }

    /// A newly recorded expense
    pub fn expense_created(expense: &Expense) -> Self {
        let mut entry = Self::for_expense(Operation::Create, expense);
        entry.after = snapshot(expense);
        entry
    }

    /// An expense replaced by its revision
    pub fn expense_updated(before: &Expense, after: &Expense) -> Self {
        let mut entry = Self::for_expense(Operation::Update, after);
        entry.before = snapshot(before);
        entry.after = snapshot(after);
        entry.changes = match (&entry.before, &entry.after) {
            (Some(before), Some(after)) => {
                generate_diff(&without_volatile(before), &without_volatile(after))
            }
            _ => None,
        };
        entry
    }

    /// An expense removed from the document
    pub fn expense_deleted(expense: &Expense) -> Self {
        let mut entry = Self::for_expense(Operation::Delete, expense);
        entry.before = snapshot(expense);
        entry
    }

    /// The budget overwritten
    pub fn budget_changed(previous: f64, current: f64) -> Self {
        let mut entry = Self::new(Operation::Update, Subject::Budget);
        entry.before = Some(Value::from(previous));
        entry.after = Some(Value::from(current));
        entry.changes = generate_diff(&Value::from(previous), &Value::from(current));
        entry
    }

    /// Whether this entry records a change to the given expense
    pub fn concerns(&self, id: ExpenseId) -> bool {
        self.subject.expense_id() == Some(id)
    }

    /// One or two lines for the history listing
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.subject
        );

        if let Some(label) = &self.label {
            output.push_str(&format!(" ({})", label));
        }

        if let Some(changes) = &self.changes {
            output.push_str(&format!("\n  Changes: {}", changes));
        }

        output
    }
}

fn snapshot(expense: &Expense) -> Option<Value> {
    serde_json::to_value(expense).ok()
}

fn without_volatile(value: &Value) -> Value {
    let mut value = value.clone();
    if let Value::Object(fields) = &mut value {
        for field in VOLATILE_FIELDS {
            fields.remove(*field);
        }
    }
    value
}
