//! Expense store
//!
//! Every operation reads the whole document from the backend, computes the
//! result, and for mutations writes the whole document back before returning.
//! Nothing is cached between operations; the backend is the source of truth.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseDocument, ExpenseId, ExpensePayload, Money, RecordShape};
use crate::reports::{BudgetUsage, SpendingSummary};
use crate::storage::{decode_document, encode_document, initialize_document, DocumentBackend};

/// How the next expense id is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IdStrategy {
    /// One past the highest id in the collection
    #[default]
    MaxPlusOne,
    /// One past the id of the last record in insertion order; deleting the
    /// tail record lets its id be handed out again
    FollowTail,
}

impl IdStrategy {
    /// `None` once the id space is used up
    pub fn next_id(&self, document: &ExpenseDocument) -> Option<ExpenseId> {
        let current = match self {
            Self::MaxPlusOne => document.max_id(),
            Self::FollowTail => document.last_id(),
        };
        match current {
            Some(id) => id.next(),
            None => Some(ExpenseId::FIRST),
        }
    }
}

/// Where an updated expense ends up in the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UpdatePlacement {
    /// Remove the old record and append the replacement
    #[default]
    MoveToTail,
    /// Replace the record at its current position
    InPlace,
}

/// Policies the store applies to every operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreOptions {
    pub shape: RecordShape,
    pub id_strategy: IdStrategy,
    pub update_placement: UpdatePlacement,
}

impl StoreOptions {
    pub fn new(shape: RecordShape) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    pub fn id_strategy(mut self, id_strategy: IdStrategy) -> Self {
        self.id_strategy = id_strategy;
        self
    }

    pub fn update_placement(mut self, update_placement: UpdatePlacement) -> Self {
        self.update_placement = update_placement;
        self
    }
}

/// Persistent store for the expense document
pub struct ExpenseStore<B> {
    backend: B,
    options: StoreOptions,
    audit: Option<AuditLogger>,
}

impl<B: DocumentBackend> ExpenseStore<B> {
    /// Create a store over the given backend
    pub fn new(backend: B, options: StoreOptions) -> Self {
        Self {
            backend,
            options,
            audit: None,
        }
    }

    /// Record every mutation in the given audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Create the empty document if none exists yet
    pub fn initialize(&self) -> ExpenseResult<()> {
        initialize_document(&self.backend, self.options.shape)?;
        Ok(())
    }

    /// Read and decode the current document
    pub fn load(&self) -> ExpenseResult<ExpenseDocument> {
        let bytes = self.backend.read()?;
        decode_document(&bytes)
    }

    /// Append a new expense
    pub fn insert(&self, payload: ExpensePayload) -> ExpenseResult<ExpenseDocument> {
        validate(&payload)?;
        let payload = self.options.shape.normalize(payload);

        let mut document = self.load()?;
        let id = self.options.id_strategy.next_id(&document).ok_or_else(|| {
            ExpenseError::Validation("No expense ids left in this document".into())
        })?;
        let expense = Expense::new(id, payload, Local::now());
        document.expenses.push(expense.clone());
        check_total(&document)?;

        self.persist(&document)?;
        debug!(id = %id, amount = expense.amount.minor(), "inserted expense");

        self.audit(|| AuditEntry::expense_created(&expense));

        Ok(document)
    }

    /// Replace an expense's category, description and amount
    pub fn update(&self, id: ExpenseId, payload: ExpensePayload) -> ExpenseResult<ExpenseDocument> {
        validate(&payload)?;
        let payload = self.options.shape.normalize(payload);

        let mut document = self.load()?;
        let index = document
            .position(id)
            .ok_or_else(|| ExpenseError::expense_not_found(id))?;

        let replacement = document.expenses[index].revised(payload, Local::now());
        let original = match self.options.update_placement {
            UpdatePlacement::MoveToTail => {
                let original = document.expenses.remove(index);
                document.expenses.push(replacement.clone());
                original
            }
            UpdatePlacement::InPlace => {
                std::mem::replace(&mut document.expenses[index], replacement.clone())
            }
        };
        check_total(&document)?;

        self.persist(&document)?;
        debug!(id = %id, placement = ?self.options.update_placement, "updated expense");

        self.audit(|| AuditEntry::expense_updated(&original, &replacement));

        Ok(document)
    }

    /// Remove an expense, keeping the order of the rest
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<ExpenseDocument> {
        let mut document = self.load()?;
        let index = document
            .position(id)
            .ok_or_else(|| ExpenseError::expense_not_found(id))?;
        let removed = document.expenses.remove(index);

        self.persist(&document)?;
        debug!(id = %id, "deleted expense");

        self.audit(|| AuditEntry::expense_deleted(&removed));

        Ok(document)
    }

    /// Look up a single expense
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        self.load()?
            .get(id)
            .cloned()
            .ok_or_else(|| ExpenseError::expense_not_found(id))
    }

    /// Every expense in insertion order
    pub fn list_all(&self) -> ExpenseResult<Vec<Expense>> {
        Ok(self.load()?.expenses)
    }

    /// Expenses in the given category, in insertion order
    pub fn list_by_category(&self, category: &str) -> ExpenseResult<Vec<Expense>> {
        let mut expenses = self.load()?.expenses;
        expenses.retain(|e| e.in_category(category));
        Ok(expenses)
    }

    /// Total spending for a month of the current year, or all time for `None`/0
    pub fn summary(&self, month: Option<i32>) -> ExpenseResult<Money> {
        Ok(self.summary_for_year(month, Local::now().year())?.total)
    }

    /// Like `summary`, against an explicit reference year
    pub fn summary_for_year(&self, month: Option<i32>, year: i32) -> ExpenseResult<SpendingSummary> {
        if let Some(m) = month.filter(|m| *m < 0) {
            return Err(ExpenseError::Validation(format!(
                "Month number cannot be negative (got {})",
                m
            )));
        }
        SpendingSummary::generate(&self.load()?, month, year)
    }

    /// Warning when all-time spending has reached the budget
    pub fn check_budget_usage(&self) -> ExpenseResult<Option<String>> {
        if !self.options.shape.has_budget() {
            return Ok(None);
        }

        let usage = BudgetUsage::from_document(&self.load()?)?;
        let warning = usage.warning(Local::now().month());
        if warning.is_some() {
            info!(spent = usage.spent.minor(), budget = usage.budget, "budget reached");
        }
        Ok(warning)
    }

    /// Overwrite the stored budget
    pub fn set_budget(&self, amount: f64) -> ExpenseResult<ExpenseDocument> {
        if !self.options.shape.has_budget() {
            return Err(ExpenseError::Validation(
                "Budgets require the extended record shape".into(),
            ));
        }

        let mut document = self.load()?;
        let previous = document.budget();
        document.budget = Some(amount);

        self.persist(&document)?;
        debug!(previous, amount, "set budget");

        self.audit(|| AuditEntry::budget_changed(previous, amount));

        Ok(document)
    }

    fn persist(&self, document: &ExpenseDocument) -> ExpenseResult<()> {
        let bytes = encode_document(document)?;
        self.backend.write(&bytes)
    }

    /// Append to the audit log after a successful persist
    ///
    /// Failures are logged and do not fail the mutation.
    fn audit(&self, entry: impl FnOnce() -> AuditEntry) {
        if let Some(logger) = &self.audit {
            let entry = entry();
            if let Err(e) = logger.log(&entry) {
                warn!(
                    error = %e,
                    path = %logger.path().display(),
                    subject = %entry.subject,
                    "audit log write failed"
                );
            }
        }
    }
}

fn validate(payload: &ExpensePayload) -> ExpenseResult<()> {
    payload
        .validate()
        .map_err(|e| ExpenseError::Validation(e.to_string()))
}

fn check_total(document: &ExpenseDocument) -> ExpenseResult<()> {
    match document.total() {
        Some(_) => Ok(()),
        None => Err(ExpenseError::Validation(
            "Amount would push the total of all expenses out of range".into(),
        )),
    }
}
