//! Expense display formatting
//!
//! Formats expenses, summaries and budget status for terminal output.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::{Expense, Money};
use crate::reports::{BudgetUsage, SpendingSummary};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl ExpenseRow {
    fn new(expense: &Expense, settings: &Settings) -> Self {
        Self {
            id: expense.id.value(),
            created: expense.created_at.format(&settings.date_format).to_string(),
            category: expense.category.clone().unwrap_or_default(),
            description: truncate(&expense.description, 40),
            amount: expense.amount.format_with_symbol(&settings.currency_symbol),
        }
    }
}

/// Format a list of expenses as a table
pub fn format_expense_list(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow::new(e, settings));
    let mut table = Table::new(rows);
    table.with(Style::psql());

    let total = Money::checked_sum(expenses.iter().map(|e| e.amount))
        .map(|t| t.format_with_symbol(&settings.currency_symbol))
        .unwrap_or_else(|| "out of range".to_string());
    format!("{}\n{} expense(s), total {}\n", table, expenses.len(), total)
}

/// Format a single expense for display
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    if let Some(category) = &expense.category {
        let category = if category.is_empty() { "(none)" } else { category };
        output.push_str(&format!("Category:    {}\n", category));
    }
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!(
        "Created:     {}\n",
        expense.created_at.format(&settings.date_format)
    ));
    output.push_str(&format!(
        "Updated:     {}\n",
        expense.updated_at.format(&settings.date_format)
    ));

    output
}

/// Format a spending summary line
pub fn format_summary(summary: &SpendingSummary, settings: &Settings) -> String {
    let total = summary.total.format_with_symbol(&settings.currency_symbol);
    match (summary.month, summary.month_name()) {
        (None, _) => format!("Total expenses: {} ({} expense(s))\n", total, summary.count),
        (Some(_), Some(name)) => format!(
            "Total expenses for {} {}: {} ({} expense(s))\n",
            name, summary.year, total, summary.count
        ),
        (Some(month), None) => format!(
            "Total expenses for month {} of {}: {} ({} expense(s))\n",
            month, summary.year, total, summary.count
        ),
    }
}

/// Format budget and spending side by side
pub fn format_budget_status(usage: &BudgetUsage, settings: &Settings) -> String {
    format!(
        "Budget: {}{:.2}  Spent: {}{}\n",
        settings.currency_symbol,
        usage.budget / 100.0,
        usage.spent.format_with_symbol(&settings.currency_symbol),
        if usage.is_exceeded() { "  (exceeded)" } else { "" }
    )
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
