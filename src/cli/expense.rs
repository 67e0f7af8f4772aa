//! Expense CLI commands
//!
//! Parses command arguments into store payloads, runs one store operation per
//! command and prints the result.

use chrono::{Datelike, Local};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{
    format_budget_status, format_expense_details, format_expense_list, format_summary,
};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseId, ExpensePayload, Money};
use crate::reports::{month_name, BudgetUsage};
use crate::services::ExpenseStore;
use crate::storage::DocumentBackend;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        #[arg(short, long, default_value = "")]
        description: String,
        /// Amount in minor units, e.g. 1250 for 12.50 (decimals are refused)
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,
        /// Category label
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Replace an expense's description, amount and category
    Update {
        /// Expense ID
        #[arg(short, long)]
        id: ExpenseId,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Amount in minor units, e.g. 1250 for 12.50 (decimals are refused)
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        #[arg(short, long)]
        id: ExpenseId,
    },
    /// List expenses
    List {
        /// Only show expenses in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show a single expense
    Show {
        /// Expense ID
        #[arg(short, long)]
        id: ExpenseId,
    },
    /// Show total spending
    Summary {
        /// Month of the current year (1-12); 0 or omitted for all time
        #[arg(short, long, allow_hyphen_values = true)]
        month: Option<i32>,
    },
    /// Set the spending budget
    SetBudget {
        /// Budget in the same units as expense amounts
        #[arg(short, long, allow_hyphen_values = true)]
        amount: f64,
        /// Month the budget is meant for (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,
        /// Year the budget is meant for (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
}

/// Handle an expense command
pub fn handle_expense_command<B: DocumentBackend>(
    store: &ExpenseStore<B>,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
        } => {
            let payload = build_payload(description, &amount, category)?;
            let document = store.insert(payload)?;
            print_budget_warning(store)?;

            if let Some(expense) = document.expenses.last() {
                println!("Added expense {}", expense.id);
                print!("{}", format_expense_details(expense, settings));
            }
        }

        ExpenseCommands::Update {
            id,
            description,
            amount,
            category,
        } => {
            let payload = build_payload(description, &amount, category)?;
            let document = store.update(id, payload)?;
            print_budget_warning(store)?;

            let expense = document
                .get(id)
                .ok_or_else(|| ExpenseError::expense_not_found(id))?;
            println!("Updated expense {}", id);
            print!("{}", format_expense_details(expense, settings));
        }

        ExpenseCommands::Delete { id } => {
            let document = store.delete(id)?;
            println!(
                "Deleted expense {} ({} remaining)",
                id,
                document.expenses.len()
            );
        }

        ExpenseCommands::List { category } => {
            let expenses = match category.as_deref() {
                Some(category) => store.list_by_category(category)?,
                None => store.list_all()?,
            };
            print!("{}", format_expense_list(&expenses, settings));
        }

        ExpenseCommands::Show { id } => {
            let expense = store.get(id)?;
            print!("{}", format_expense_details(&expense, settings));
        }

        ExpenseCommands::Summary { month } => {
            let summary = store.summary_for_year(month, Local::now().year())?;
            print!("{}", format_summary(&summary, settings));
        }

        ExpenseCommands::SetBudget {
            amount,
            month,
            year,
        } => {
            let today = Local::now();
            let month = month.unwrap_or_else(|| today.month());
            let year = year.unwrap_or_else(|| today.year());

            let document = store.set_budget(amount)?;
            println!(
                "Set budget limit to {} for {} {}",
                amount,
                month_name(month).unwrap_or("(unknown month)"),
                year
            );
            let usage = BudgetUsage::from_document(&document)?;
            print!("{}", format_budget_status(&usage, settings));
        }
    }

    Ok(())
}

fn build_payload(
    description: String,
    amount: &str,
    category: Option<String>,
) -> ExpenseResult<ExpensePayload> {
    let amount = Money::parse(amount).map_err(|e| {
        ExpenseError::Validation(format!(
            "Invalid amount '{}': {}",
            amount, e
        ))
    })?;

    let mut payload = ExpensePayload::new(description, amount);
    payload.category = category;
    Ok(payload)
}

fn print_budget_warning<B: DocumentBackend>(store: &ExpenseStore<B>) -> ExpenseResult<()> {
    if let Some(warning) = store.check_budget_usage()? {
        println!("Warning: {}", warning);
    }
    Ok(())
}
