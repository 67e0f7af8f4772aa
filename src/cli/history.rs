//! Audit history command

use crate::audit::AuditLogger;
use crate::error::ExpenseResult;
use crate::models::ExpenseId;

/// Print the most recent audit entries, optionally only those for one expense
pub fn handle_history_command(
    logger: &AuditLogger,
    limit: usize,
    expense: Option<ExpenseId>,
) -> ExpenseResult<()> {
    let entries = match expense {
        Some(id) => {
            let mut entries = logger.read_all()?;
            entries.retain(|entry| entry.concerns(id));
            let start = entries.len().saturating_sub(limit);
            entries.split_off(start)
        }
        None => logger.read_recent(limit)?,
    };

    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
