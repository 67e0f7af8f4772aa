//! Encoding and decoding of the expense document
//!
//! The on-disk form is pretty-printed JSON. Decoding rejects documents that
//! parse but break the collection invariants.

use std::collections::HashSet;

use crate::error::ExpenseError;
use crate::models::ExpenseDocument;

/// Decode a document from raw bytes
pub fn decode_document(bytes: &[u8]) -> Result<ExpenseDocument, ExpenseError> {
    let document: ExpenseDocument = serde_json::from_slice(bytes)
        .map_err(|e| ExpenseError::Decode(format!("Invalid expense document: {}", e)))?;

    let mut seen = HashSet::with_capacity(document.expenses.len());
    for expense in &document.expenses {
        if !seen.insert(expense.id) {
            return Err(ExpenseError::Decode(format!(
                "Duplicate expense id {} in document",
                expense.id
            )));
        }
        if expense.amount.is_negative() {
            return Err(ExpenseError::Decode(format!(
                "Expense {} has a negative amount",
                expense.id
            )));
        }
    }

    if document.total().is_none() {
        return Err(ExpenseError::Decode(
            "Sum of expense amounts is out of range".into(),
        ));
    }

    Ok(document)
}

/// Encode a document for persistence
pub fn encode_document(document: &ExpenseDocument) -> Result<Vec<u8>, ExpenseError> {
    let mut bytes = serde_json::to_vec_pretty(document)
        .map_err(|e| ExpenseError::StorageWrite(format!("Failed to serialize document: {}", e)))?;
    bytes.push(b'\n');
    Ok(bytes)
}
