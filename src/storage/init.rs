//! Storage initialization
//!
//! Handles first-run setup: materializes an empty document for the configured
//! record shape when none exists yet.

use tracing::debug;

use crate::error::ExpenseError;
use crate::models::RecordShape;

use super::backend::DocumentBackend;
use super::codec::encode_document;

/// Create the empty document if the backend has none
///
/// Safe to call on every start; an existing document is never touched.
/// Returns whether a document was created.
pub fn initialize_document<B>(backend: &B, shape: RecordShape) -> Result<bool, ExpenseError>
where
    B: DocumentBackend + ?Sized,
{
    if backend.exists()? {
        return Ok(false);
    }

    let bytes = encode_document(&shape.empty_document())?;
    backend.write(&bytes)?;
    debug!(location = %backend.location(), ?shape, "created empty expense document");

    Ok(true)
}

/// Check if storage needs initialization
pub fn needs_initialization<B>(backend: &B) -> Result<bool, ExpenseError>
where
    B: DocumentBackend + ?Sized,
{
    Ok(!backend.exists()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::{FileBackend, MemoryBackend};
    use crate::storage::codec::decode_document;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("data").join("expenses.json"));

        assert!(needs_initialization(&backend).unwrap());
        assert!(initialize_document(&backend, RecordShape::Extended).unwrap());
        assert!(!needs_initialization(&backend).unwrap());

        let document = decode_document(&backend.read().unwrap()).unwrap();
        assert!(document.is_empty());
        assert_eq!(document.budget, Some(0.0));
    }

    #[test]
    fn test_minimal_shape_has_no_budget() {
        let backend = MemoryBackend::new();
        initialize_document(&backend, RecordShape::Minimal).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&backend.read().unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({"expenses": []}));
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let backend = MemoryBackend::with_content(r#"{"budget": 75, "expenses": []}"#);

        assert!(!initialize_document(&backend, RecordShape::Extended).unwrap());
        assert!(!initialize_document(&backend, RecordShape::Extended).unwrap());

        let document = decode_document(&backend.read().unwrap()).unwrap();
        assert_eq!(document.budget(), 75.0);
    }
}
