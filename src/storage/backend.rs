//! Storage handles for the expense document
//!
//! The store never touches a path directly; it is handed a backend that can
//! say whether the document exists and read or replace it whole.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::ExpenseError;

use super::file_io::{file_exists, read_bytes, write_bytes_atomic};

/// Whole-document storage used by the expense store
pub trait DocumentBackend {
    /// Whether the document has been created
    fn exists(&self) -> Result<bool, ExpenseError>;

    /// Read the full document bytes
    fn read(&self) -> Result<Vec<u8>, ExpenseError>;

    /// Replace the full document
    fn write(&self, bytes: &[u8]) -> Result<(), ExpenseError>;

    /// Human-readable location, for messages
    fn location(&self) -> String;
}

/// Document stored as a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentBackend for FileBackend {
    fn exists(&self) -> Result<bool, ExpenseError> {
        file_exists(&self.path)
    }

    fn read(&self) -> Result<Vec<u8>, ExpenseError> {
        read_bytes(&self.path)
    }

    fn write(&self, bytes: &[u8]) -> Result<(), ExpenseError> {
        write_bytes_atomic(&self.path, bytes)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Document held in memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    bytes: RwLock<Option<Vec<u8>>>,
}

impl MemoryBackend {
    /// Create an empty backend with no document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that already holds the given content
    pub fn with_content(content: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: RwLock::new(Some(content.into())),
        }
    }

    /// Snapshot of the current content
    pub fn content(&self) -> Result<Option<Vec<u8>>, ExpenseError> {
        let bytes = self.bytes.read().map_err(|e| {
            ExpenseError::StorageRead(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(bytes.clone())
    }
}

impl DocumentBackend for MemoryBackend {
    fn exists(&self) -> Result<bool, ExpenseError> {
        let bytes = self.bytes.read().map_err(|e| {
            ExpenseError::StorageAccess(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(bytes.is_some())
    }

    fn read(&self) -> Result<Vec<u8>, ExpenseError> {
        self.content()?
            .ok_or_else(|| ExpenseError::StorageRead("In-memory document not initialized".into()))
    }

    fn write(&self, content: &[u8]) -> Result<(), ExpenseError> {
        let mut bytes = self.bytes.write().map_err(|e| {
            ExpenseError::StorageWrite(format!("Failed to acquire write lock: {}", e))
        })?;
        *bytes = Some(content.to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
