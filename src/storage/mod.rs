//! Storage layer for the expense tracker
//!
//! Provides whole-document storage behind the `DocumentBackend` trait, JSON
//! encoding of the expense document, atomic file writes, and first-run
//! initialization.

pub mod backend;
pub mod codec;
pub mod file_io;
pub mod init;

pub use backend::{DocumentBackend, FileBackend, MemoryBackend};
pub use codec::{decode_document, encode_document};
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_document, needs_initialization};
