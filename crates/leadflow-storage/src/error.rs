//! Storage error types.
//!
//! Every variant carries the collection or path involved so a failure can be
//! traced back to its fixture without a debugger.

/// Errors that can occur while loading or mutating a record store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to open a fixture file.
    #[error("failed to open fixtures at '{path}': {reason}")]
    Open { path: String, reason: String },

    /// Fixture contents were not a JSON array of the expected record shape.
    #[error("failed to decode {collection} records: {reason}")]
    Decode { collection: String, reason: String },

    /// A write was rejected.
    #[error("failed to write record '{id}': {reason}")]
    Write { id: String, reason: String },
}
