//! Record sources for Leadflow.
//!
//! This crate defines the [`RecordStore`] trait: an ordered collection of
//! homogeneous records addressed by id. It knows nothing about filtering,
//! sorting, or classification; the view engine in `leadflow-core` reads a
//! snapshot from a store and derives everything else from it.
//!
//! One implementation is provided:
//!
//! - [`MemoryStore`] — in-memory, seeded from JSON fixtures or built in code

mod error;
mod memory;

pub use error::StorageError;
pub use memory::MemoryStore;

/// A record that carries a stable identifier.
///
/// The id must not change over the record's lifetime; stores use it to
/// replace records in place.
pub trait Identified {
    /// The record's opaque unique identifier.
    fn id(&self) -> &str;
}

/// A pluggable source of records.
///
/// Stores preserve insertion order. That order is the "input order" the view
/// engine's stable sort falls back to on equal keys, so implementations must
/// never reorder records on read or on in-place replacement.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait RecordStore<R>: Send + Sync + 'static
where
    R: Identified + Clone + Send + Sync + 'static,
{
    /// Snapshot every record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the underlying source cannot be read.
    async fn all(&self) -> Result<Vec<R>, StorageError>;

    /// Retrieve one record by id.
    ///
    /// Returns `Ok(None)` if no record has that id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the underlying source cannot be read.
    async fn get(&self, id: &str) -> Result<Option<R>, StorageError>;

    /// Insert a record, replacing any existing record with the same id in
    /// place. New ids are appended at the end.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the underlying source rejects the write.
    async fn put(&self, record: R) -> Result<(), StorageError>;

    /// Delete a record. Idempotent: deleting an unknown id is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the underlying source rejects the write.
    async fn delete(&self, id: &str) -> Result<(), StorageError>;

    /// Number of records currently held.
    ///
    /// The default implementation snapshots via [`all`](RecordStore::all).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the underlying source cannot be read.
    async fn len(&self) -> Result<usize, StorageError> {
        Ok(self.all().await?.len())
    }
}
