//! In-memory record store.
//!
//! Records live in a `Vec` behind a `RwLock`, so insertion order is the
//! storage order. Nothing is persisted; the store is rebuilt from fixtures
//! on every start, which is all the dashboards need.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::{Identified, RecordStore, StorageError};

/// An insertion-ordered in-memory record store.
///
/// Cloning is cheap and clones share state, so one store can be handed to
/// every handler that reads or mutates the same collection.
///
/// # Examples
///
/// ```
/// # use leadflow_storage::{Identified, MemoryStore, RecordStore};
/// #[derive(Clone)]
/// struct Row(String);
/// impl Identified for Row {
///     fn id(&self) -> &str { &self.0 }
/// }
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// store.put(Row("c_1".to_owned())).await.unwrap();
/// assert_eq!(store.all().await.unwrap().len(), 1);
/// # }
/// ```
#[derive(Debug)]
pub struct MemoryStore<R> {
    records: Arc<RwLock<Vec<R>>>,
}

impl<R> Clone for MemoryStore<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<R> MemoryStore<R> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a store holding `records` in the given order.
    #[must_use]
    pub fn with_records(records: Vec<R>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

impl<R: DeserializeOwned> MemoryStore<R> {
    /// Seed a store from a JSON array.
    ///
    /// `collection` only labels errors.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Decode`] if `json` is not an array of `R`.
    pub fn from_json(collection: &str, json: &str) -> Result<Self, StorageError> {
        let records: Vec<R> =
            serde_json::from_str(json).map_err(|e| StorageError::Decode {
                collection: collection.to_owned(),
                reason: e.to_string(),
            })?;
        tracing::debug!(collection, count = records.len(), "seeded record store");
        Ok(Self::with_records(records))
    }

    /// Seed a store from a JSON fixture file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the file cannot be read and
    /// [`StorageError::Decode`] if its contents are not an array of `R`.
    pub async fn from_json_file(
        collection: &str,
        path: impl AsRef<Path>,
    ) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StorageError::Open {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Self::from_json(collection, &json)
    }
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<R> RecordStore<R> for MemoryStore<R>
where
    R: Identified + Clone + Send + Sync + 'static,
{
    async fn all(&self) -> Result<Vec<R>, StorageError> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<R>, StorageError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn put(&self, record: R) -> Result<(), StorageError> {
        if record.id().is_empty() {
            return Err(StorageError::Write {
                id: String::new(),
                reason: "record id must not be empty".to_owned(),
            });
        }

        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => *slot = record,
            None => records.push(record),
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.records.write().await.retain(|r| r.id() != id);
        Ok(())
    }

    async fn len(&self) -> Result<usize, StorageError> {
        Ok(self.records.read().await.len())
    }
}
