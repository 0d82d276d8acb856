//! Seed data for the record stores.
//!
//! Stores are filled from `LEADFLOW_FIXTURES_DIR` when it is set, otherwise
//! from the demo fixtures compiled into the binary. File order becomes the
//! stores' insertion order.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use leadflow_core::Identified;
use leadflow_core::models::{Campaign, Client, ClientRequest, Domain, Meeting};
use leadflow_storage::{MemoryStore, StorageError};

use crate::state::Stores;

const CLIENTS: &str = include_str!("../fixtures/clients.json");
const CAMPAIGNS: &str = include_str!("../fixtures/campaigns.json");
const DOMAINS: &str = include_str!("../fixtures/domains.json");
const MEETINGS: &str = include_str!("../fixtures/meetings.json");
const REQUESTS: &str = include_str!("../fixtures/requests.json");

impl Stores {
    /// Stores filled with the built-in demo data.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Decode`] if a built-in fixture is malformed.
    pub fn builtin() -> Result<Self, StorageError> {
        Ok(Self {
            clients: Arc::new(MemoryStore::<Client>::from_json("clients", CLIENTS)?),
            campaigns: Arc::new(MemoryStore::<Campaign>::from_json("campaigns", CAMPAIGNS)?),
            domains: Arc::new(MemoryStore::<Domain>::from_json("domains", DOMAINS)?),
            meetings: Arc::new(MemoryStore::<Meeting>::from_json("meetings", MEETINGS)?),
            requests: Arc::new(MemoryStore::<ClientRequest>::from_json("requests", REQUESTS)?),
        })
    }

    /// Stores filled from `<dir>/<collection>.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] for a missing file and
    /// [`StorageError::Decode`] for a malformed one.
    pub async fn from_dir(dir: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            clients: Arc::new(load::<Client>(dir, "clients").await?),
            campaigns: Arc::new(load::<Campaign>(dir, "campaigns").await?),
            domains: Arc::new(load::<Domain>(dir, "domains").await?),
            meetings: Arc::new(load::<Meeting>(dir, "meetings").await?),
            requests: Arc::new(load::<ClientRequest>(dir, "requests").await?),
        })
    }
}

async fn load<R>(dir: &Path, collection: &str) -> Result<MemoryStore<R>, StorageError>
where
    R: DeserializeOwned + Identified + Clone + Send + Sync + 'static,
{
    let path = dir.join(format!("{collection}.json"));
    MemoryStore::from_json_file(collection, &path).await
}
