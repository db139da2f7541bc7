//! Registration record storage.
//!
//! The service talks to storage through [`RegistrationStore`]; the
//! shipped implementation keeps everything in memory. Durable backends
//! would implement the same trait.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use udyam_types::{RegistrationId, RegistrationRecord};

/// Storage-level failures.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence seam for registration records.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Insert a freshly created record.
    async fn insert(&self, record: RegistrationRecord) -> StoreResult<()>;

    /// Fetch a record by identifier.
    async fn fetch(&self, id: &RegistrationId) -> StoreResult<Option<RegistrationRecord>>;

    /// Replace a record in place. Returns `false` when the identifier is
    /// unknown.
    async fn update(&self, record: RegistrationRecord) -> StoreResult<bool>;

    /// Remove a record. Returns `false` when the identifier is unknown.
    async fn remove(&self, id: &RegistrationId) -> StoreResult<bool>;
}

/// In-memory store for development and testing.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<RegistrationId, RegistrationRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RegistrationStore for InMemoryStore {
    async fn insert(&self, record: RegistrationRecord) -> StoreResult<()> {
        let mut records = self.records.write().await;
        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn fetch(&self, id: &RegistrationId) -> StoreResult<Option<RegistrationRecord>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn update(&self, record: RegistrationRecord) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        match records.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: &RegistrationId) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        Ok(records.remove(id).is_some())
    }
}
