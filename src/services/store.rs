use std::collections::BTreeMap;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{CompatibilityProfile, ProfileRecord};

/// Errors that can occur when reading or writing profiles
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Persistence for one compatibility profile per owner
///
/// The matching engine only ever reads through this trait; writes are full
/// overwrites of the owner's profile.
#[allow(async_fn_in_trait)]
pub trait ProfileStore {
    /// Fetch the profile owned by `owner_id`, if any
    async fn get_profile(&self, owner_id: &str) -> Result<Option<ProfileRecord>, StoreError>;

    /// Create or replace the owner's profile
    async fn upsert_profile(
        &self,
        profile: &CompatibilityProfile,
    ) -> Result<ProfileRecord, StoreError>;

    /// Every profile except the requester's own, ordered by owner id
    async fn candidate_pool(&self, requester_owner_id: &str)
        -> Result<Vec<ProfileRecord>, StoreError>;

    /// Every stored profile in a single read, ordered by owner id
    async fn snapshot(&self) -> Result<Vec<ProfileRecord>, StoreError>;
}

/// In-process profile store
///
/// Keyed by owner id, so iteration order is owner id order.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<BTreeMap<String, ProfileRecord>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with raw records
    ///
    /// Records are kept as-is, which lets callers seed legacy or incomplete
    /// data that the engine will reject at match time.
    pub fn with_records(records: impl IntoIterator<Item = ProfileRecord>) -> Self {
        let profiles = records
            .into_iter()
            .map(|record| (record.owner_id.clone(), record))
            .collect();
        Self {
            profiles: RwLock::new(profiles),
        }
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }
}

impl ProfileStore for MemoryProfileStore {
    async fn get_profile(&self, owner_id: &str) -> Result<Option<ProfileRecord>, StoreError> {
        Ok(self.profiles.read().await.get(owner_id).cloned())
    }

    async fn upsert_profile(
        &self,
        profile: &CompatibilityProfile,
    ) -> Result<ProfileRecord, StoreError> {
        let record = ProfileRecord::from(profile);
        self.profiles
            .write()
            .await
            .insert(record.owner_id.clone(), record.clone());
        Ok(record)
    }

    async fn candidate_pool(
        &self,
        requester_owner_id: &str,
    ) -> Result<Vec<ProfileRecord>, StoreError> {
        Ok(self
            .profiles
            .read()
            .await
            .values()
            .filter(|record| record.owner_id != requester_owner_id)
            .cloned()
            .collect())
    }

    async fn snapshot(&self) -> Result<Vec<ProfileRecord>, StoreError> {
        Ok(self.profiles.read().await.values().cloned().collect())
    }
}
