use thiserror::Error;

use crate::core::{validate_profile, MatchError, Matcher};
use crate::models::{FindMatchesResponse, ProfileRecord};
use crate::services::store::{ProfileStore, StoreError};

/// Errors surfaced by [`MatchService`]
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("Profile store error: {0}")]
    Store(#[from] StoreError),
}

/// Runs the matching engine against a profile store
///
/// A match request reads the store once, so the requester and the pool come
/// from the same snapshot. Store failures propagate unchanged and are never
/// retried here.
pub struct MatchService<S> {
    store: S,
    matcher: Matcher,
}

impl<S: ProfileStore> MatchService<S> {
    pub fn new(store: S, matcher: Matcher) -> Self {
        Self { store, matcher }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Find ranked flatmate matches for `owner_id`
    pub async fn find_matches(&self, owner_id: &str) -> Result<FindMatchesResponse, ServiceError> {
        tracing::info!("Finding flatmate matches for {}", owner_id);

        let profiles = self.store.snapshot().await?;

        let outcome = self
            .matcher
            .find_matches_for(owner_id, &profiles)
            .map_err(|e| {
                tracing::warn!("Matching failed for {}: {}", owner_id, e);
                e
            })?;

        tracing::info!(
            "Returning {} matches for {} (from {} candidates)",
            outcome.matches.len(),
            owner_id,
            outcome.total_candidates
        );

        Ok(FindMatchesResponse {
            matches: outcome.matches,
            total_candidates: outcome.total_candidates,
            requester_cluster: outcome.requester_cluster,
        })
    }

    /// Fetch an owner's stored profile
    pub async fn get_profile(&self, owner_id: &str) -> Result<ProfileRecord, ServiceError> {
        self.store
            .get_profile(owner_id)
            .await?
            .ok_or_else(|| MatchError::ProfileNotFound(owner_id.to_string()).into())
    }

    /// Validate and store a profile, replacing any previous one
    pub async fn save_profile(&self, record: &ProfileRecord) -> Result<ProfileRecord, ServiceError> {
        let profile = validate_profile(record)?;
        let saved = self.store.upsert_profile(&profile).await?;

        tracing::info!("Saved flatmate profile for {}", saved.owner_id);

        Ok(saved)
    }
}
