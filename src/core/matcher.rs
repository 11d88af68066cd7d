use validator::Validate;

use crate::core::{
    clustering::KMeans,
    error::MatchError,
    filters::passes_hard_filter,
    scoring::calculate_compatibility_score,
    vectorizer::{validate_profile, vectorize_pool},
};
use crate::models::{CompatibilityProfile, MatchConfig, MatchResult, ProfileRecord};

/// Tolerance when checking that scoring weights sum to one
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Result of the matching process
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub matches: Vec<MatchResult>,
    /// Candidates considered, the requester excluded
    pub total_candidates: usize,
    pub requester_cluster: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Vectorize the requester and every candidate
/// 2. Cluster all vectors with k-means
/// 3. Hard filter (self, mutual gender preference)
/// 4. Score survivors, rank by score then owner id
///
/// Holds only immutable configuration, so one instance can serve any number
/// of concurrent calls.
#[derive(Debug, Clone)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        validate_config(&config)?;
        Ok(Self { config })
    }

    pub fn with_default_config() -> Self {
        Self {
            config: MatchConfig::default(),
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Find matches for `requester` among stored records
    ///
    /// Every record, the requester's included, is validated first; an invalid
    /// record aborts the call with a validation error naming it.
    pub fn find_matches(
        &self,
        requester: &ProfileRecord,
        pool: &[ProfileRecord],
    ) -> Result<MatchOutcome, MatchError> {
        let requester = validate_profile(requester)?;
        let pool = pool
            .iter()
            .map(validate_profile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.rank(&requester, &pool))
    }

    /// Find matches for the owner of `owner_id`, whose record must be in `pool`
    pub fn find_matches_for(
        &self,
        owner_id: &str,
        pool: &[ProfileRecord],
    ) -> Result<MatchOutcome, MatchError> {
        let requester = pool
            .iter()
            .find(|record| record.owner_id == owner_id)
            .ok_or_else(|| MatchError::ProfileNotFound(owner_id.to_string()))?;

        self.find_matches(requester, pool)
    }

    /// Rank already validated profiles
    ///
    /// `pool` may contain the requester; it takes part in clustering once, as
    /// the requester, and never appears in the output.
    pub fn rank(
        &self,
        requester: &CompatibilityProfile,
        pool: &[CompatibilityProfile],
    ) -> MatchOutcome {
        let candidates: Vec<&CompatibilityProfile> = pool
            .iter()
            .filter(|profile| profile.owner_id != requester.owner_id)
            .collect();
        let total_candidates = candidates.len();

        // Stage 1 & 2: vectorize and cluster the whole pool
        let vectors = vectorize_pool(requester, &candidates);
        let clustering = KMeans::new(self.config.k, self.config.max_iterations).fit(&vectors);
        let requester_cluster = clustering.cluster_of(0);

        // Stage 3 & 4: hard filter, then score
        let mut matches: Vec<MatchResult> = candidates
            .iter()
            .enumerate()
            .filter(|(_, candidate)| passes_hard_filter(requester, candidate))
            .map(|(index, candidate)| {
                // Vector 0 is the requester
                let cluster_id = clustering.cluster_of(index + 1);
                let (compatibility_score, breakdown) = calculate_compatibility_score(
                    requester,
                    candidate,
                    cluster_id == requester_cluster,
                    &self.config.weights,
                );

                MatchResult {
                    owner_id: candidate.owner_id.clone(),
                    compatibility_score,
                    cluster_id,
                    breakdown,
                }
            })
            .collect();

        // Sort by score (descending) and then by owner id (ascending)
        matches.sort_by(|a, b| {
            b.compatibility_score
                .cmp(&a.compatibility_score)
                .then_with(|| a.owner_id.cmp(&b.owner_id))
        });

        if let Some(max_results) = self.config.max_results {
            matches.truncate(max_results);
        }

        tracing::debug!(
            "Ranked {} of {} candidates for {} (cluster {} of {})",
            matches.len(),
            total_candidates,
            requester.owner_id,
            requester_cluster,
            clustering.k
        );

        MatchOutcome {
            matches,
            total_candidates,
            requester_cluster,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_config()
    }
}

/// Check a configuration before it is used for matching
pub fn validate_config(config: &MatchConfig) -> Result<(), MatchError> {
    if let Err(errors) = config.validate() {
        return Err(MatchError::InvalidConfig(errors.to_string()));
    }

    let weights = &config.weights;
    let all = [weights.budget, weights.location, weights.habits, weights.cluster];
    if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(MatchError::InvalidConfig(format!(
            "weights must be non-negative, got {:?}",
            weights
        )));
    }
    if (weights.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(MatchError::InvalidConfig(format!(
            "weights must sum to 1.0, got {}",
            weights.sum()
        )));
    }

    Ok(())
}
