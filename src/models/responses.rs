use serde::{Deserialize, Serialize};
use crate::models::domain::MatchResult;

/// Response for a find matches call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<MatchResult>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "requesterCluster")]
    pub requester_cluster: usize,
}
