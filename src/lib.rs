//! Flatmate Match - compatibility matching engine for the FlatScout marketplace
//!
//! Ranks candidate flatmate profiles for a requester. The pipeline vectorizes
//! every profile, groups the pool with deterministic k-means, drops candidates
//! that fail the mutual gender-preference filter, and blends budget, location,
//! habit and cluster agreement into a 0-100 score.
//!
//! The engine in [`core`] is pure and synchronous. Persistence lives behind
//! the [`services::ProfileStore`] trait.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{MatchError, MatchOutcome, Matcher};
pub use models::{
    CompatibilityProfile, FindMatchesResponse, MatchConfig, MatchResult, ProfileRecord,
    ScoringWeights,
};
