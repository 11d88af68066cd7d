// Model exports
pub mod domain;
pub mod records;
pub mod responses;

pub use domain::{
    Cleanliness, CompatibilityProfile, FeatureVector, Gender, Habits, MatchConfig, MatchResult,
    PreferredGender, ScoreBreakdown, ScoringWeights, SleepTime, YesNo, FEATURE_COUNT,
};
pub use records::{HabitsRecord, ProfileRecord};
pub use responses::FindMatchesResponse;
