// Core algorithm exports
pub mod clustering;
pub mod distance;
pub mod error;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod vectorizer;

pub use clustering::{Clustering, KMeans};
pub use distance::{nearest_centroid, same_location, squared_euclidean};
pub use error::MatchError;
pub use filters::{mutually_acceptable, passes_hard_filter};
pub use matcher::{validate_config, MatchOutcome, Matcher};
pub use scoring::calculate_compatibility_score;
pub use vectorizer::{validate_profile, vectorize, vectorize_pool, BudgetRange};
