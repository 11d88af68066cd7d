use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Gender of a profile owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(()),
        }
    }
}

/// Flatmate gender preference; `Any` is the "no preference" wildcard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PreferredGender {
    Any,
    Only(Gender),
}

impl PreferredGender {
    /// Whether a flatmate of `gender` satisfies this preference
    #[inline]
    pub fn accepts(&self, gender: Gender) -> bool {
        match self {
            PreferredGender::Any => true,
            PreferredGender::Only(wanted) => *wanted == gender,
        }
    }
}

impl fmt::Display for PreferredGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferredGender::Any => f.write_str("Any"),
            PreferredGender::Only(gender) => gender.fmt(f),
        }
    }
}

impl TryFrom<String> for PreferredGender {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value
            .parse()
            .map_err(|_| format!("unknown preferred gender '{}'", value))
    }
}

impl From<PreferredGender> for String {
    fn from(value: PreferredGender) -> Self {
        value.to_string()
    }
}

impl FromStr for PreferredGender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("any") {
            return Ok(PreferredGender::Any);
        }
        s.parse().map(PreferredGender::Only)
    }
}

/// Yes/No habit answer (smoking, pets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_f64(&self) -> f64 {
        match self {
            YesNo::Yes => 1.0,
            YesNo::No => 0.0,
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YesNo::Yes => f.write_str("Yes"),
            YesNo::No => f.write_str("No"),
        }
    }
}

impl FromStr for YesNo {
    type Err = ();

    // The profile form submits booleans for these, so accept both spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "true" => Ok(YesNo::Yes),
            "no" | "false" => Ok(YesNo::No),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SleepTime {
    Early,
    Late,
}

impl SleepTime {
    pub fn as_f64(&self) -> f64 {
        match self {
            SleepTime::Early => 0.0,
            SleepTime::Late => 1.0,
        }
    }
}

impl fmt::Display for SleepTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SleepTime::Early => f.write_str("Early"),
            SleepTime::Late => f.write_str("Late"),
        }
    }
}

impl FromStr for SleepTime {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "early" => Ok(SleepTime::Early),
            "late" => Ok(SleepTime::Late),
            _ => Err(()),
        }
    }
}

/// Ordered cleanliness level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Cleanliness {
    Low,
    Medium,
    High,
}

impl Cleanliness {
    /// Ordinal position on the [0, 1] scale
    pub fn ordinal(&self) -> f64 {
        match self {
            Cleanliness::Low => 0.0,
            Cleanliness::Medium => 0.5,
            Cleanliness::High => 1.0,
        }
    }
}

impl fmt::Display for Cleanliness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cleanliness::Low => f.write_str("Low"),
            Cleanliness::Medium => f.write_str("Medium"),
            Cleanliness::High => f.write_str("High"),
        }
    }
}

impl FromStr for Cleanliness {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Cleanliness::Low),
            "medium" => Ok(Cleanliness::Medium),
            "high" => Ok(Cleanliness::High),
            _ => Err(()),
        }
    }
}

/// Lifestyle habits of a profile owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habits {
    pub smoking: YesNo,
    pub pets: YesNo,
    pub sleep_time: SleepTime,
    pub cleanliness: Cleanliness,
}

/// A validated flatmate compatibility profile
///
/// Built from a [`ProfileRecord`](crate::models::ProfileRecord) by the
/// vectorizer; every structured field is guaranteed present and in-domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityProfile {
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    pub gender: Gender,
    #[serde(rename = "preferredGender")]
    pub preferred_gender: PreferredGender,
    pub budget: f64,
    #[serde(rename = "locationPreference")]
    pub location_preference: String,
    pub habits: Habits,
    pub bio: Option<String>,
}

/// Number of features in a [`FeatureVector`]
pub const FEATURE_COUNT: usize = 6;

/// Fixed-order numeric encoding of a profile:
/// `[budget_norm, location_match, smoking, pets, sleep_time, cleanliness]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    #[inline]
    pub fn budget_norm(&self) -> f64 {
        self.0[0]
    }
}

/// Per-component sub-scores, each on a 0-100 scale before weighting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub budget: f64,
    pub location: f64,
    pub habits: f64,
    pub cluster: f64,
}

/// One ranked candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: u8,
    #[serde(rename = "clusterId")]
    pub cluster_id: usize,
    pub breakdown: ScoreBreakdown,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub budget: f64,
    pub location: f64,
    pub habits: f64,
    pub cluster: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.budget + self.location + self.habits + self.cluster
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            budget: 0.25,
            location: 0.20,
            habits: 0.35,
            cluster: 0.20,
        }
    }
}

/// Per-call matching configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MatchConfig {
    #[validate(range(min = 1))]
    pub k: usize,
    #[validate(range(min = 1))]
    pub max_results: Option<usize>,
    #[validate(range(min = 1))]
    pub max_iterations: usize,
    pub weights: ScoringWeights,
}

pub const DEFAULT_K: usize = 3;
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            max_results: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            weights: ScoringWeights::default(),
        }
    }
}
