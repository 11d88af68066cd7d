use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::models::domain::CompatibilityProfile;

/// A Yes/No answer as submitted: the profile form sends JSON booleans
#[derive(Deserialize)]
#[serde(untagged)]
enum YesNoInput {
    Flag(bool),
    Text(String),
}

fn deserialize_yes_no<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<YesNoInput>::deserialize(deserializer)?.map(|input| match input {
        YesNoInput::Flag(true) => "Yes".to_string(),
        YesNoInput::Flag(false) => "No".to_string(),
        YesNoInput::Text(text) => text,
    }))
}

/// Stored habits sub-record, categorical values kept as raw strings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitsRecord {
    #[serde(default, deserialize_with = "deserialize_yes_no")]
    pub smoking: Option<String>,
    #[serde(default, deserialize_with = "deserialize_yes_no")]
    pub pets: Option<String>,
    #[serde(rename = "sleepTime", default)]
    pub sleep_time: Option<String>,
    #[serde(default)]
    pub cleanliness: Option<String>,
}

/// Flatmate profile as held by the profile store
///
/// Structured fields are optional here so that incomplete records can be
/// reported field by field instead of failing deserialization wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProfileRecord {
    #[validate(length(min = 1))]
    #[serde(rename = "ownerId", alias = "userId")]
    pub owner_id: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "preferredGender", default)]
    pub preferred_gender: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(rename = "locationPreference", default)]
    pub location_preference: Option<String>,
    #[serde(default)]
    pub habits: Option<HabitsRecord>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl From<&CompatibilityProfile> for ProfileRecord {
    fn from(profile: &CompatibilityProfile) -> Self {
        Self {
            owner_id: profile.owner_id.clone(),
            gender: Some(profile.gender.to_string()),
            preferred_gender: Some(profile.preferred_gender.to_string()),
            budget: Some(profile.budget),
            location_preference: Some(profile.location_preference.clone()),
            habits: Some(HabitsRecord {
                smoking: Some(profile.habits.smoking.to_string()),
                pets: Some(profile.habits.pets.to_string()),
                sleep_time: Some(profile.habits.sleep_time.to_string()),
                cleanliness: Some(profile.habits.cleanliness.to_string()),
            }),
            bio: profile.bio.clone(),
        }
    }
}
