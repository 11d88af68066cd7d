use std::str::FromStr;

use validator::Validate;

use crate::core::distance::same_location;
use crate::core::error::MatchError;
use crate::models::{CompatibilityProfile, FeatureVector, Habits, ProfileRecord};

/// Validate a stored record into a typed profile
///
/// Every structured field must be present and within its domain. Only `bio`
/// may be absent. Nothing is defaulted.
pub fn validate_profile(record: &ProfileRecord) -> Result<CompatibilityProfile, MatchError> {
    let owner_id = record.owner_id.as_str();

    if let Err(errors) = record.validate() {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        let field = fields.into_iter().next().unwrap_or_default();
        let (field, reason) = match field.as_str() {
            "owner_id" => ("ownerId".to_string(), "must not be empty"),
            "budget" => (field, "must be greater than zero"),
            _ => (field, "is out of range"),
        };
        return Err(MatchError::Validation {
            owner_id: owner_id.to_string(),
            field,
            reason: reason.to_string(),
        });
    }

    let gender = parse_field(owner_id, "gender", record.gender.as_deref())?;
    let preferred_gender =
        parse_field(owner_id, "preferredGender", record.preferred_gender.as_deref())?;
    let budget = record
        .budget
        .ok_or_else(|| MatchError::missing(owner_id, "budget"))?;
    if !budget.is_finite() {
        return Err(MatchError::out_of_domain(owner_id, "budget", &budget.to_string()));
    }

    let location_preference = match record.location_preference.as_deref().map(str::trim) {
        Some(location) if !location.is_empty() => location.to_string(),
        _ => return Err(MatchError::missing(owner_id, "locationPreference")),
    };

    let habits = record
        .habits
        .as_ref()
        .ok_or_else(|| MatchError::missing(owner_id, "habits"))?;

    let habits = Habits {
        smoking: parse_field(owner_id, "habits.smoking", habits.smoking.as_deref())?,
        pets: parse_field(owner_id, "habits.pets", habits.pets.as_deref())?,
        sleep_time: parse_field(owner_id, "habits.sleepTime", habits.sleep_time.as_deref())?,
        cleanliness: parse_field(owner_id, "habits.cleanliness", habits.cleanliness.as_deref())?,
    };

    Ok(CompatibilityProfile {
        owner_id: owner_id.to_string(),
        gender,
        preferred_gender,
        budget,
        location_preference,
        habits,
        bio: record.bio.clone(),
    })
}

fn parse_field<T: FromStr>(
    owner_id: &str,
    field: &str,
    value: Option<&str>,
) -> Result<T, MatchError> {
    let value = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => return Err(MatchError::missing(owner_id, field)),
    };
    value
        .parse()
        .map_err(|_| MatchError::out_of_domain(owner_id, field, value))
}

/// Budget range observed over one matching pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

impl BudgetRange {
    /// Min and max budget across `profiles`; `None` for an empty slice
    pub fn observe<'a, I>(profiles: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a CompatibilityProfile>,
    {
        profiles.into_iter().fold(None, |range, profile| {
            Some(match range {
                None => BudgetRange { min: profile.budget, max: profile.budget },
                Some(r) => BudgetRange {
                    min: r.min.min(profile.budget),
                    max: r.max.max(profile.budget),
                },
            })
        })
    }

    /// Min-max normalize into [0, 1]; a zero-width range maps everything to 0
    #[inline]
    pub fn normalize(&self, budget: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((budget - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Encode one profile relative to the requester and the pool's budget range
pub fn vectorize(
    profile: &CompatibilityProfile,
    requester: &CompatibilityProfile,
    range: &BudgetRange,
) -> FeatureVector {
    let location_match = if same_location(
        &profile.location_preference,
        &requester.location_preference,
    ) {
        1.0
    } else {
        0.0
    };

    FeatureVector([
        range.normalize(profile.budget),
        location_match,
        profile.habits.smoking.as_f64(),
        profile.habits.pets.as_f64(),
        profile.habits.sleep_time.as_f64(),
        profile.habits.cleanliness.ordinal(),
    ])
}

/// Encode the requester followed by every candidate
///
/// The budget range is derived from exactly these profiles, so vectors are
/// only comparable within one call.
pub fn vectorize_pool(
    requester: &CompatibilityProfile,
    candidates: &[&CompatibilityProfile],
) -> Vec<FeatureVector> {
    let range = BudgetRange::observe(std::iter::once(requester).chain(candidates.iter().copied()))
        .unwrap_or(BudgetRange { min: requester.budget, max: requester.budget });

    std::iter::once(requester)
        .chain(candidates.iter().copied())
        .map(|profile| vectorize(profile, requester, &range))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cleanliness, Gender, HabitsRecord, PreferredGender, SleepTime, YesNo};

    fn create_record(owner_id: &str) -> ProfileRecord {
        ProfileRecord {
            owner_id: owner_id.to_string(),
            gender: Some("Female".to_string()),
            preferred_gender: Some("Any".to_string()),
            budget: Some(20000.0),
            location_preference: Some("Mumbai".to_string()),
            habits: Some(HabitsRecord {
                smoking: Some("No".to_string()),
                pets: Some("Yes".to_string()),
                sleep_time: Some("Late".to_string()),
                cleanliness: Some("Medium".to_string()),
            }),
            bio: None,
        }
    }

    #[test]
    fn test_validate_complete_record() {
        let profile = validate_profile(&create_record("u1")).unwrap();

        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.preferred_gender, PreferredGender::Any);
        assert_eq!(profile.habits.smoking, YesNo::No);
        assert_eq!(profile.habits.pets, YesNo::Yes);
        assert_eq!(profile.habits.sleep_time, SleepTime::Late);
        assert_eq!(profile.habits.cleanliness, Cleanliness::Medium);
    }

    #[test]
    fn test_missing_habit_is_reported_by_name() {
        let mut record = create_record("u1");
        record.habits.as_mut().unwrap().sleep_time = None;

        let err = validate_profile(&record).unwrap_err();
        assert_eq!(err, MatchError::missing("u1", "habits.sleepTime"));
    }

    #[test]
    fn test_missing_habits_block() {
        let mut record = create_record("u1");
        record.habits = None;

        let err = validate_profile(&record).unwrap_err();
        assert_eq!(err, MatchError::missing("u1", "habits"));
    }

    #[test]
    fn test_out_of_domain_cleanliness() {
        let mut record = create_record("u1");
        record.habits.as_mut().unwrap().cleanliness = Some("Spotless".to_string());

        match validate_profile(&record).unwrap_err() {
            MatchError::Validation { owner_id, field, reason } => {
                assert_eq!(owner_id, "u1");
                assert_eq!(field, "habits.cleanliness");
                assert!(reason.contains("Spotless"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_negative_budget_rejected() {
        let mut record = create_record("u1");
        record.budget = Some(-5.0);

        match validate_profile(&record).unwrap_err() {
            MatchError::Validation { field, .. } => assert_eq!(field, "budget"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bio_may_be_absent() {
        let mut record = create_record("u1");
        record.bio = None;
        assert!(validate_profile(&record).is_ok());
    }

    #[test]
    fn test_vector_order_and_encoding() {
        let requester = validate_profile(&create_record("me")).unwrap();
        let mut other = create_record("them");
        other.budget = Some(30000.0);
        other.location_preference = Some("Pune".to_string());
        let other = validate_profile(&other).unwrap();

        let vectors = vectorize_pool(&requester, &[&other]);

        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0].0, [0.0, 1.0, 0.0, 1.0, 1.0, 0.5]);
        assert_eq!(vectors[1].0, [1.0, 0.0, 0.0, 1.0, 1.0, 0.5]);
    }

    #[test]
    fn test_zero_budget_variance_normalizes_to_zero() {
        let range = BudgetRange { min: 500.0, max: 500.0 };
        assert_eq!(range.normalize(500.0), 0.0);
    }
}
