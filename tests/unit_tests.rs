// Unit tests for Flatmate Match

use flatmate_match::core::{
    clustering::KMeans,
    distance::squared_euclidean,
    filters::passes_hard_filter,
    scoring::calculate_compatibility_score,
    vectorizer::{validate_profile, vectorize_pool, BudgetRange},
    MatchError,
};
use flatmate_match::models::{
    Cleanliness, CompatibilityProfile, FeatureVector, Gender, Habits, HabitsRecord,
    PreferredGender, ProfileRecord, ScoringWeights, SleepTime, YesNo,
};

fn create_profile(owner_id: &str, budget: f64) -> CompatibilityProfile {
    CompatibilityProfile {
        owner_id: owner_id.to_string(),
        gender: Gender::Female,
        preferred_gender: PreferredGender::Any,
        budget,
        location_preference: "Mumbai".to_string(),
        habits: Habits {
            smoking: YesNo::No,
            pets: YesNo::No,
            sleep_time: SleepTime::Late,
            cleanliness: Cleanliness::High,
        },
        bio: None,
    }
}

#[test]
fn test_validation_error_names_profile_and_field() {
    let record = ProfileRecord {
        owner_id: "u42".to_string(),
        gender: Some("Female".to_string()),
        preferred_gender: Some("Any".to_string()),
        budget: Some(15000.0),
        location_preference: Some("Mumbai".to_string()),
        habits: Some(HabitsRecord {
            smoking: Some("No".to_string()),
            pets: None,
            sleep_time: Some("Late".to_string()),
            cleanliness: Some("High".to_string()),
        }),
        bio: None,
    };

    let err = validate_profile(&record).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Invalid profile u42: field 'habits.pets' is required"
    );
}

#[test]
fn test_validation_rejects_unknown_gender() {
    let mut record = ProfileRecord::from(&create_profile("u1", 1000.0));
    record.gender = Some("Robot".to_string());

    match validate_profile(&record) {
        Err(MatchError::Validation { field, .. }) => assert_eq!(field, "gender"),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_validation_rejects_empty_owner() {
    let record = ProfileRecord::from(&create_profile("", 1000.0));

    match validate_profile(&record) {
        Err(MatchError::Validation { field, .. }) => assert_eq!(field, "ownerId"),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_record_round_trip_preserves_profile() {
    let mut profile = create_profile("u1", 25000.0);
    profile.preferred_gender = PreferredGender::Only(Gender::Other);
    profile.bio = Some("Night owl".to_string());

    let restored = validate_profile(&ProfileRecord::from(&profile)).unwrap();
    assert_eq!(restored, profile);
}

#[test]
fn test_budget_normalization_is_pool_relative() {
    let requester = create_profile("me", 10000.0);
    let mid = create_profile("mid", 15000.0);
    let high = create_profile("high", 20000.0);

    let vectors = vectorize_pool(&requester, &[&mid, &high]);
    assert_eq!(vectors[0].budget_norm(), 0.0);
    assert!((vectors[1].budget_norm() - 0.5).abs() < 1e-12);
    assert_eq!(vectors[2].budget_norm(), 1.0);

    // Same candidate, different pool, different encoding
    let vectors = vectorize_pool(&requester, &[&mid]);
    assert_eq!(vectors[1].budget_norm(), 1.0);
}

#[test]
fn test_location_feature_compares_against_requester() {
    let requester = create_profile("me", 10000.0);
    let mut elsewhere = create_profile("them", 10000.0);
    elsewhere.location_preference = "Kolkata".to_string();

    let vectors = vectorize_pool(&requester, &[&elsewhere]);
    assert_eq!(vectors[0].0[1], 1.0);
    assert_eq!(vectors[1].0[1], 0.0);
}

#[test]
fn test_budget_range_observe() {
    let a = create_profile("a", 300.0);
    let b = create_profile("b", 100.0);
    let range = BudgetRange::observe([&a, &b]).unwrap();

    assert_eq!(range, BudgetRange { min: 100.0, max: 300.0 });
    assert!(BudgetRange::observe(std::iter::empty()).is_none());
}

#[test]
fn test_kmeans_separates_lifestyles() {
    let early_tidy = FeatureVector([0.1, 1.0, 0.0, 0.0, 0.0, 1.0]);
    let late_messy = FeatureVector([0.9, 0.0, 1.0, 1.0, 1.0, 0.0]);
    let vectors = vec![early_tidy, early_tidy, late_messy, late_messy, early_tidy];

    let clustering = KMeans::new(2, 50).fit(&vectors);

    assert_eq!(clustering.assignments[0], clustering.assignments[1]);
    assert_eq!(clustering.assignments[0], clustering.assignments[4]);
    assert_eq!(clustering.assignments[2], clustering.assignments[3]);
    assert_ne!(clustering.assignments[0], clustering.assignments[2]);
}

#[test]
fn test_kmeans_single_vector() {
    let clustering = KMeans::new(3, 50).fit(&[FeatureVector([0.0; 6])]);
    assert_eq!(clustering.assignments, vec![0]);
}

#[test]
fn test_squared_euclidean_symmetry() {
    let a = FeatureVector([0.2, 1.0, 0.0, 1.0, 0.0, 0.5]);
    let b = FeatureVector([0.7, 0.0, 1.0, 1.0, 1.0, 0.0]);
    assert_eq!(squared_euclidean(&a, &b), squared_euclidean(&b, &a));
}

#[test]
fn test_hard_filter_symmetry() {
    let genders = [Gender::Male, Gender::Female, Gender::Other];
    let preferences = [
        PreferredGender::Any,
        PreferredGender::Only(Gender::Male),
        PreferredGender::Only(Gender::Female),
        PreferredGender::Only(Gender::Other),
    ];

    for &ga in &genders {
        for &pa in &preferences {
            for &gb in &genders {
                for &pb in &preferences {
                    let mut a = create_profile("a", 1000.0);
                    a.gender = ga;
                    a.preferred_gender = pa;
                    let mut b = create_profile("b", 1000.0);
                    b.gender = gb;
                    b.preferred_gender = pb;

                    assert_eq!(passes_hard_filter(&a, &b), passes_hard_filter(&b, &a));
                }
            }
        }
    }
}

#[test]
fn test_custom_weights_change_score() {
    let a = create_profile("a", 10000.0);
    let mut b = create_profile("b", 10000.0);
    b.location_preference = "Goa".to_string();

    let location_heavy = ScoringWeights { budget: 0.0, location: 1.0, habits: 0.0, cluster: 0.0 };
    let habits_heavy = ScoringWeights { budget: 0.0, location: 0.0, habits: 1.0, cluster: 0.0 };

    let (low, _) = calculate_compatibility_score(&a, &b, false, &location_heavy);
    let (high, _) = calculate_compatibility_score(&a, &b, false, &habits_heavy);

    assert_eq!(low, 0);
    assert_eq!(high, 100);
}

#[test]
fn test_budget_term_monotone_for_fixed_cluster() {
    let requester = create_profile("me", 20000.0);
    let weights = ScoringWeights::default();

    for same_cluster in [true, false] {
        let mut previous = None;
        for budget in (20..=80).rev().map(|b| b as f64 * 1000.0) {
            let candidate = create_profile("them", budget);
            let (score, breakdown) =
                calculate_compatibility_score(&requester, &candidate, same_cluster, &weights);
            if let Some((prev_score, prev_budget)) = previous {
                assert!(score >= prev_score, "budget {} scored {} < {}", budget, score, prev_score);
                assert!(breakdown.budget >= prev_budget);
            }
            previous = Some((score, breakdown.budget));
        }
    }
}

#[test]
fn test_boolean_habits_validate_as_yes_no() {
    let json = r#"{
        "ownerId": "form_user",
        "gender": "Male",
        "preferredGender": "Any",
        "budget": 14000,
        "locationPreference": "Pune",
        "habits": { "smoking": true, "pets": false, "sleepTime": "Early", "cleanliness": "Medium" }
    }"#;

    let record: ProfileRecord = serde_json::from_str(json).unwrap();
    let profile = validate_profile(&record).unwrap();

    assert_eq!(profile.habits.smoking, YesNo::Yes);
    assert_eq!(profile.habits.pets, YesNo::No);
}
