use crate::core::distance::same_location;
use crate::models::{CompatibilityProfile, ScoreBreakdown, ScoringWeights};

/// Calculate a compatibility score (0-100) for a candidate
///
/// Scoring formula:
/// score = round(
///     budget_score * w.budget +        # 100 * (1 - |Δbudget| / max budget)
///     location_score * w.location +    # 100 on a normalized label match
///     habits_score * w.habits +        # share of equal habits, 0-100
///     cluster_score * w.cluster        # 100 when both share a cluster
/// ) clamped to [0, 100]
///
/// Hard filters are not applied here.
pub fn calculate_compatibility_score(
    requester: &CompatibilityProfile,
    candidate: &CompatibilityProfile,
    same_cluster: bool,
    weights: &ScoringWeights,
) -> (u8, ScoreBreakdown) {
    let breakdown = ScoreBreakdown {
        budget: budget_score(requester.budget, candidate.budget),
        location: location_score(requester, candidate),
        habits: habits_score(requester, candidate),
        cluster: if same_cluster { 100.0 } else { 0.0 },
    };

    let total = breakdown.budget * weights.budget
        + breakdown.location * weights.location
        + breakdown.habits * weights.habits
        + breakdown.cluster * weights.cluster;

    (total.round().clamp(0.0, 100.0) as u8, breakdown)
}

/// Budget closeness (0-100), floored at 0
#[inline]
fn budget_score(requester_budget: f64, candidate_budget: f64) -> f64 {
    let max = requester_budget.max(candidate_budget);
    if max <= 0.0 {
        return 0.0;
    }
    let delta = (requester_budget - candidate_budget).abs();
    (100.0 * (1.0 - delta / max)).max(0.0)
}

#[inline]
fn location_score(requester: &CompatibilityProfile, candidate: &CompatibilityProfile) -> f64 {
    if same_location(&requester.location_preference, &candidate.location_preference) {
        100.0
    } else {
        0.0
    }
}

/// Average of four equal/not-equal habit indicators (0-100)
#[inline]
fn habits_score(requester: &CompatibilityProfile, candidate: &CompatibilityProfile) -> f64 {
    let a = &requester.habits;
    let b = &candidate.habits;
    let agreements = [
        a.smoking == b.smoking,
        a.pets == b.pets,
        a.sleep_time == b.sleep_time,
        a.cleanliness == b.cleanliness,
    ];
    let agreed = agreements.iter().filter(|&&equal| equal).count();
    100.0 * agreed as f64 / agreements.len() as f64
}
