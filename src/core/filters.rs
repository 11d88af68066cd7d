use crate::models::CompatibilityProfile;

/// Hard filter applied before any scoring
///
/// A candidate survives only if it is not the requester and both sides'
/// gender preferences are satisfied. The check is symmetric: swapping
/// requester and candidate never changes the outcome.
#[inline]
pub fn passes_hard_filter(
    requester: &CompatibilityProfile,
    candidate: &CompatibilityProfile,
) -> bool {
    // Never match yourself
    if candidate.owner_id == requester.owner_id {
        return false;
    }

    mutually_acceptable(requester, candidate)
}

/// Whether each profile's gender preference accepts the other's gender
#[inline]
pub fn mutually_acceptable(a: &CompatibilityProfile, b: &CompatibilityProfile) -> bool {
    a.preferred_gender.accepts(b.gender) && b.preferred_gender.accepts(a.gender)
}
