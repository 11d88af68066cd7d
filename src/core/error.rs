use thiserror::Error;

/// Errors raised by the matching engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("Invalid profile {owner_id}: field '{field}' {reason}")]
    Validation {
        owner_id: String,
        field: String,
        reason: String,
    },

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Invalid match configuration: {0}")]
    InvalidConfig(String),
}

impl MatchError {
    pub(crate) fn missing(owner_id: &str, field: &str) -> Self {
        MatchError::Validation {
            owner_id: owner_id.to_string(),
            field: field.to_string(),
            reason: "is required".to_string(),
        }
    }

    pub(crate) fn out_of_domain(owner_id: &str, field: &str, value: &str) -> Self {
        MatchError::Validation {
            owner_id: owner_id.to_string(),
            field: field.to_string(),
            reason: format!("has unsupported value '{}'", value),
        }
    }
}
