use thiserror::Error;

/// Errors raised by the fee profile registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformFeeError {
    /// Input failed validation on a single field; the caller may fix it and retry.
    #[error("Invalid fee profile: {field} {reason}")]
    InvalidFeeProfile { field: String, reason: String },

    /// No such profile, or it is not visible to the caller.
    #[error("Platform settings not found: {0}")]
    NotFound(String),

    /// Attempted mutation of a system-provided profile.
    #[error("{0}")]
    Forbidden(String),
}

impl PlatformFeeError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        PlatformFeeError::InvalidFeeProfile {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
