//! Error kinds surfaced by the form controller and the transport.

use thiserror::Error;

/// Shown whenever local validation rejects the form.
pub const VALIDATION_MESSAGE: &str = "Please fill all required fields.";
/// Shown whenever the generation call fails, whatever the cause.
pub const GENERATE_FAILED_MESSAGE: &str = "Something went wrong while generating.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),
    #[error("metric row {index} is missing its {field}")]
    IncompleteMetric { index: usize, field: &'static str },
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("form validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("disclosure service request failed: {0:#}")]
    Transport(anyhow::Error),
    #[error("a submission is already in flight")]
    SubmissionInFlight,
}

impl ClientError {
    /// The static message a user sees for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => VALIDATION_MESSAGE,
            ClientError::Transport(_) => GENERATE_FAILED_MESSAGE,
            ClientError::SubmissionInFlight => "A disclosure is already being generated.",
        }
    }
}
