//! Verification and token extraction errors.

use guard_common::VerifyErrorKind;
use thiserror::Error;

/// A failed verification attempt. Terminal for that attempt, never retried.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("siteverify request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed siteverify response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unsuccessful recaptcha verify request (error codes: {error_codes:?})")]
    RequestFailure { error_codes: Vec<String> },

    #[error("lower received score than expected ({score} < {threshold})")]
    LowerScore { score: f64, threshold: f64 },

    #[error("mismatched recaptcha action (expected {expected:?}, received {received:?})")]
    MismatchAction { expected: String, received: String },
}

impl VerifyError {
    pub fn kind(&self) -> VerifyErrorKind {
        match self {
            Self::Transport(_) => VerifyErrorKind::Transport,
            Self::Decode(_) => VerifyErrorKind::Decode,
            Self::RequestFailure { .. } => VerifyErrorKind::RequestFailure,
            Self::LowerScore { .. } => VerifyErrorKind::LowerScore,
            Self::MismatchAction { .. } => VerifyErrorKind::MismatchAction,
        }
    }
}

/// Failure to pull the token out of an inbound request body
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),

    #[error("malformed request body: {0}")]
    Json(#[from] serde_json::Error),
}
