//! Common error types for Recaptcha Guard components.

use thiserror::Error;

/// Errors raised while constructing a verifier.
///
/// Never raised at verification time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("missing recaptcha secret")]
    MissingSecret,

    #[error("invalid http client, can't be nil")]
    NilClient,

    #[error("invalid version {0}, must be 2 or 3")]
    InvalidVersion(u8),

    #[error("invalid action, can't be empty")]
    InvalidAction,

    #[error("invalid min score {0}, must be between 0.0 and 1.0")]
    InvalidScore(f64),

    #[error("invalid verify url: {0}")]
    InvalidVerifyUrl(String),
}

/// Discriminant of a failed verification, for comparisons and log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerifyErrorKind {
    /// Connection, DNS, or timeout failure reaching the backend
    Transport,
    /// Backend body was not the expected JSON
    Decode,
    /// Backend reported `success: false`
    RequestFailure,
    /// Score below the configured threshold (v3)
    LowerScore,
    /// Returned action differs from the configured one (v3)
    MismatchAction,
}

impl VerifyErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Decode => "decode",
            Self::RequestFailure => "request_failure",
            Self::LowerScore => "lower_score",
            Self::MismatchAction => "mismatch_action",
        }
    }

    /// Returns true if the backend answered and the policy rejected the token
    pub fn is_policy_rejection(&self) -> bool {
        matches!(
            self,
            Self::RequestFailure | Self::LowerScore | Self::MismatchAction
        )
    }
}

impl std::fmt::Display for VerifyErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
