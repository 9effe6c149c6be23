//! Core types shared across Recaptcha Guard components.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// reCAPTCHA API version.
///
/// - V2: binary challenge, the backend only reports `success`
/// - V3: risk scoring, `score` and `action` take part in the decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RecaptchaVersion {
    V2,
    #[default]
    V3,
}

impl RecaptchaVersion {
    pub fn number(&self) -> u8 {
        match self {
            Self::V2 => 2,
            Self::V3 => 3,
        }
    }

    /// Returns true if the backend populates `score` and `action` for this version
    pub fn has_score(&self) -> bool {
        matches!(self, Self::V3)
    }
}

impl TryFrom<u8> for RecaptchaVersion {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::V2),
            3 => Ok(Self::V3),
            other => Err(ConfigError::InvalidVersion(other)),
        }
    }
}

impl From<RecaptchaVersion> for u8 {
    fn from(version: RecaptchaVersion) -> Self {
        version.number()
    }
}

impl std::fmt::Display for RecaptchaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.number())
    }
}

/// Deserialized siteverify response.
///
/// Only `success` is mandatory; v2 responses carry neither `score` nor `action`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// Whether the backend accepted the token
    pub success: bool,

    /// Risk score in [0.0, 1.0] (v3 only)
    #[serde(default)]
    pub score: f64,

    /// Action name declared by the client-side script (v3 only)
    #[serde(default)]
    pub action: String,

    /// When the challenge was solved (informational)
    #[serde(default, rename = "challenge_ts", skip_serializing_if = "Option::is_none")]
    pub challenge_timestamp: Option<DateTime<Utc>>,

    /// Site hostname the token was issued for (informational)
    #[serde(default)]
    pub hostname: String,

    /// Backend diagnostics, surfaced in logs only
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

/// Inbound request body carrying the client token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenForm {
    /// Missing field yields an empty token, which the backend will reject
    #[serde(default, rename = "g-recaptcha-response")]
    pub recaptcha_response: String,
}
