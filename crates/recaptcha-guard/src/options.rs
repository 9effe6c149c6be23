//! Validated construction of a [`Recaptcha`] verifier.
//!
//! Options are applied in the order supplied and each one validates its own
//! input. The first invalid option aborts construction; later options are
//! never applied.

use guard_common::constants::{DEFAULT_MIN_SCORE, SITE_VERIFY_URL};
use guard_common::{ConfigError, RecaptchaVersion};
use reqwest::{Client, Url};

use crate::verifier::Recaptcha;

/// A single construction-time override for [`Recaptcha::new`]
#[derive(Debug, Clone)]
pub enum VerifierOption {
    HttpClient(Option<Client>),
    Version(u8),
    Action(String),
    MinScore(f64),
    VerifyUrl(String),
}

/// Override the HTTP client. Timeouts belong on this client.
pub fn with_http_client(client: impl Into<Option<Client>>) -> VerifierOption {
    VerifierOption::HttpClient(client.into())
}

/// Override the reCAPTCHA version. Default value is 3.
pub fn with_version(version: u8) -> VerifierOption {
    VerifierOption::Version(version)
}

/// Require the backend to echo this action. Only applicable for v3.
pub fn with_action(action: impl Into<String>) -> VerifierOption {
    VerifierOption::Action(action.into())
}

/// Override the minimum accepted score. Default value is 0.5. Only applicable for v3.
pub fn with_min_score(score: f64) -> VerifierOption {
    VerifierOption::MinScore(score)
}

/// Override the siteverify endpoint
pub fn with_verify_url(url: impl Into<String>) -> VerifierOption {
    VerifierOption::VerifyUrl(url.into())
}

/// Accumulates validated settings for a [`Recaptcha`].
///
/// A rejected setter leaves the builder untouched, so the last valid value
/// stays in effect.
#[derive(Clone)]
pub struct RecaptchaBuilder {
    secret: String,
    client: Client,
    version: RecaptchaVersion,
    action: Option<String>,
    min_score: f64,
    verify_url: Url,
}

impl RecaptchaBuilder {
    /// Start from the defaults. Fails before anything else if `secret` is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        Ok(Self {
            secret,
            client: Client::new(),
            version: RecaptchaVersion::default(),
            action: None,
            min_score: DEFAULT_MIN_SCORE,
            verify_url: Url::parse(SITE_VERIFY_URL)
                .map_err(|_| ConfigError::InvalidVerifyUrl(SITE_VERIFY_URL.to_string()))?,
        })
    }

    pub fn apply(&mut self, option: VerifierOption) -> Result<&mut Self, ConfigError> {
        match option {
            VerifierOption::HttpClient(client) => self.http_client(client),
            VerifierOption::Version(version) => self.version(version),
            VerifierOption::Action(action) => self.action(action),
            VerifierOption::MinScore(score) => self.min_score(score),
            VerifierOption::VerifyUrl(url) => self.verify_url(url),
        }
    }

    pub fn http_client(
        &mut self,
        client: impl Into<Option<Client>>,
    ) -> Result<&mut Self, ConfigError> {
        self.client = client.into().ok_or(ConfigError::NilClient)?;
        Ok(self)
    }

    pub fn version(&mut self, version: u8) -> Result<&mut Self, ConfigError> {
        self.version = RecaptchaVersion::try_from(version)?;
        Ok(self)
    }

    pub fn action(&mut self, action: impl Into<String>) -> Result<&mut Self, ConfigError> {
        let action = action.into();
        if action.is_empty() {
            return Err(ConfigError::InvalidAction);
        }
        self.action = Some(action);
        Ok(self)
    }

    /// Rejects anything outside [0.0, 1.0], NaN included
    pub fn min_score(&mut self, score: f64) -> Result<&mut Self, ConfigError> {
        if !(0.0..=1.0).contains(&score) {
            return Err(ConfigError::InvalidScore(score));
        }
        self.min_score = score;
        Ok(self)
    }

    pub fn verify_url(&mut self, url: impl AsRef<str>) -> Result<&mut Self, ConfigError> {
        let raw = url.as_ref();
        let parsed = Url::parse(raw)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https"))
            .ok_or_else(|| ConfigError::InvalidVerifyUrl(raw.to_string()))?;
        self.verify_url = parsed;
        Ok(self)
    }

    pub fn build(&self) -> Recaptcha {
        Recaptcha {
            secret: self.secret.clone(),
            client: self.client.clone(),
            version: self.version,
            action: self.action.clone(),
            min_score: self.min_score,
            verify_url: self.verify_url.clone(),
        }
    }
}

impl std::fmt::Debug for RecaptchaBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecaptchaBuilder")
            .field("secret", &"<redacted>")
            .field("version", &self.version)
            .field("action", &self.action)
            .field("min_score", &self.min_score)
            .field("verify_url", &self.verify_url.as_str())
            .finish()
    }
}
