//! Configuration management for Guard Server.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use guard_common::constants::{
    DEFAULT_LISTEN_ADDR, DEFAULT_MIN_SCORE, DEFAULT_VERIFY_TIMEOUT_SECS, DEFAULT_VERSION,
};
use recaptcha_guard::{
    Recaptcha, VerifierOption, with_action, with_http_client, with_min_score, with_verify_url,
    with_version,
};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// reCAPTCHA verifier configuration
    #[serde(default)]
    pub recaptcha: RecaptchaConfig,
}

/// reCAPTCHA verifier settings
#[derive(Clone, Deserialize)]
pub struct RecaptchaConfig {
    /// Shared secret, usually supplied via RECAPTCHA_SECRET
    #[serde(default)]
    pub secret: String,

    /// API version (2 or 3)
    #[serde(default = "default_version")]
    pub version: u8,

    /// Expected action (v3 only); unset skips the check
    #[serde(default)]
    pub action: Option<String>,

    /// Minimum accepted score (v3 only)
    #[serde(default = "default_min_score")]
    pub min_score: f64,

    /// Timeout for the siteverify call
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Override the siteverify endpoint
    #[serde(default)]
    pub verify_url: Option<String>,
}

impl Default for RecaptchaConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            version: default_version(),
            action: None,
            min_score: default_min_score(),
            timeout_secs: default_timeout(),
            verify_url: None,
        }
    }
}

impl std::fmt::Debug for RecaptchaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecaptchaConfig")
            .field("secret", &"<redacted>")
            .field("version", &self.version)
            .field("action", &self.action)
            .field("min_score", &self.min_score)
            .field("timeout_secs", &self.timeout_secs)
            .field("verify_url", &self.verify_url)
            .finish()
    }
}

impl RecaptchaConfig {
    /// Build the verifier, with the timeout applied to its HTTP client
    pub fn build_verifier(&self) -> Result<Recaptcha> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let mut options: Vec<VerifierOption> = vec![
            with_http_client(client),
            with_version(self.version),
            with_min_score(self.min_score),
        ];
        if let Some(ref action) = self.action {
            options.push(with_action(action.clone()));
        }
        if let Some(ref url) = self.verify_url {
            options.push(with_verify_url(url.clone()));
        }

        Recaptcha::new(self.secret.clone(), options).context("Invalid reCAPTCHA configuration")
    }
}

// Default value functions
fn default_listen_addr() -> String { DEFAULT_LISTEN_ADDR.to_string() }
fn default_version() -> u8 { DEFAULT_VERSION }
fn default_min_score() -> f64 { DEFAULT_MIN_SCORE }
fn default_timeout() -> u64 { DEFAULT_VERIFY_TIMEOUT_SECS }

impl AppConfig {
    /// Load configuration from file, with CLI overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name(config_path))
                .build()
                .context("Failed to load config file")?;

            settings
                .try_deserialize()
                .context("Failed to parse config")?
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Self::default()
        };

        // Apply CLI overrides
        if let Some(ref secret) = args.secret {
            config.recaptcha.secret = secret.clone();
        }
        if let Some(ref listen) = args.listen {
            config.listen_addr = listen.clone();
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            recaptcha: RecaptchaConfig::default(),
        }
    }
}
