//! Application state and shared resources.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use recaptcha_guard::{RecaptchaVersion, SharedService};

use crate::config::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Verification service guarding protected routes
    pub recaptcha: SharedService,

    /// Configured reCAPTCHA version (reported by /health)
    pub recaptcha_version: RecaptchaVersion,

    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Build state from configuration. Fails on any invalid verifier setting.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let verifier = config.recaptcha.build_verifier()?;
        let recaptcha_version = verifier.version();

        Ok(Self::with_service(Arc::new(verifier), recaptcha_version))
    }

    pub fn with_service(recaptcha: SharedService, recaptcha_version: RecaptchaVersion) -> Self {
        Self {
            recaptcha,
            recaptcha_version,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
