//! Network-free service for testing handlers behind the middleware.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;

use crate::error::{ExtractError, VerifyError};
use crate::service::RecaptchaService;

/// The only token [`MockRecaptcha`] accepts
pub const MOCK_TOKEN: &str = "mock-recaptcha";

/// Accepts [`MOCK_TOKEN`] and nothing else. Extraction always yields
/// [`MOCK_TOKEN`] without touching the request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRecaptcha;

impl MockRecaptcha {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RecaptchaService for MockRecaptcha {
    async fn verify(&self, token: &str) -> Result<(), VerifyError> {
        if token != MOCK_TOKEN {
            return Err(VerifyError::RequestFailure {
                error_codes: vec!["invalid-input-response".to_string()],
            });
        }
        Ok(())
    }

    async fn extract_token(&self, _req: &mut Request<Body>) -> Result<String, ExtractError> {
        Ok(MOCK_TOKEN.to_string())
    }
}
