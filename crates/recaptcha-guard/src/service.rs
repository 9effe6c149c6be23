//! The verification service contract and inbound token extraction.

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::Request;
use guard_common::TokenForm;
use guard_common::constants::MAX_TOKEN_BODY_BYTES;

use crate::error::{ExtractError, VerifyError};
use crate::verifier::Recaptcha;

/// Anything the middleware can gate a request on.
#[async_trait]
pub trait RecaptchaService: Send + Sync {
    /// Verify a client token
    async fn verify(&self, token: &str) -> Result<(), VerifyError>;

    /// Pull the token out of `req`, leaving its body readable downstream
    async fn extract_token(&self, req: &mut Request<Body>) -> Result<String, ExtractError> {
        extract_token(req).await
    }
}

#[async_trait]
impl RecaptchaService for Recaptcha {
    async fn verify(&self, token: &str) -> Result<(), VerifyError> {
        Recaptcha::verify(self, token).await
    }
}

/// Read the `g-recaptcha-response` field from a JSON request body.
///
/// The body is buffered (up to `MAX_TOKEN_BODY_BYTES`) and put back
/// byte-for-byte before parsing. A missing field yields an empty token.
pub async fn extract_token(req: &mut Request<Body>) -> Result<String, ExtractError> {
    let body = std::mem::take(req.body_mut());
    let bytes = to_bytes(body, MAX_TOKEN_BODY_BYTES)
        .await
        .map_err(ExtractError::Body)?;

    *req.body_mut() = Body::from(bytes.clone());

    let form: TokenForm = serde_json::from_slice(&bytes)?;
    Ok(form.recaptcha_response)
}
