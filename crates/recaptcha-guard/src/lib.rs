//! # Recaptcha Guard
//!
//! Server-side verification of Google reCAPTCHA (v2/v3) tokens, plus an axum
//! middleware that gates a route on a successful verification.
//!
//! ## Flow
//! ```text
//! Request → recaptcha_middleware → extract_token → Recaptcha::verify → next handler
//!                  ↓ (any failure)                       ↓
//!           401 "unauthorized"                    POST siteverify
//! ```
//!
//! ## Modules
//! - `verifier` - The `Recaptcha` verifier and its acceptance policy
//! - `options` - Validated construction (`VerifierOption`, `RecaptchaBuilder`)
//! - `service` - The `RecaptchaService` trait and body token extraction
//! - `middleware` - axum gate mapping every failure to 401
//! - `mock` - Network-free service for handler tests
//! - `error` - Verification and extraction errors

pub mod error;
pub mod middleware;
pub mod mock;
pub mod options;
pub mod service;
pub mod verifier;

pub use error::{ExtractError, VerifyError};
pub use middleware::{SharedService, apply, recaptcha_middleware};
pub use mock::{MOCK_TOKEN, MockRecaptcha};
pub use options::{
    RecaptchaBuilder, VerifierOption, with_action, with_http_client, with_min_score,
    with_verify_url, with_version,
};
pub use service::{RecaptchaService, extract_token};
pub use verifier::Recaptcha;

pub use guard_common::{ConfigError, RecaptchaVersion, VerificationOutcome, VerifyErrorKind};
