//! # Guard Common
//!
//! Shared types, constants, and errors used across Recaptcha Guard components.
//!
//! ## Modules
//! - `types` - Wire types (VerificationOutcome, TokenForm) and RecaptchaVersion
//! - `error` - Configuration errors and verification error kinds
//! - `constants` - Backend endpoint, defaults, and limits

pub mod constants;
pub mod error;
pub mod types;

pub use error::{ConfigError, VerifyErrorKind};
pub use types::*;
