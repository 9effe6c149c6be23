//! Shared constants for Recaptcha Guard components.

/// Google reCAPTCHA verification endpoint
pub const SITE_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Request body field carrying the client token
pub const TOKEN_FIELD: &str = "g-recaptcha-response";

/// Default reCAPTCHA version
pub const DEFAULT_VERSION: u8 = 3;

/// Default minimum accepted score (v3 only)
pub const DEFAULT_MIN_SCORE: f64 = 0.5;

/// Upper bound on the inbound body buffered during token extraction (2 MiB)
pub const MAX_TOKEN_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Body written on every rejected request
pub const UNAUTHORIZED_BODY: &str = "unauthorized";

/// Default guard-server listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Default timeout for the outbound siteverify call
pub const DEFAULT_VERIFY_TIMEOUT_SECS: u64 = 10;

