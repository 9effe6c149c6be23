//! reCAPTCHA token verification against the siteverify backend.

use guard_common::{ConfigError, RecaptchaVersion, VerificationOutcome};
use reqwest::{Client, Url};

use crate::error::VerifyError;
use crate::options::{RecaptchaBuilder, VerifierOption};

/// Configured reCAPTCHA verifier.
///
/// Immutable after construction and safe to share across concurrent
/// requests. Holds no per-call state.
#[derive(Clone)]
pub struct Recaptcha {
    pub(crate) secret: String,
    pub(crate) client: Client,
    pub(crate) version: RecaptchaVersion,
    /// `None` skips the action check
    pub(crate) action: Option<String>,
    pub(crate) min_score: f64,
    pub(crate) verify_url: Url,
}

impl Recaptcha {
    /// Build a verifier, applying `options` in order and stopping at the first
    /// invalid one.
    pub fn new(
        secret: impl Into<String>,
        options: impl IntoIterator<Item = VerifierOption>,
    ) -> Result<Self, ConfigError> {
        let mut builder = RecaptchaBuilder::new(secret)?;
        for option in options {
            builder.apply(option)?;
        }
        Ok(builder.build())
    }

    pub fn builder(secret: impl Into<String>) -> Result<RecaptchaBuilder, ConfigError> {
        RecaptchaBuilder::new(secret)
    }

    pub fn version(&self) -> RecaptchaVersion {
        self.version
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    pub fn verify_url(&self) -> &Url {
        &self.verify_url
    }

    /// Verify a client token with the backend and apply the version policy.
    ///
    /// Sends `POST <verify_url>?secret=..&response=..` with an empty body.
    /// Transport failures are returned as-is; nothing is retried.
    pub async fn verify(&self, response_token: &str) -> Result<(), VerifyError> {
        let response = self
            .client
            .post(self.verify_url.clone())
            .query(&[
                ("secret", self.secret.as_str()),
                ("response", response_token),
            ])
            .send()
            .await?;

        let body = response.bytes().await?;
        let outcome: VerificationOutcome = serde_json::from_slice(&body)?;

        self.check_outcome(&outcome)?;

        tracing::debug!(
            version = %self.version,
            hostname = %outcome.hostname,
            score = outcome.score,
            action = %outcome.action,
            "reCAPTCHA token verified"
        );

        Ok(())
    }

    /// Acceptance policy over a decoded backend response.
    ///
    /// v2 only looks at `success`. v3 additionally requires
    /// `score >= min_score` and, when an action is configured, an exact
    /// action match.
    pub fn check_outcome(&self, outcome: &VerificationOutcome) -> Result<(), VerifyError> {
        if !outcome.success {
            tracing::debug!(
                error_codes = ?outcome.error_codes,
                hostname = %outcome.hostname,
                "siteverify rejected token"
            );
            return Err(VerifyError::RequestFailure {
                error_codes: outcome.error_codes.clone(),
            });
        }

        if !self.version.has_score() {
            return Ok(());
        }

        if outcome.score < self.min_score {
            return Err(VerifyError::LowerScore {
                score: outcome.score,
                threshold: self.min_score,
            });
        }

        if let Some(expected) = &self.action {
            if outcome.action != *expected {
                return Err(VerifyError::MismatchAction {
                    expected: expected.clone(),
                    received: outcome.action.clone(),
                });
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for Recaptcha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recaptcha")
            .field("secret", &"<redacted>")
            .field("version", &self.version)
            .field("action", &self.action)
            .field("min_score", &self.min_score)
            .field("verify_url", &self.verify_url.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{with_action, with_min_score, with_verify_url, with_version};
    use guard_common::VerifyErrorKind;
    use mockito::{Matcher, Server, ServerGuard};
    use tokio_test::assert_ok;

    const VERIFY_PATH: &str = "/recaptcha/api/siteverify";

    fn outcome(success: bool, score: f64, action: &str) -> VerificationOutcome {
        VerificationOutcome {
            success,
            score,
            action: action.to_string(),
            ..Default::default()
        }
    }

    fn v3_signup() -> Recaptcha {
        Recaptcha::new(
            "test-secret",
            [with_version(3), with_min_score(0.5), with_action("signup")],
        )
        .unwrap()
    }

    async fn backend(token: &str, body: &str) -> (ServerGuard, mockito::Mock) {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Regex(format!("^{VERIFY_PATH}")))
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("secret".into(), "test-secret".into()),
                Matcher::UrlEncoded("response".into(), token.into()),
            ]))
            .match_body("")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;
        (server, mock)
    }

    fn verifier_for(server: &ServerGuard, mut options: Vec<VerifierOption>) -> Recaptcha {
        options.push(with_verify_url(format!("{}{VERIFY_PATH}", server.url())));
        Recaptcha::new("test-secret", options).unwrap()
    }

    #[test]
    fn test_new_defaults() {
        let verifier = Recaptcha::new("test-secret", []).unwrap();
        assert_eq!(verifier.version(), RecaptchaVersion::V3);
        assert_eq!(verifier.action(), None);
        assert_eq!(verifier.min_score(), 0.5);
    }

    #[test]
    fn test_new_missing_secret_ignores_options() {
        let err = Recaptcha::new("", [with_version(2), with_action("login")]).unwrap_err();
        assert_eq!(err, ConfigError::MissingSecret);

        let err = Recaptcha::new("", [with_version(9)]).unwrap_err();
        assert_eq!(err, ConfigError::MissingSecret);
    }

    #[test]
    fn test_new_fails_on_first_invalid_option() {
        let err = Recaptcha::new(
            "test-secret",
            [with_version(13), with_action(""), with_min_score(4.0)],
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidVersion(13));

        let err = Recaptcha::new(
            "test-secret",
            [with_version(2), with_min_score(-1.0), with_action("")],
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidScore(-1.0));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let verifier = Recaptcha::new("super-secret-value", []).unwrap();
        let debug = format!("{verifier:?}");
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_policy_v3() {
        let verifier = v3_signup();

        let err = verifier.check_outcome(&outcome(true, 0.3, "signup")).unwrap_err();
        assert_eq!(err.kind(), VerifyErrorKind::LowerScore);

        let err = verifier.check_outcome(&outcome(true, 0.9, "login")).unwrap_err();
        assert_eq!(err.kind(), VerifyErrorKind::MismatchAction);

        assert_ok!(verifier.check_outcome(&outcome(true, 0.9, "signup")));
        // Threshold itself is accepted
        assert_ok!(verifier.check_outcome(&outcome(true, 0.5, "signup")));
    }

    #[test]
    fn test_policy_v2_ignores_score_and_action() {
        let verifier = Recaptcha::new("test-secret", [with_version(2), with_action("signup")])
            .unwrap();

        assert_ok!(verifier.check_outcome(&outcome(true, 0.0, "")));
        assert_ok!(verifier.check_outcome(&outcome(true, 0.1, "login")));
    }

    #[test]
    fn test_policy_failure_regardless_of_version() {
        let failed = VerificationOutcome {
            success: false,
            score: 1.0,
            action: "signup".to_string(),
            error_codes: vec!["timeout-or-duplicate".to_string()],
            ..Default::default()
        };

        for version in [2, 3] {
            let verifier = Recaptcha::new("test-secret", [with_version(version)]).unwrap();
            match verifier.check_outcome(&failed) {
                Err(VerifyError::RequestFailure { error_codes }) => {
                    assert_eq!(error_codes, vec!["timeout-or-duplicate"]);
                }
                other => panic!("expected RequestFailure, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_policy_unset_action_skips_check() {
        let verifier = Recaptcha::new("test-secret", []).unwrap();
        assert_ok!(verifier.check_outcome(&outcome(true, 0.7, "homepage")));
        assert_ok!(verifier.check_outcome(&outcome(true, 0.7, "")));
    }

    #[tokio::test]
    async fn test_verify_v3_success() {
        let (server, mock) = backend(
            "tok123",
            r#"{"success": true, "score": 0.9, "action": "signup",
                "challenge_ts": "2024-03-01T12:30:00Z", "hostname": "example.com"}"#,
        )
        .await;
        let verifier = verifier_for(&server, vec![with_action("signup")]);

        assert_ok!(verifier.verify("tok123").await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_verify_v3_lower_score() {
        let (server, _mock) =
            backend("tok123", r#"{"success": true, "score": 0.3, "action": "signup"}"#).await;
        let verifier = verifier_for(&server, vec![with_action("signup")]);

        let err = verifier.verify("tok123").await.unwrap_err();
        assert_eq!(err.kind(), VerifyErrorKind::LowerScore);
    }

    #[tokio::test]
    async fn test_verify_v3_mismatch_action() {
        let (server, _mock) =
            backend("tok123", r#"{"success": true, "score": 0.9, "action": "login"}"#).await;
        let verifier = verifier_for(&server, vec![with_action("signup")]);

        match verifier.verify("tok123").await {
            Err(VerifyError::MismatchAction { expected, received }) => {
                assert_eq!(expected, "signup");
                assert_eq!(received, "login");
            }
            other => panic!("expected MismatchAction, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_verify_v2_success_without_score() {
        let (server, _mock) = backend("tok-v2", r#"{"success": true}"#).await;
        let verifier = verifier_for(&server, vec![with_version(2)]);

        assert_ok!(verifier.verify("tok-v2").await);
    }

    #[tokio::test]
    async fn test_verify_backend_rejects() {
        let (server, _mock) = backend(
            "bad",
            r#"{"success": false, "error-codes": ["invalid-input-response"]}"#,
        )
        .await;

        for version in [2, 3] {
            let verifier = verifier_for(&server, vec![with_version(version)]);
            let err = verifier.verify("bad").await.unwrap_err();
            assert_eq!(err.kind(), VerifyErrorKind::RequestFailure);
        }
    }

    #[tokio::test]
    async fn test_verify_malformed_body() {
        let (server, _mock) = backend("tok123", "<html>Service Unavailable</html>").await;
        let verifier = verifier_for(&server, vec![]);

        let err = verifier.verify("tok123").await.unwrap_err();
        assert_eq!(err.kind(), VerifyErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_verify_transport_error() {
        // Nothing listens on port 1
        let verifier = Recaptcha::new(
            "test-secret",
            [with_verify_url("http://127.0.0.1:1/recaptcha/api/siteverify")],
        )
        .unwrap();

        let err = verifier.verify("tok123").await.unwrap_err();
        assert_eq!(err.kind(), VerifyErrorKind::Transport);
        assert!(!err.kind().is_policy_rejection());
    }
}
