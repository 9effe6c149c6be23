//! axum middleware gating routes on reCAPTCHA verification.
//!
//! Every failure (unreadable body, malformed JSON, transport, policy) answers
//! `401 unauthorized` without running the wrapped handler. The detail only
//! reaches the server log.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use guard_common::constants::UNAUTHORIZED_BODY;

use crate::service::RecaptchaService;

/// Service handle shared by every request
pub type SharedService = Arc<dyn RecaptchaService>;

/// Put the reCAPTCHA gate in front of every route currently on `router`.
///
/// ```ignore
/// let protected = Router::new().route("/submit", post(submit));
/// let protected = recaptcha_guard::apply(protected, Arc::new(verifier));
/// ```
pub fn apply<S>(router: Router<S>, service: SharedService) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(service, recaptcha_middleware))
}

/// Middleware body, usable directly with `from_fn_with_state`
pub async fn recaptcha_middleware(
    State(service): State<SharedService>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match service.extract_token(&mut req).await {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!(
                error = %err,
                method = %req.method(),
                path = %req.uri().path(),
                "reCAPTCHA token extraction failed"
            );
            return unauthorized();
        }
    };

    if let Err(err) = service.verify(&token).await {
        tracing::warn!(
            kind = %err.kind(),
            error = %err,
            method = %req.method(),
            path = %req.uri().path(),
            "reCAPTCHA verification failed"
        );
        return unauthorized();
    }

    next.run(req).await
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, UNAUTHORIZED_BODY).into_response()
}
