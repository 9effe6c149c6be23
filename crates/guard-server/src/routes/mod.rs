//! HTTP route handlers for Guard Server.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod health;
mod submit;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // Only routes registered here sit behind the reCAPTCHA gate
    let protected = Router::new().route("/submit", post(submit::submit_form));
    let protected = recaptcha_guard::apply(protected, state.recaptcha.clone());

    Router::new()
        // Health & Status
        .route("/health", get(health::health_check))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
