//! reCAPTCHA-protected form submission.

use axum::{Json, http::StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};

use guard_common::constants::TOKEN_FIELD;

#[derive(Serialize)]
pub struct SubmitResponse {
    status: &'static str,
    /// Names of the submitted fields, token excluded
    fields: Vec<String>,
}

/// Accept a verified submission.
///
/// Only reached once the middleware has verified the token; the body it reads
/// is the one the middleware restored.
pub async fn submit_form(
    Json(mut form): Json<Map<String, Value>>,
) -> (StatusCode, Json<SubmitResponse>) {
    form.remove(TOKEN_FIELD);
    let fields: Vec<String> = form.keys().cloned().collect();

    tracing::info!(fields = ?fields, "Verified submission accepted");

    (
        StatusCode::ACCEPTED,
        Json(SubmitResponse {
            status: "accepted",
            fields,
        }),
    )
}
