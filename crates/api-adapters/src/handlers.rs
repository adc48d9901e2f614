//! HTTP handlers for the contact API.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::payload::ContactPayload;
use crate::responses::ApiError;
use crate::state::AppState;

/// `POST /api/contact`: validate, persist, respond, then notify.
///
/// The response is sent as soon as the record is stored; the two
/// notification emails are dispatched by the service as detached tasks and
/// can never change the status returned here.
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejecting unparseable contact body");
        ApiError::InvalidInput(Value::String(rejection.body_text()))
    })?;

    // Bot trap: pretend success, store nothing, send nothing.
    if payload.honeypot_tripped() {
        info!("honeypot hit, ignoring submission");
        return Ok((StatusCode::OK, Json(json!({ "success": true }))).into_response());
    }

    let submission = state.contact.submit(payload.into_input()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Contact submitted successfully",
            "data": submission,
        })),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct AdminKeyParams {
    pub api_key: Option<String>,
}

/// `GET /api/contact-submissions`: admin-only dump of every stored record.
/// The shared secret is accepted from the `x-api-key` header or the
/// `api_key` query parameter.
pub async fn list_submissions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<AdminKeyParams>,
) -> Result<Json<Value>, ApiError> {
    let header_key = headers.get("x-api-key").and_then(|v| v.to_str().ok());

    state
        .admin_auth
        .authorize(header_key, params.api_key.as_deref())
        .map_err(|err| {
            warn!(error = %err, "rejected admin listing attempt");
            ApiError::Unauthorized(err.to_string())
        })?;

    let submissions = state.contact.list_all().await.map_err(|err| {
        error!(error = %err, "failed to list contact submissions");
        ApiError::Internal("Failed to retrieve contact submissions")
    })?;

    Ok(Json(json!({ "success": true, "data": submissions })))
}
