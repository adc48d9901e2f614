//! Request middleware: fixed-window rate limiting on the submission path.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::responses::ApiError;
use crate::state::AppState;

/// Applied via `route_layer` to `POST /api/contact` only.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);
    if state.rate_limiter.try_acquire(&key) {
        next.run(request).await
    } else {
        warn!(client = %key, "rate limit exceeded on contact endpoint");
        ApiError::RateLimited.into_response()
    }
}

/// Client identity for rate limiting: first `X-Forwarded-For` entry when a
/// proxy sits in front, else the peer address, else a shared bucket.
fn client_key(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next().map(str::trim) {
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
