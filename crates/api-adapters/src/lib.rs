//! # api-adapters
//!
//! The web boundary: request payloads, the JSON response envelope, the
//! fixed-window rate limiter, and the axum router (behind the `web-axum`
//! feature, so downstream crates can depend on the payload/limiter types
//! without pulling in a web stack).

pub mod payload;
pub mod rate_limit;
pub mod state;

#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod middleware;
#[cfg(feature = "web-axum")]
pub mod responses;

pub use rate_limit::RateLimiter;
pub use state::AppState;

#[cfg(feature = "web-axum")]
use axum::{
    routing::{get, post},
    Router,
};
#[cfg(feature = "web-axum")]
use tower_http::trace::TraceLayer;

/// Assembles the API router. The rate limiter applies only to the
/// submission path; the admin listing is gated by the shared-secret check
/// inside its handler.
#[cfg(feature = "web-axum")]
pub fn router(state: AppState) -> Router {
    let contact = Router::new()
        .route("/api/contact", post(handlers::submit_contact))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit,
        ));

    let admin = Router::new().route("/api/contact-submissions", get(handlers::list_submissions));

    Router::new()
        .merge(contact)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
