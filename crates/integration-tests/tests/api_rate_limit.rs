//! Fixed-window rate limiting on the submission path.

use axum::body::Body;
use domains::traits::SubmissionRepo;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::util::ServiceExt;

use integration_tests::{get_with_header, harness, sample_payload, ADMIN_KEY};

async fn post_from(app: &axum::Router, client: &str) -> StatusCode {
    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/json")
        .header("x-forwarded-for", client)
        .body(Body::from(sample_payload().to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn eleventh_request_in_the_default_window_is_rejected() {
    let h = harness();

    for i in 0..10 {
        let status = post_from(&h.app, "10.0.0.1").await;
        assert_eq!(status, StatusCode::CREATED, "request {} should pass", i + 1);
    }

    let status = post_from(&h.app, "10.0.0.1").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    // The rejected request never reached the store.
    assert_eq!(h.repo.list_all().await.unwrap().len(), 10);
}

#[tokio::test]
async fn rate_limit_response_uses_the_error_envelope() {
    let h = harness();
    for _ in 0..10 {
        post_from(&h.app, "10.0.0.2").await;
    }

    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/json")
        .header("x-forwarded-for", "10.0.0.2")
        .body(Body::from(sample_payload().to_string()))
        .unwrap();
    let response = h.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Too many requests, please try again later");
}

#[tokio::test]
async fn different_clients_have_independent_windows() {
    let h = harness();

    for _ in 0..10 {
        post_from(&h.app, "10.0.0.3").await;
    }
    assert_eq!(post_from(&h.app, "10.0.0.3").await, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(post_from(&h.app, "10.0.0.4").await, StatusCode::CREATED);
}

#[tokio::test]
async fn admin_listing_is_not_rate_limited() {
    let h = harness();

    for _ in 0..10 {
        post_from(&h.app, "10.0.0.5").await;
    }

    // Far more reads than the submission limit allows, all from one client.
    for _ in 0..15 {
        let (status, _) =
            get_with_header(&h.app, "/api/contact-submissions", Some(ADMIN_KEY)).await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn honeypot_hits_still_count_against_the_window() {
    let h = harness();

    let mut payload = sample_payload();
    payload["hp"] = serde_json::json!("bot");
    for _ in 0..10 {
        let request = Request::builder()
            .method("POST")
            .uri("/api/contact")
            .header("content-type", "application/json")
            .header("x-forwarded-for", "10.0.0.6")
            .body(Body::from(payload.to_string()))
            .unwrap();
        assert_eq!(
            h.app.clone().oneshot(request).await.unwrap().status(),
            StatusCode::OK
        );
    }

    assert_eq!(post_from(&h.app, "10.0.0.6").await, StatusCode::TOO_MANY_REQUESTS);
}
