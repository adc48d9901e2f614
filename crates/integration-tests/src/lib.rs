//! Shared fixtures for the end-to-end tests: a router wired with the
//! in-memory store and a recording mail double, plus small helpers for
//! driving the router in-process via `tower::ServiceExt::oneshot`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use api_adapters::{AppState, RateLimiter};
use auth_adapters::AdminKeyAuth;
use domains::{ContactSubmission, MailError, Mailer};
use services::ContactService;
use storage_adapters::InMemorySubmissionRepo;

pub const ADMIN_KEY: &str = "test-admin-key";

/// Mail double that counts sends and optionally fails them, so tests can
/// observe the fire-and-forget dispatch without a network.
#[derive(Default)]
pub struct RecordingMailer {
    pub admin_alerts: AtomicUsize,
    pub customer_replies: AtomicUsize,
    pub fail_sends: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    pub fn total(&self) -> usize {
        self.admin_alerts.load(Ordering::SeqCst) + self.customer_replies.load(Ordering::SeqCst)
    }

    /// Waits until at least `expected` sends were attempted. Panics after
    /// one second so a broken dispatch fails fast instead of hanging.
    pub async fn wait_for_attempts(&self, expected: usize) {
        for _ in 0..100 {
            if self.total() >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "expected {expected} notification attempts, saw {}",
            self.total()
        );
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_admin_alert(&self, _submission: &ContactSubmission) -> Result<(), MailError> {
        self.admin_alerts.fetch_add(1, Ordering::SeqCst);
        if self.fail_sends {
            return Err(MailError::Transport("simulated timeout".into()));
        }
        Ok(())
    }

    async fn send_customer_reply(&self, _submission: &ContactSubmission) -> Result<(), MailError> {
        self.customer_replies.fetch_add(1, Ordering::SeqCst);
        if self.fail_sends {
            return Err(MailError::Provider("simulated 503".into()));
        }
        Ok(())
    }
}

pub struct HarnessOptions {
    pub admin_key: Option<&'static str>,
    pub rate_limit_window: Duration,
    pub rate_limit_max: u32,
    pub failing_mailer: bool,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            admin_key: Some(ADMIN_KEY),
            rate_limit_window: Duration::from_secs(60),
            rate_limit_max: 10,
            failing_mailer: false,
        }
    }
}

pub struct TestHarness {
    pub app: Router,
    pub repo: Arc<InMemorySubmissionRepo>,
    pub mailer: Arc<RecordingMailer>,
}

pub fn harness() -> TestHarness {
    harness_with(HarnessOptions::default())
}

pub fn harness_with(options: HarnessOptions) -> TestHarness {
    let repo = Arc::new(InMemorySubmissionRepo::new());
    let mailer = Arc::new(if options.failing_mailer {
        RecordingMailer::failing()
    } else {
        RecordingMailer::default()
    });

    let contact = Arc::new(ContactService::new(
        Arc::clone(&repo) as Arc<dyn domains::SubmissionRepo>,
        Arc::clone(&mailer) as Arc<dyn Mailer>,
    ));
    let state = AppState::new(
        contact,
        AdminKeyAuth::new(
            options
                .admin_key
                .map(|key| SecretString::from(key.to_string())),
        ),
        RateLimiter::new(options.rate_limit_window, options.rate_limit_max),
    );

    TestHarness {
        app: api_adapters::router(state),
        repo,
        mailer,
    }
}

/// A submission body that passes validation.
pub fn sample_payload() -> Value {
    json!({
        "name": "Ravi Patel",
        "email": "ravi@example.com",
        "phone": "+91 98765 43210",
        "service": "custom-fabrication",
        "message": "Need a quote for a staircase railing.",
    })
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    get_with_header(app, uri, None).await
}

pub async fn get_with_header(
    app: &Router,
    uri: &str,
    api_key_header: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(key) = api_key_header {
        builder = builder.header("x-api-key", key);
    }
    let request = builder.body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router never fails");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is JSON")
    };
    (status, body)
}
