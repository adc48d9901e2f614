//! Error taxonomy for the contact backend.
//!
//! Each failure class maps to one HTTP outcome at the boundary:
//! validation -> 400, storage -> 500, auth -> 401, mail -> logged only.

use serde::Serialize;
use thiserror::Error;

/// A single rejected field with a human-readable reason.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Malformed or incomplete submission input. Never persisted.
#[derive(Debug, Clone, Error)]
#[error("invalid submission data: {} field(s) failed validation", .issues.len())]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }
}

/// Durable store unreachable or an insert violated a constraint.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("constraint violation: {0}")]
    Constraint(String),
}

/// Outbound mail failure. Observed by the dispatcher's log boundary only;
/// never converts a stored submission into a failed response.
#[derive(Debug, Error)]
pub enum MailError {
    /// Transport-level failure (connect error, 10s timeout, DNS).
    #[error("mail transport failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("mail provider rejected the request: {0}")]
    Provider(String),
}

/// Admin shared-secret check failure.
///
/// Display strings double as the client-facing `error` field of the
/// 401 envelope.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No key configured server-side: deny everything rather than fail open.
    #[error("Admin API key not configured")]
    NotConfigured,

    #[error("Unauthorized")]
    InvalidKey,
}
