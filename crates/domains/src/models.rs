//! # Domain Models
//!
//! A contact-form enquiry is the only persisted entity. We use UUID v7 for
//! time-ordered, globally unique identification and serialize camelCase to
//! match the site's JSON contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FieldIssue, ValidationError};

const MAX_NAME_LEN: usize = 200;
const MAX_EMAIL_LEN: usize = 254;
const MAX_PHONE_LEN: usize = 40;
const MAX_SERVICE_LEN: usize = 120;
const MAX_MESSAGE_LEN: usize = 10_000;

/// A stored contact-form submission. Immutable after creation; there is no
/// update or delete operation anywhere in the system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Requested service category. The UI offers a closed list
    /// (custom-fabrication, structural-steel, precision-manufacturing,
    /// architectural-metalwork, other) but the backend accepts free text.
    pub service: Option<String>,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

/// Raw submission fields as they arrive from the wire, before validation.
/// Required fields are `Option` here so that "missing" surfaces as a
/// per-field issue instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
}

/// A submission that passed validation and is ready to persist.
/// Only constructible through [`NewSubmission::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: String,
}

impl NewSubmission {
    /// Validates raw input into a well-formed submission, collecting every
    /// field issue instead of stopping at the first.
    pub fn parse(input: SubmissionInput) -> Result<Self, ValidationError> {
        let mut issues = Vec::new();

        let name = required_text("name", input.name, MAX_NAME_LEN, &mut issues);

        let email = match input.email.as_deref().map(str::trim) {
            None | Some("") => {
                issues.push(FieldIssue::new("email", "is required"));
                None
            }
            Some(raw) if raw.len() > MAX_EMAIL_LEN => {
                issues.push(FieldIssue::new(
                    "email",
                    format!("must be at most {MAX_EMAIL_LEN} characters"),
                ));
                None
            }
            Some(raw) if !is_valid_email(raw) => {
                issues.push(FieldIssue::new("email", "must be a valid email address"));
                None
            }
            Some(raw) => Some(raw.to_string()),
        };

        let message = required_text("message", input.message, MAX_MESSAGE_LEN, &mut issues);

        let phone = optional_text("phone", input.phone, MAX_PHONE_LEN, &mut issues);
        let service = optional_text("service", input.service, MAX_SERVICE_LEN, &mut issues);

        if !issues.is_empty() {
            return Err(ValidationError { issues });
        }

        // All three are Some when no issue was recorded for them.
        match (name, email, message) {
            (Some(name), Some(email), Some(message)) => Ok(Self {
                name,
                email,
                phone,
                service,
                message,
            }),
            _ => Err(ValidationError {
                issues: vec![FieldIssue::new("body", "incomplete submission")],
            }),
        }
    }
}

fn required_text(
    field: &'static str,
    value: Option<String>,
    max_len: usize,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    match value.as_deref().map(str::trim) {
        None | Some("") => {
            issues.push(FieldIssue::new(field, "is required"));
            None
        }
        Some(trimmed) if trimmed.len() > max_len => {
            issues.push(FieldIssue::new(
                field,
                format!("must be at most {max_len} characters"),
            ));
            None
        }
        Some(trimmed) => Some(trimmed.to_string()),
    }
}

fn optional_text(
    field: &'static str,
    value: Option<String>,
    max_len: usize,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    match value.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(trimmed) if trimmed.len() > max_len => {
            issues.push(FieldIssue::new(
                field,
                format!("must be at most {max_len} characters"),
            ));
            None
        }
        Some(trimmed) => Some(trimmed.to_string()),
    }
}

/// Minimal well-formed email shape: one `@`, non-empty local part, a dotted
/// domain, and no whitespace. Deliverability is the mail provider's problem.
fn is_valid_email(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.split('.').count() >= 2 && domain.split('.').all(|label| !label.is_empty())
}
