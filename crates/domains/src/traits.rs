//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be wired into the binary.

use async_trait::async_trait;

use crate::error::{MailError, StorageError};
use crate::models::{ContactSubmission, NewSubmission};

/// Persistence contract for contact submissions.
///
/// Deliberately has no update or delete: submissions are immutable once
/// created and are never removed.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait SubmissionRepo: Send + Sync {
    /// Assigns `id` and `submitted_at`, stores the record, and returns the
    /// stored record including the generated fields.
    async fn create(&self, submission: NewSubmission) -> Result<ContactSubmission, StorageError>;

    /// Returns every stored record. Order is the adapter's natural order;
    /// callers must not rely on it.
    async fn list_all(&self) -> Result<Vec<ContactSubmission>, StorageError>;
}

/// Transactional-email contract. Both operations are best-effort: adapters
/// no-op (with a warning log) when they are not fully configured, and the
/// caller is expected to only log failures.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Notifies the configured admin address about a new submission.
    async fn send_admin_alert(&self, submission: &ContactSubmission) -> Result<(), MailError>;

    /// Acknowledges the submission to the submitter, including a
    /// reply-by-email deep link back to the admin address.
    async fn send_customer_reply(&self, submission: &ContactSubmission) -> Result<(), MailError>;
}
