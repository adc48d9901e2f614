//! Contact-submission workflow.
//!
//! The flow is a straight line: parse -> store -> respond. The two
//! notification emails are spawned as detached tasks after the store
//! succeeds, so a slow or failing mail provider can never block or fail
//! the user-facing submission.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use domains::{
    ContactSubmission, Mailer, NewSubmission, StorageError, SubmissionInput, SubmissionRepo,
    ValidationError,
};

/// Failure of [`ContactService::submit`]. Notification failures are not
/// represented here: they are observed only by the dispatch tasks' logs.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Coordinates the submission store and the notification dispatcher.
pub struct ContactService {
    repo: Arc<dyn SubmissionRepo>,
    mailer: Arc<dyn Mailer>,
}

impl ContactService {
    pub fn new(repo: Arc<dyn SubmissionRepo>, mailer: Arc<dyn Mailer>) -> Self {
        Self { repo, mailer }
    }

    /// Validates and persists a submission, then fires the admin alert and
    /// customer auto-reply without awaiting either.
    ///
    /// A storage error aborts the request before any notification is
    /// attempted; there is no partial record and no stray email.
    pub async fn submit(&self, input: SubmissionInput) -> Result<ContactSubmission, SubmitError> {
        let validated = NewSubmission::parse(input)?;
        let stored = self.repo.create(validated).await?;
        info!(id = %stored.id, "contact submission stored");

        self.dispatch_notifications(&stored);
        Ok(stored)
    }

    /// Returns every stored submission, in the store's natural order.
    pub async fn list_all(&self) -> Result<Vec<ContactSubmission>, StorageError> {
        self.repo.list_all().await
    }

    /// Fire-and-forget dispatch: two independent tasks, each with its own
    /// observe-only error boundary. At-most-once per submission; failures
    /// are logged and never retried.
    fn dispatch_notifications(&self, submission: &ContactSubmission) {
        let mailer = Arc::clone(&self.mailer);
        let s = submission.clone();
        tokio::spawn(async move {
            match mailer.send_admin_alert(&s).await {
                Ok(()) => info!(id = %s.id, "admin alert sent"),
                Err(err) => error!(id = %s.id, error = %err, "admin alert failed"),
            }
        });

        let mailer = Arc::clone(&self.mailer);
        let s = submission.clone();
        tokio::spawn(async move {
            match mailer.send_customer_reply(&s).await {
                Ok(()) => info!(id = %s.id, email = %s.email, "auto-reply sent"),
                Err(err) => error!(id = %s.id, error = %err, "auto-reply failed"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domains::{MailError, MockMailer, MockSubmissionRepo};
    use std::time::Duration;
    use uuid::Uuid;

    fn input() -> SubmissionInput {
        SubmissionInput {
            name: Some("Ravi Patel".into()),
            email: Some("ravi@example.com".into()),
            phone: None,
            service: Some("custom-fabrication".into()),
            message: Some("Need a quote for railing work.".into()),
        }
    }

    fn stored(new: &NewSubmission) -> ContactSubmission {
        ContactSubmission {
            id: Uuid::now_v7(),
            name: new.name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            service: new.service.clone(),
            message: new.message.clone(),
            submitted_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn submit_stores_then_dispatches_both_notifications_once() {
        let mut repo = MockSubmissionRepo::new();
        repo.expect_create()
            .times(1)
            .returning(|new| Ok(stored(&new)));

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut mailer = MockMailer::new();
        let admin_tx = tx.clone();
        mailer
            .expect_send_admin_alert()
            .times(1)
            .returning(move |_| {
                admin_tx.send("admin").ok();
                Ok(())
            });
        mailer
            .expect_send_customer_reply()
            .times(1)
            .returning(move |_| {
                tx.send("reply").ok();
                Ok(())
            });

        let service = ContactService::new(Arc::new(repo), Arc::new(mailer));
        let result = service.submit(input()).await.unwrap();
        assert_eq!(result.name, "Ravi Patel");

        // Both detached tasks settle exactly once.
        let mut seen = Vec::new();
        for _ in 0..2 {
            seen.push(
                tokio::time::timeout(Duration::from_secs(1), rx.recv())
                    .await
                    .expect("notification task did not run")
                    .unwrap(),
            );
        }
        seen.sort();
        assert_eq!(seen, vec!["admin", "reply"]);

        // No retry: the channel stays silent afterwards.
        let extra = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(extra.is_err(), "unexpected second notification attempt");
    }

    #[tokio::test]
    async fn submit_rejects_invalid_input_without_touching_the_store() {
        let mut repo = MockSubmissionRepo::new();
        repo.expect_create().never();
        let mut mailer = MockMailer::new();
        mailer.expect_send_admin_alert().never();
        mailer.expect_send_customer_reply().never();

        let service = ContactService::new(Arc::new(repo), Arc::new(mailer));
        let err = service.submit(SubmissionInput::default()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Validation(_)));
    }

    #[tokio::test]
    async fn storage_failure_aborts_before_any_notification() {
        let mut repo = MockSubmissionRepo::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(StorageError::Unavailable("pool closed".into())));
        let mut mailer = MockMailer::new();
        mailer.expect_send_admin_alert().never();
        mailer.expect_send_customer_reply().never();

        let service = ContactService::new(Arc::new(repo), Arc::new(mailer));
        let err = service.submit(input()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Storage(_)));
    }

    #[tokio::test]
    async fn mailer_failure_does_not_fail_the_submission() {
        let mut repo = MockSubmissionRepo::new();
        repo.expect_create()
            .times(1)
            .returning(|new| Ok(stored(&new)));

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut mailer = MockMailer::new();
        let admin_tx = tx.clone();
        mailer
            .expect_send_admin_alert()
            .times(1)
            .returning(move |_| {
                admin_tx.send(()).ok();
                Err(MailError::Transport("timed out after 10s".into()))
            });
        mailer
            .expect_send_customer_reply()
            .times(1)
            .returning(move |_| {
                tx.send(()).ok();
                Err(MailError::Provider("401 unauthorized".into()))
            });

        let service = ContactService::new(Arc::new(repo), Arc::new(mailer));
        assert!(service.submit(input()).await.is_ok());

        for _ in 0..2 {
            tokio::time::timeout(Duration::from_secs(1), rx.recv())
                .await
                .expect("notification task did not run");
        }
    }
}
