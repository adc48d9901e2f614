//! In-memory submission store.
//!
//! Holds every record in insertion order, which keeps `list_all` stable
//! within a single process run. Suitable for tests and for running the
//! site without a database (records are lost on restart).

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use domains::{ContactSubmission, NewSubmission, StorageError, SubmissionRepo};

#[derive(Default)]
pub struct InMemorySubmissionRepo {
    rows: Mutex<Vec<ContactSubmission>>,
}

impl InMemorySubmissionRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionRepo for InMemorySubmissionRepo {
    async fn create(&self, submission: NewSubmission) -> Result<ContactSubmission, StorageError> {
        let stored = ContactSubmission {
            id: Uuid::now_v7(),
            name: submission.name,
            email: submission.email,
            phone: submission.phone,
            service: submission.service,
            message: submission.message,
            submitted_at: Utc::now(),
        };

        let mut rows = self
            .rows
            .lock()
            .map_err(|_| StorageError::Unavailable("submission store poisoned".into()))?;
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<ContactSubmission>, StorageError> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| StorageError::Unavailable("submission store poisoned".into()))?;
        Ok(rows.clone())
    }
}
