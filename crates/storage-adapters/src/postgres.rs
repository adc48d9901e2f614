//! Postgres submission store.
//!
//! Each operation is a single statement (one insert or one select-all), so
//! no transaction discipline is needed beyond the pool's own connection
//! management. The schema ships as an embedded sqlx migration.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::FromRow;
use uuid::Uuid;

use domains::{ContactSubmission, NewSubmission, StorageError, SubmissionRepo};

/// Row shape of the `contact_submissions` table.
#[derive(Debug, FromRow)]
struct SubmissionRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    service: Option<String>,
    message: String,
    submitted_at: DateTime<Utc>,
}

impl From<SubmissionRow> for ContactSubmission {
    fn from(row: SubmissionRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            service: row.service,
            message: row.message,
            submitted_at: row.submitted_at,
        }
    }
}

pub struct PgSubmissionRepo {
    pool: PgPool,
}

impl PgSubmissionRepo {
    /// Wraps an already-initialized pool. The pool is created once at
    /// startup and owned by the binary, which also closes it on shutdown.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations for this adapter's schema.
    pub async fn run_migrations(pool: &PgPool) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|err| StorageError::Unavailable(err.to_string()))
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    match err {
        sqlx::Error::Database(db) if db.constraint().is_some() => {
            StorageError::Constraint(db.to_string())
        }
        other => StorageError::Unavailable(other.to_string()),
    }
}

#[async_trait]
impl SubmissionRepo for PgSubmissionRepo {
    #[tracing::instrument(name = "Insert contact submission", skip(self, submission))]
    async fn create(&self, submission: NewSubmission) -> Result<ContactSubmission, StorageError> {
        let row = sqlx::query_as::<_, SubmissionRow>(
            "INSERT INTO contact_submissions \
                 (id, name, email, phone, service, message, submitted_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, name, email, phone, service, message, submitted_at",
        )
        .bind(Uuid::now_v7())
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.phone)
        .bind(&submission.service)
        .bind(&submission.message)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    #[tracing::instrument(name = "Fetch all contact submissions", skip(self))]
    async fn list_all(&self) -> Result<Vec<ContactSubmission>, StorageError> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            "SELECT id, name, email, phone, service, message, submitted_at \
             FROM contact_submissions",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
