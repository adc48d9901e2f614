//! # storage-adapters
//!
//! Interchangeable implementations of the `SubmissionRepo` port: an
//! in-memory store for tests and credential-less deployments, and a
//! Postgres store behind the `db-postgres` feature.

pub mod memory;

#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use memory::InMemorySubmissionRepo;

#[cfg(feature = "db-postgres")]
pub use postgres::PgSubmissionRepo;
