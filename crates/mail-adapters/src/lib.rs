//! # mail-adapters
//!
//! Implementation of the `Mailer` port against Brevo's transactional-email
//! HTTP API, plus the Askama templates for the two outbound messages.

pub mod brevo;
pub mod templates;

pub use brevo::{BrevoMailer, BrevoSettings};
