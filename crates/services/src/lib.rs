//! # services
//!
//! Orchestration between the web boundary and the ports: validate input,
//! persist, then dispatch notifications without blocking the caller.

pub mod contact;

pub use contact::{ContactService, SubmitError};
