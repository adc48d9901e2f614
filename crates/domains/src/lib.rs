//! # domains
//!
//! The central entities, validation rules, and port definitions for the
//! fabsite contact backend. Adapters (storage, mail, web) depend on this
//! crate; it depends on nothing but data-representation crates.

pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
