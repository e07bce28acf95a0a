//! Domain types, error taxonomy, and invariants for the depot inventory
//! tracker.
//!
//! This crate has no database or HTTP dependencies, so the repository layer,
//! the API, and tests can all share the same rules: stock arithmetic, status
//! machines, the authorization table, and input validation.

pub mod access;
pub mod article;
pub mod equipment;
pub mod error;
pub mod pagination;
pub mod types;
pub mod validation;

pub use error::CoreError;
pub use types::{DbId, Timestamp};
