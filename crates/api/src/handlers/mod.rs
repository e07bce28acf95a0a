//! Request handlers, one submodule per resource.
//!
//! Handlers authenticate via the [`crate::middleware`] extractors, check the
//! operation gate where they mutate, delegate to the repositories in
//! `depot_db`, and map errors via [`crate::error::AppError`].

pub mod admin;
pub mod areas;
pub mod articles;
pub mod assignments;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod equipment;
pub mod maintenance;
pub mod movements;
pub mod roles;
