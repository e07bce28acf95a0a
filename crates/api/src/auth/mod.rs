//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation, validation, and refresh-token helpers.
//! - [`sweeper`] -- background purge of expired sessions.

pub mod jwt;
pub mod password;
pub mod sweeper;
