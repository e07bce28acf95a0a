//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Read-heavy endpoints use the flat `*WithRefs` structs, which join the
//! referenced names (category, area, usernames) into a single row.

pub mod area;
pub mod article;
pub mod assignment;
pub mod category;
pub mod dashboard;
pub mod equipment;
pub mod maintenance;
pub mod movement;
pub mod role;
pub mod session;
pub mod user;
