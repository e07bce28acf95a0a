//! Area entity model and DTOs.
//!
//! Areas are the physical locations equipment is installed in (warehouse,
//! workshop, office floor).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use depot_core::types::{DbId, Timestamp};

/// An area row from the `areas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Area {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// User accountable for the area, if any.
    pub responsible_user_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new area.
#[derive(Debug, Deserialize)]
pub struct CreateArea {
    pub name: String,
    pub description: Option<String>,
    pub responsible_user_id: Option<DbId>,
}

/// DTO for updating an area. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateArea {
    pub name: Option<String>,
    pub description: Option<String>,
    pub responsible_user_id: Option<DbId>,
}
