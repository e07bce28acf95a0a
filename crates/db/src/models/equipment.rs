//! Equipment entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use depot_core::types::{DbId, Timestamp};

/// An equipment row from the `equipment` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Equipment {
    pub id: DbId,
    pub inventory_code: String,
    pub equipment_type: String,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub status: String,
    pub description: String,
    /// Free-form technical specs (CPU, capacity, calibration data).
    pub specs: Option<serde_json::Value>,
    pub area_id: DbId,
    /// Set by the assignment engine; overwritten by the next assignment.
    pub assigned_user_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Equipment row with area and assignee names resolved, for read endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EquipmentWithRefs {
    pub id: DbId,
    pub inventory_code: String,
    pub equipment_type: String,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub status: String,
    pub description: String,
    pub specs: Option<serde_json::Value>,
    pub area_id: DbId,
    pub area_name: String,
    pub assigned_user_id: Option<DbId>,
    pub assigned_username: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating new equipment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEquipment {
    pub inventory_code: String,
    pub equipment_type: String,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub description: String,
    pub specs: Option<serde_json::Value>,
    pub area_id: DbId,
    /// Defaults to `available` when omitted.
    pub status: Option<String>,
}

/// DTO for updating equipment. All fields are optional. `status` here is the
/// unguarded direct edit; the lifecycle operations have their own paths.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEquipment {
    pub inventory_code: Option<String>,
    pub equipment_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub description: Option<String>,
    pub specs: Option<serde_json::Value>,
    pub area_id: Option<DbId>,
    pub status: Option<String>,
    pub is_active: Option<bool>,
}

/// Filter parameters for equipment listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EquipmentQuery {
    pub status: Option<String>,
    pub area_id: Option<DbId>,
    #[serde(default)]
    pub include_inactive: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
