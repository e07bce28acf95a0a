//! Maintenance record event model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use depot_core::types::{DbId, Timestamp};

/// A maintenance record row from the `maintenance_records` table.
///
/// Equipment and user references are loose; records survive hard deletes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaintenanceRecord {
    pub id: DbId,
    pub equipment_id: DbId,
    pub reported_by: DbId,
    pub technician_id: Option<DbId>,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub problem_description: String,
    pub status: String,
    pub cost: Option<f64>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// Maintenance record with equipment and user names resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaintenanceWithRefs {
    pub id: DbId,
    pub equipment_id: DbId,
    pub reported_by: DbId,
    pub technician_id: Option<DbId>,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub problem_description: String,
    pub status: String,
    pub cost: Option<f64>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub inventory_code: Option<String>,
    pub reported_by_username: Option<String>,
    pub technician_username: Option<String>,
}

/// DTO for reporting a maintenance problem. The equipment comes from the URL
/// and the reporter from the authenticated user; the record always starts
/// `pending`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMaintenance {
    pub problem_description: String,
    pub technician_id: Option<DbId>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

/// DTO for updating a maintenance record. A `status` change drives the
/// equipment side effect; the other fields are descriptive.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMaintenance {
    pub status: Option<String>,
    pub ended_at: Option<Timestamp>,
    pub technician_id: Option<DbId>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

/// Filter parameters for maintenance history queries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaintenanceQuery {
    pub equipment_id: Option<DbId>,
    pub status: Option<String>,
    pub technician_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
