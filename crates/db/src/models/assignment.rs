//! Equipment assignment event model and DTOs.
//!
//! Assignments are an append-only history. Reassigning equipment inserts a
//! new row; nothing ever sets `returned_at` today, the column records the
//! data model for future return handling.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use depot_core::types::{DbId, Timestamp};

/// An assignment row from the `assignments` table.
///
/// All user/equipment references are loose: rows survive hard deletes of
/// the things they point at.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub id: DbId,
    pub equipment_id: DbId,
    /// The acting user who performed the assignment.
    pub assigned_by: DbId,
    /// The user the equipment was handed to.
    pub assigned_to: DbId,
    pub assigned_at: Timestamp,
    pub returned_at: Option<Timestamp>,
    pub notes: Option<String>,
}

/// Assignment row with equipment and user names resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignmentWithRefs {
    pub id: DbId,
    pub equipment_id: DbId,
    pub assigned_by: DbId,
    pub assigned_to: DbId,
    pub assigned_at: Timestamp,
    pub returned_at: Option<Timestamp>,
    pub notes: Option<String>,
    pub inventory_code: Option<String>,
    pub assigned_by_username: Option<String>,
    pub assigned_to_username: Option<String>,
}

/// DTO for assigning equipment. The equipment comes from the URL and the
/// acting user from the authenticated session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignment {
    pub assigned_to: DbId,
    pub notes: Option<String>,
}

/// Filter parameters for assignment history queries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentQuery {
    pub equipment_id: Option<DbId>,
    pub assigned_to: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
