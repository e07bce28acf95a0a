//! Stock movement entity model and DTOs.
//!
//! Movements are the append-only ledger behind `articles.stock_current`.
//! `movement_type`, `quantity`, and the captured `stock_before`/`stock_after`
//! pair are frozen at insert time; only the descriptive fields may change
//! afterwards, so the ledger can never be edited out of sync with the
//! counter.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use depot_core::types::{DbId, Timestamp};

/// A movement row from the `movements` table.
///
/// `article_id` and `user_id` are loose references: hard-deleting the
/// article or user leaves the row in place.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movement {
    pub id: DbId,
    pub article_id: DbId,
    /// The acting user who recorded the movement.
    pub user_id: DbId,
    pub movement_type: String,
    pub quantity: i32,
    pub stock_before: i32,
    pub stock_after: i32,
    pub reason: String,
    /// External document reference (delivery note, work order).
    pub reference: Option<String>,
    pub origin_location: Option<String>,
    pub destination_location: Option<String>,
    /// Free-text recipient for assignment-type movements.
    pub assigned_to: Option<String>,
    pub received_by: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// Movement row with article and actor names resolved, for the global
/// ledger listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovementWithRefs {
    pub id: DbId,
    pub article_id: DbId,
    pub user_id: DbId,
    pub movement_type: String,
    pub quantity: i32,
    pub stock_before: i32,
    pub stock_after: i32,
    pub reason: String,
    pub reference: Option<String>,
    pub origin_location: Option<String>,
    pub destination_location: Option<String>,
    pub assigned_to: Option<String>,
    pub received_by: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub article_code: Option<String>,
    pub article_name: Option<String>,
    pub actor_username: Option<String>,
}

/// DTO for recording a movement. The article comes from the URL and the
/// actor from the authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovement {
    pub movement_type: String,
    pub quantity: i32,
    pub reason: String,
    pub reference: Option<String>,
    pub origin_location: Option<String>,
    pub destination_location: Option<String>,
    pub assigned_to: Option<String>,
    pub received_by: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a movement's descriptive fields. Quantity, type, and the
/// stock snapshot are not representable here.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMovement {
    pub reason: Option<String>,
    pub reference: Option<String>,
    pub origin_location: Option<String>,
    pub destination_location: Option<String>,
    pub assigned_to: Option<String>,
    pub received_by: Option<String>,
    pub notes: Option<String>,
}

/// Filter parameters for ledger queries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementQuery {
    pub article_id: Option<DbId>,
    pub movement_type: Option<String>,
    pub user_id: Option<DbId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
