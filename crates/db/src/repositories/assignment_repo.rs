//! Repository for the `assignments` table (equipment hand-over history).
//!
//! Assignment rows are inserted exclusively by `EquipmentRepo::assign`; this
//! repository only reads the history.

use sqlx::PgPool;

use depot_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use depot_core::types::DbId;

use crate::models::assignment::{Assignment, AssignmentQuery, AssignmentWithRefs};

/// Column list shared across queries to avoid repetition. `pub(crate)` so the
/// equipment engine can reuse it for its `INSERT ... RETURNING`.
pub(crate) const COLUMNS: &str =
    "id, equipment_id, assigned_by, assigned_to, assigned_at, returned_at, notes";

/// Column list for the resolved history view. LEFT JOINs because equipment
/// and user references are loose and may dangle after hard deletes.
const WITH_REFS_COLUMNS: &str = "s.id, s.equipment_id, s.assigned_by, s.assigned_to, \
    s.assigned_at, s.returned_at, s.notes, e.inventory_code, \
    b.username AS assigned_by_username, t.username AS assigned_to_username";

/// Provides read operations for equipment assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Find an assignment by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignments WHERE id = $1");
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all assignments for one piece of equipment, newest first.
    pub async fn list_by_equipment(
        pool: &PgPool,
        equipment_id: DbId,
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments
             WHERE equipment_id = $1
             ORDER BY assigned_at DESC, id DESC"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(equipment_id)
            .fetch_all(pool)
            .await
    }

    /// Query the assignment history with filtering and pagination, newest
    /// first. Both filters are IDs, so binds stay homogeneous.
    pub async fn query(
        pool: &PgPool,
        params: &AssignmentQuery,
    ) -> Result<Vec<AssignmentWithRefs>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(params.offset);

        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;
        let mut bind_values: Vec<DbId> = Vec::new();

        if let Some(equipment_id) = params.equipment_id {
            conditions.push(format!("s.equipment_id = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(equipment_id);
        }

        if let Some(assigned_to) = params.assigned_to {
            conditions.push(format!("s.assigned_to = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(assigned_to);
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {WITH_REFS_COLUMNS} FROM assignments s
             LEFT JOIN equipment e ON s.equipment_id = e.id
             LEFT JOIN users b ON s.assigned_by = b.id
             LEFT JOIN users t ON s.assigned_to = t.id
             {where_clause}
             ORDER BY s.assigned_at DESC, s.id DESC
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, AssignmentWithRefs>(&query);
        for val in &bind_values {
            q = q.bind(*val);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }
}
