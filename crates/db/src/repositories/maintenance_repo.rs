//! Repository for the `maintenance_records` table.
//!
//! Records are inserted by `EquipmentRepo::report_maintenance` and updated
//! by `EquipmentRepo::update_maintenance`, because both touch the equipment
//! status. Reads and deletes have no side effect and live here.

use sqlx::PgPool;

use depot_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use depot_core::types::DbId;

use crate::models::maintenance::{MaintenanceQuery, MaintenanceRecord, MaintenanceWithRefs};

/// Column list shared across queries to avoid repetition. `pub(crate)` so the
/// equipment engine can reuse it for `INSERT`/`UPDATE ... RETURNING`.
pub(crate) const COLUMNS: &str = "id, equipment_id, reported_by, technician_id, started_at, \
    ended_at, problem_description, status, cost, notes, created_at";

/// Column list for the resolved view. LEFT JOINs because equipment and user
/// references are loose and may dangle after hard deletes.
const WITH_REFS_COLUMNS: &str = "r.id, r.equipment_id, r.reported_by, r.technician_id, \
    r.started_at, r.ended_at, r.problem_description, r.status, r.cost, r.notes, \
    r.created_at, e.inventory_code, p.username AS reported_by_username, \
    t.username AS technician_username";

/// Provides read and delete operations for maintenance records.
pub struct MaintenanceRepo;

impl MaintenanceRepo {
    /// Find a maintenance record by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maintenance_records WHERE id = $1");
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all maintenance records for one piece of equipment, newest first.
    pub async fn list_by_equipment(
        pool: &PgPool,
        equipment_id: DbId,
    ) -> Result<Vec<MaintenanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_records
             WHERE equipment_id = $1
             ORDER BY started_at DESC, id DESC"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(equipment_id)
            .fetch_all(pool)
            .await
    }

    /// Query the maintenance history with optional filters and pagination,
    /// newest first.
    pub async fn query(
        pool: &PgPool,
        params: &MaintenanceQuery,
    ) -> Result<Vec<MaintenanceWithRefs>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(params.offset);

        let query = format!(
            "SELECT {WITH_REFS_COLUMNS} FROM maintenance_records r
             LEFT JOIN equipment e ON r.equipment_id = e.id
             LEFT JOIN users p ON r.reported_by = p.id
             LEFT JOIN users t ON r.technician_id = t.id
             WHERE ($1::BIGINT IS NULL OR r.equipment_id = $1)
               AND ($2::TEXT IS NULL OR r.status = $2)
               AND ($3::BIGINT IS NULL OR r.technician_id = $3)
             ORDER BY r.started_at DESC, r.id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, MaintenanceWithRefs>(&query)
            .bind(params.equipment_id)
            .bind(params.status.as_deref())
            .bind(params.technician_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count maintenance records in the given statuses.
    pub async fn count_by_status(pool: &PgPool, statuses: &[&str]) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM maintenance_records WHERE status = ANY($1)",
        )
        .bind(statuses)
        .fetch_one(pool)
        .await
    }

    /// Permanently delete a maintenance record. Returns `true` if a row was
    /// removed.
    ///
    /// Deleting never reverts the equipment status; whatever state the
    /// report/update cycle left the equipment in stands.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM maintenance_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
