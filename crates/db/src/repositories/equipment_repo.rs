//! Repository for the `equipment` table and the lifecycle engines.
//!
//! Assignments and maintenance reports both mutate the equipment row, so
//! those writes live here as transactions that lock the equipment first.
//! Plain CRUD has no transition guard; only the lifecycle operations drive
//! the status machine.

use sqlx::{PgPool, Postgres, Transaction};

use depot_core::equipment::{equipment_status_after_maintenance, MaintenanceStatus};
use depot_core::types::DbId;
use depot_core::validation::validate_required;
use depot_core::CoreError;

use crate::error::DbError;
use crate::models::assignment::{Assignment, CreateAssignment};
use crate::models::equipment::{
    CreateEquipment, Equipment, EquipmentQuery, EquipmentWithRefs, UpdateEquipment,
};
use crate::models::maintenance::{CreateMaintenance, MaintenanceRecord, UpdateMaintenance};
use crate::repositories::{assignment_repo, maintenance_repo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, inventory_code, equipment_type, brand, model, serial_number, \
    status, description, specs, area_id, assigned_user_id, is_active, created_at, updated_at";

/// Column list for the area/assignee-resolved view. The area join is INNER
/// (a real FK), the user join LEFT (nullable).
const WITH_REFS_COLUMNS: &str = "e.id, e.inventory_code, e.equipment_type, e.brand, e.model, \
    e.serial_number, e.status, e.description, e.specs, e.area_id, ar.name AS area_name, \
    e.assigned_user_id, u.username AS assigned_username, e.is_active, e.created_at, \
    e.updated_at";

/// Provides CRUD operations for equipment plus the transactional
/// assignment and maintenance engines.
pub struct EquipmentRepo;

impl EquipmentRepo {
    // ── Standard CRUD ────────────────────────────────────────────────

    /// Insert new equipment. Status defaults to `available` when omitted.
    pub async fn create(pool: &PgPool, input: &CreateEquipment) -> Result<Equipment, sqlx::Error> {
        let query = format!(
            "INSERT INTO equipment
                (inventory_code, equipment_type, brand, model, serial_number, status,
                 description, specs, area_id)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'available'), $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(&input.inventory_code)
            .bind(&input.equipment_type)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(&input.serial_number)
            .bind(&input.status)
            .bind(&input.description)
            .bind(&input.specs)
            .bind(input.area_id)
            .fetch_one(pool)
            .await
    }

    /// Find equipment by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment WHERE id = $1");
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find equipment by its unique inventory code.
    pub async fn find_by_inventory_code(
        pool: &PgPool,
        inventory_code: &str,
    ) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment WHERE inventory_code = $1");
        sqlx::query_as::<_, Equipment>(&query)
            .bind(inventory_code)
            .fetch_optional(pool)
            .await
    }

    /// Find equipment by ID with area and assignee names resolved.
    pub async fn find_by_id_with_refs(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EquipmentWithRefs>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_REFS_COLUMNS} FROM equipment e
             JOIN areas ar ON e.area_id = ar.id
             LEFT JOIN users u ON e.assigned_user_id = u.id
             WHERE e.id = $1"
        );
        sqlx::query_as::<_, EquipmentWithRefs>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List equipment with optional status and area filters, ordered by
    /// inventory code. Inactive units are excluded unless requested.
    pub async fn list(
        pool: &PgPool,
        params: &EquipmentQuery,
    ) -> Result<Vec<EquipmentWithRefs>, sqlx::Error> {
        let limit = depot_core::pagination::clamp_limit(
            params.limit,
            depot_core::pagination::DEFAULT_LIST_LIMIT,
            depot_core::pagination::MAX_LIST_LIMIT,
        );
        let offset = depot_core::pagination::clamp_offset(params.offset);

        let query = format!(
            "SELECT {WITH_REFS_COLUMNS} FROM equipment e
             JOIN areas ar ON e.area_id = ar.id
             LEFT JOIN users u ON e.assigned_user_id = u.id
             WHERE ($1::TEXT IS NULL OR e.status = $1)
               AND ($2::BIGINT IS NULL OR e.area_id = $2)
               AND ($3::BOOL OR e.is_active = true)
             ORDER BY e.inventory_code ASC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, EquipmentWithRefs>(&query)
            .bind(params.status.as_deref())
            .bind(params.area_id)
            .bind(params.include_inactive)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update equipment. Only non-`None` fields in `input` are applied.
    /// `status` changes here bypass the lifecycle machine on purpose.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEquipment,
    ) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!(
            "UPDATE equipment SET
                inventory_code = COALESCE($2, inventory_code),
                equipment_type = COALESCE($3, equipment_type),
                brand = COALESCE($4, brand),
                model = COALESCE($5, model),
                serial_number = COALESCE($6, serial_number),
                description = COALESCE($7, description),
                specs = COALESCE($8, specs),
                area_id = COALESCE($9, area_id),
                status = COALESCE($10, status),
                is_active = COALESCE($11, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .bind(&input.inventory_code)
            .bind(&input.equipment_type)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(&input.serial_number)
            .bind(&input.description)
            .bind(&input.specs)
            .bind(input.area_id)
            .bind(&input.status)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete equipment. Returns `true` if a row was removed.
    ///
    /// Assignment and maintenance history referencing the unit is left in
    /// place (loose refs).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Lifecycle engines ────────────────────────────────────────────

    /// Assign equipment to a user atomically.
    ///
    /// Inserts an assignment row and sets `assigned_user_id` plus
    /// `status = in_use` in one transaction. Any current status is
    /// assignable; reassignment just layers a new history row.
    pub async fn assign(
        pool: &PgPool,
        equipment_id: DbId,
        actor_id: DbId,
        input: &CreateAssignment,
    ) -> Result<(Assignment, Equipment), DbError> {
        let mut tx = pool.begin().await?;

        lock_equipment(&mut tx, equipment_id).await?;
        ensure_user_exists(&mut tx, input.assigned_to).await?;
        ensure_user_exists(&mut tx, actor_id).await?;

        let insert = format!(
            "INSERT INTO assignments (equipment_id, assigned_by, assigned_to, notes)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            assignment_repo::COLUMNS
        );
        let assignment = sqlx::query_as::<_, Assignment>(&insert)
            .bind(equipment_id)
            .bind(actor_id)
            .bind(input.assigned_to)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        let update = format!(
            "UPDATE equipment SET assigned_user_id = $2, status = 'in_use'
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let equipment = sqlx::query_as::<_, Equipment>(&update)
            .bind(equipment_id)
            .bind(input.assigned_to)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((assignment, equipment))
    }

    /// Open a maintenance record for equipment atomically.
    ///
    /// The record starts `pending` but the equipment goes to
    /// `in_maintenance` immediately.
    pub async fn report_maintenance(
        pool: &PgPool,
        equipment_id: DbId,
        reporter_id: DbId,
        input: &CreateMaintenance,
    ) -> Result<(MaintenanceRecord, Equipment), DbError> {
        validate_required("problem_description", &input.problem_description)?;

        let mut tx = pool.begin().await?;

        lock_equipment(&mut tx, equipment_id).await?;
        ensure_user_exists(&mut tx, reporter_id).await?;
        if let Some(technician_id) = input.technician_id {
            ensure_user_exists(&mut tx, technician_id).await?;
        }

        let insert = format!(
            "INSERT INTO maintenance_records
                (equipment_id, reported_by, technician_id, problem_description, cost, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            maintenance_repo::COLUMNS
        );
        let record = sqlx::query_as::<_, MaintenanceRecord>(&insert)
            .bind(equipment_id)
            .bind(reporter_id)
            .bind(input.technician_id)
            .bind(&input.problem_description)
            .bind(input.cost)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        let update = format!(
            "UPDATE equipment SET status = 'in_maintenance'
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let equipment = sqlx::query_as::<_, Equipment>(&update)
            .bind(equipment_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((record, equipment))
    }

    /// Update a maintenance record and apply the status side effect to the
    /// equipment in the same transaction.
    ///
    /// Side-effect table: `completed`/`cancelled` put the equipment back to
    /// `available`, `in_progress` keeps it `in_maintenance`, `pending`
    /// leaves it untouched. Returns the equipment only when it was updated;
    /// orphaned records (equipment hard-deleted) update fine with `None`.
    pub async fn update_maintenance(
        pool: &PgPool,
        record_id: DbId,
        input: &UpdateMaintenance,
    ) -> Result<(MaintenanceRecord, Option<Equipment>), DbError> {
        let new_status = match &input.status {
            Some(status) => Some(MaintenanceStatus::from_str(status)?),
            None => None,
        };

        let mut tx = pool.begin().await?;

        // Lock the record row so concurrent status updates serialize.
        let locked: Option<(DbId,)> = sqlx::query_as(
            "SELECT equipment_id FROM maintenance_records WHERE id = $1 FOR UPDATE",
        )
        .bind(record_id)
        .fetch_optional(&mut *tx)
        .await?;

        let equipment_id = match locked {
            Some((equipment_id,)) => equipment_id,
            None => {
                return Err(CoreError::NotFound {
                    entity: "maintenance record",
                    id: record_id,
                }
                .into())
            }
        };

        if let Some(technician_id) = input.technician_id {
            ensure_user_exists(&mut tx, technician_id).await?;
        }

        let update_record = format!(
            "UPDATE maintenance_records SET
                status = COALESCE($2, status),
                ended_at = COALESCE($3, ended_at),
                technician_id = COALESCE($4, technician_id),
                cost = COALESCE($5, cost),
                notes = COALESCE($6, notes)
             WHERE id = $1
             RETURNING {}",
            maintenance_repo::COLUMNS
        );
        let record = sqlx::query_as::<_, MaintenanceRecord>(&update_record)
            .bind(record_id)
            .bind(input.status.as_deref())
            .bind(input.ended_at)
            .bind(input.technician_id)
            .bind(input.cost)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        let equipment = match new_status.and_then(equipment_status_after_maintenance) {
            Some(next) => {
                let update_equipment = format!(
                    "UPDATE equipment SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
                );
                // fetch_optional: the equipment may have been hard-deleted.
                sqlx::query_as::<_, Equipment>(&update_equipment)
                    .bind(equipment_id)
                    .bind(next.as_str())
                    .fetch_optional(&mut *tx)
                    .await?
            }
            None => None,
        };

        tx.commit().await?;
        Ok((record, equipment))
    }
}

// ---------------------------------------------------------------------------
// Transaction helpers
// ---------------------------------------------------------------------------

/// Lock the equipment row for the duration of the transaction, failing with
/// `NotFound` if it does not exist.
async fn lock_equipment(
    tx: &mut Transaction<'_, Postgres>,
    equipment_id: DbId,
) -> Result<(), DbError> {
    let locked: Option<(DbId,)> =
        sqlx::query_as("SELECT id FROM equipment WHERE id = $1 FOR UPDATE")
            .bind(equipment_id)
            .fetch_optional(&mut **tx)
            .await?;
    if locked.is_none() {
        return Err(CoreError::NotFound {
            entity: "equipment",
            id: equipment_id,
        }
        .into());
    }
    Ok(())
}

/// Fail with `Reference` if the given user ID does not resolve.
async fn ensure_user_exists(
    tx: &mut Transaction<'_, Postgres>,
    user_id: DbId,
) -> Result<(), DbError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await?;
    if !exists {
        return Err(CoreError::Reference {
            entity: "user",
            id: user_id,
        }
        .into());
    }
    Ok(())
}
