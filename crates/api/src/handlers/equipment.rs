//! Handlers for the `/equipment` resource: tracked units with a status
//! lifecycle, assignment history, and maintenance log.
//!
//! Status changes come in two flavours with different rules: the lifecycle
//! operations (`assign`, `report_maintenance`) apply their fixed side effects
//! inside one transaction, while a plain `PUT` may set any valid status
//! directly without preconditions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use depot_core::access;
use depot_core::equipment::validate_equipment_status;
use depot_core::error::CoreError;
use depot_core::types::DbId;
use depot_core::validation::{validate_name, validate_required};
use depot_db::models::assignment::{Assignment, CreateAssignment};
use depot_db::models::equipment::{
    CreateEquipment, Equipment, EquipmentQuery, EquipmentWithRefs, UpdateEquipment,
};
use depot_db::models::maintenance::{CreateMaintenance, MaintenanceRecord};
use depot_db::repositories::{AreaRepo, AssignmentRepo, EquipmentRepo, MaintenanceRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::require;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response for `POST /equipment/{id}/assign`: the created history row plus
/// the equipment as the transaction left it.
#[derive(Debug, Serialize)]
pub struct AssignOutcome {
    pub assignment: Assignment,
    pub equipment: Equipment,
}

/// Response for `POST /equipment/{id}/maintenance`.
#[derive(Debug, Serialize)]
pub struct MaintenanceOutcome {
    pub record: MaintenanceRecord,
    pub equipment: Equipment,
}

// ---------------------------------------------------------------------------
// CRUD handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/equipment
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    require(&user, access::OP_EQUIPMENT_CREATE)?;

    validate_name("inventory_code", &input.inventory_code)?;
    validate_required("equipment_type", &input.equipment_type)?;
    validate_required("serial_number", &input.serial_number)?;
    if let Some(status) = &input.status {
        validate_equipment_status(status)?;
    }
    ensure_area_exists(&state, input.area_id).await?;

    let equipment = EquipmentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// GET /api/v1/equipment
///
/// Supports `?status=&area_id=&include_inactive=&limit=&offset=`.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<EquipmentQuery>,
) -> AppResult<Json<Vec<EquipmentWithRefs>>> {
    let equipment = EquipmentRepo::list(&state.pool, &params).await?;
    Ok(Json(equipment))
}

/// GET /api/v1/equipment/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<EquipmentWithRefs>> {
    let equipment = EquipmentRepo::find_by_id_with_refs(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "equipment",
            id,
        }))?;
    Ok(Json(equipment))
}

/// PUT /api/v1/equipment/{id}
///
/// Direct edits, including `status`. The value must be a known status but no
/// transition rule applies here; the lifecycle table only binds the
/// assignment and maintenance operations.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    require(&user, access::OP_EQUIPMENT_UPDATE)?;

    if let Some(inventory_code) = &input.inventory_code {
        validate_name("inventory_code", inventory_code)?;
    }
    if let Some(status) = &input.status {
        validate_equipment_status(status)?;
    }
    if let Some(area_id) = input.area_id {
        ensure_area_exists(&state, area_id).await?;
    }

    let equipment = EquipmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "equipment",
            id,
        }))?;
    Ok(Json(equipment))
}

/// DELETE /api/v1/equipment/{id}
///
/// Hard delete. Assignment and maintenance history reference the unit
/// loosely and survive.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require(&user, access::OP_EQUIPMENT_DELETE)?;

    let deleted = EquipmentRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "equipment",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Lifecycle handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/equipment/{id}/assign
///
/// Record an assignment and move the unit to `in_use` atomically. Reassigning
/// already-assigned equipment is allowed and layers history.
pub async fn assign(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateAssignment>,
) -> AppResult<(StatusCode, Json<AssignOutcome>)> {
    require(&user, access::OP_EQUIPMENT_ASSIGN)?;

    let (assignment, equipment) =
        EquipmentRepo::assign(&state.pool, id, user.user_id, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(AssignOutcome {
            assignment,
            equipment,
        }),
    ))
}

/// GET /api/v1/equipment/{id}/assignments
///
/// Assignment history of one unit, newest first.
pub async fn list_assignments(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Assignment>>> {
    let assignments = AssignmentRepo::list_by_equipment(&state.pool, id).await?;
    Ok(Json(assignments))
}

/// POST /api/v1/equipment/{id}/maintenance
///
/// Open a maintenance record (`pending`) and move the unit to
/// `in_maintenance` immediately, in one transaction.
pub async fn report_maintenance(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateMaintenance>,
) -> AppResult<(StatusCode, Json<MaintenanceOutcome>)> {
    require(&user, access::OP_MAINTENANCE_REPORT)?;

    if let Some(cost) = input.cost {
        validate_cost(cost)?;
    }

    let (record, equipment) =
        EquipmentRepo::report_maintenance(&state.pool, id, user.user_id, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MaintenanceOutcome { record, equipment }),
    ))
}

/// GET /api/v1/equipment/{id}/maintenance
///
/// Maintenance history of one unit, newest first.
pub async fn maintenance_history(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<MaintenanceRecord>>> {
    let records = MaintenanceRepo::list_by_equipment(&state.pool, id).await?;
    Ok(Json(records))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject with `INVALID_REFERENCE` when the area id points at nothing.
async fn ensure_area_exists(state: &AppState, area_id: DbId) -> AppResult<()> {
    if AreaRepo::find_by_id(&state.pool, area_id).await?.is_none() {
        return Err(AppError::Core(CoreError::Reference {
            entity: "area",
            id: area_id,
        }));
    }
    Ok(())
}

/// Maintenance cost must not be negative.
pub(crate) fn validate_cost(cost: f64) -> Result<(), AppError> {
    if cost < 0.0 {
        return Err(AppError::Core(CoreError::Validation(format!(
            "cost must not be negative, got {cost}"
        ))));
    }
    Ok(())
}
