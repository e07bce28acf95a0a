//! Handlers for the global `/maintenance` resource.
//!
//! Records are opened through `POST /equipment/{id}/maintenance`; this module
//! lists them across units, applies status updates (with their equipment side
//! effects), and deletes records.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use depot_core::access;
use depot_core::error::CoreError;
use depot_core::types::DbId;
use depot_db::models::equipment::Equipment;
use depot_db::models::maintenance::{
    MaintenanceQuery, MaintenanceRecord, MaintenanceWithRefs, UpdateMaintenance,
};
use depot_db::repositories::{EquipmentRepo, MaintenanceRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::equipment::validate_cost;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::require;
use crate::state::AppState;

/// Response for `PUT /maintenance/{id}`: the updated record, plus the
/// equipment row when the status change released or re-flagged the unit.
/// `equipment` is `None` when the update had no equipment side effect or the
/// unit was deleted in the meantime.
#[derive(Debug, Serialize)]
pub struct MaintenanceUpdateOutcome {
    pub record: MaintenanceRecord,
    pub equipment: Option<Equipment>,
}

/// GET /api/v1/maintenance
///
/// Global maintenance log with unit and user names resolved. Supports
/// `?equipment_id=&status=&technician_id=&limit=&offset=`.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<MaintenanceQuery>,
) -> AppResult<Json<Vec<MaintenanceWithRefs>>> {
    let records = MaintenanceRepo::query(&state.pool, &params).await?;
    Ok(Json(records))
}

/// PUT /api/v1/maintenance/{id}
///
/// Update a record. Setting `status` applies the fixed side-effect table:
/// `completed` and `cancelled` release the equipment to `available`,
/// `in_progress` keeps it `in_maintenance`, `pending` leaves it untouched.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMaintenance>,
) -> AppResult<Json<MaintenanceUpdateOutcome>> {
    require(&user, access::OP_MAINTENANCE_UPDATE)?;

    if let Some(cost) = input.cost {
        validate_cost(cost)?;
    }

    let (record, equipment) = EquipmentRepo::update_maintenance(&state.pool, id, &input).await?;
    Ok(Json(MaintenanceUpdateOutcome { record, equipment }))
}

/// DELETE /api/v1/maintenance/{id}
///
/// Remove a record from the log. Deliberately leaves the equipment status
/// alone, whatever state the record was in.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require(&user, access::OP_MAINTENANCE_DELETE)?;

    let deleted = MaintenanceRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "maintenance record",
            id,
        }))
    }
}
