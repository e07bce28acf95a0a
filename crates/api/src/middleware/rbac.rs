//! Role-based access control (RBAC) extractors and the operation gate.
//!
//! Admin-only surfaces (user, category, and area administration) use the
//! [`RequireAdmin`] extractor. Domain operations (movements, assignments,
//! maintenance, article/equipment edits) are gated per operation name via
//! [`require`], which consults the static allow-table in `depot_core::access`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use depot_core::access::{self, ROLE_ADMIN};
use depot_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Check the authenticated user's role against the operation allow-table.
///
/// Mutating handlers call this first, before touching the database:
///
/// ```ignore
/// require(&user, access::OP_MOVEMENT_RECORD)?;
/// ```
///
/// Read endpoints are open to every authenticated role and do not call it.
pub fn require(user: &AuthUser, operation: &str) -> Result<(), AppError> {
    if access::authorize(&user.role, operation) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(format!(
            "Role '{}' may not perform operation '{}'",
            user.role, operation
        ))))
    }
}
