//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// Resource endpoints return rows directly; aggregate and report endpoints
/// wrap their payload in this envelope so consumers can distinguish computed
/// snapshots from stored entities.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: summary }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
