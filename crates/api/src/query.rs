//! Shared query parameter types for API handlers.
//!
//! Filter structs specific to one resource (ledger, equipment, maintenance)
//! live in `depot_db::models` and deserialize straight from the query string;
//! only parameters shared across handler modules are extracted here.

use serde::Deserialize;

/// Query parameters for list endpoints that support an `include_inactive` flag.
///
/// Used by articles and any other entity with soft-deactivation.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}
