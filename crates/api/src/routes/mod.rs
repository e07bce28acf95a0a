pub mod admin;
pub mod areas;
pub mod articles;
pub mod assignments;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod equipment;
pub mod health;
pub mod maintenance;
pub mod movements;
pub mod roles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /admin/users                         list, create (admin only)
/// /admin/users/{id}                    get, update
/// /admin/users/{id}/deactivate         deactivate (POST)
/// /admin/users/{id}/reset-password     reset password (POST)
///
/// /articles                            list, create
/// /articles/{id}                       get, update, delete
/// /articles/{id}/movements             ledger of one article; record (POST)
/// /articles/{id}/consistency           ledger-vs-counter audit (GET)
///
/// /movements                           global ledger (GET, filterable)
/// /movements/{id}                      descriptive update (PUT)
///
/// /equipment                           list, create
/// /equipment/{id}                      get, update, delete
/// /equipment/{id}/assign               assign to user (POST)
/// /equipment/{id}/assignments          assignment history (GET)
/// /equipment/{id}/maintenance          history (GET), report (POST)
///
/// /maintenance                         global log (GET, filterable)
/// /maintenance/{id}                    update (PUT), delete (DELETE)
///
/// /assignments                         global log (GET, filterable)
///
/// /categories                          list, create
/// /categories/{id}                     get, update, delete
/// /areas                               list, create
/// /areas/{id}                          get, update, delete
/// /roles                               list (read-only)
///
/// /dashboard/summary                   aggregate counts (GET)
/// /dashboard/low-stock                 low-stock articles (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Admin routes (user management).
        .nest("/admin", admin::router())
        // Article stock and its movement ledger.
        .nest("/articles", articles::router())
        // Global ledger view.
        .nest("/movements", movements::router())
        // Equipment lifecycle, assignments, maintenance reporting.
        .nest("/equipment", equipment::router())
        // Global maintenance log and record updates.
        .nest("/maintenance", maintenance::router())
        // Global assignment log.
        .nest("/assignments", assignments::router())
        // Reference stores.
        .nest("/categories", categories::router())
        .nest("/areas", areas::router())
        .nest("/roles", roles::router())
        // Aggregate views for reports and the landing page.
        .nest("/dashboard", dashboard::router())
}
