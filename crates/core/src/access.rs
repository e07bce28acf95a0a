//! Role and operation constants plus the static authorization table.
//!
//! Role names must match the seed data in
//! `20260810000002_create_roles_table.sql`. Read access is granted to every
//! authenticated user; the table below only gates mutating operations.

// ---------------------------------------------------------------------------
// Role constants
// ---------------------------------------------------------------------------

/// Full access, including user/role/category/area administration.
pub const ROLE_ADMIN: &str = "admin";
/// Manages articles, movements, equipment, assignments, and maintenance.
pub const ROLE_STOREKEEPER: &str = "storekeeper";
/// Reports and updates maintenance records.
pub const ROLE_TECHNICIAN: &str = "technician";
/// Read-only access.
pub const ROLE_VIEWER: &str = "viewer";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_STOREKEEPER, ROLE_TECHNICIAN, ROLE_VIEWER];

/// Check whether a role name is one of the known roles.
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// ---------------------------------------------------------------------------
// Operation constants
// ---------------------------------------------------------------------------

pub const OP_ARTICLE_CREATE: &str = "article.create";
pub const OP_ARTICLE_UPDATE: &str = "article.update";
pub const OP_ARTICLE_DELETE: &str = "article.delete";
pub const OP_MOVEMENT_RECORD: &str = "movement.record";
pub const OP_MOVEMENT_UPDATE: &str = "movement.update";
pub const OP_EQUIPMENT_CREATE: &str = "equipment.create";
pub const OP_EQUIPMENT_UPDATE: &str = "equipment.update";
pub const OP_EQUIPMENT_DELETE: &str = "equipment.delete";
pub const OP_EQUIPMENT_ASSIGN: &str = "equipment.assign";
pub const OP_MAINTENANCE_REPORT: &str = "maintenance.report";
pub const OP_MAINTENANCE_UPDATE: &str = "maintenance.update";
pub const OP_MAINTENANCE_DELETE: &str = "maintenance.delete";
pub const OP_CATEGORY_MANAGE: &str = "category.manage";
pub const OP_AREA_MANAGE: &str = "area.manage";
pub const OP_USER_MANAGE: &str = "user.manage";

// ---------------------------------------------------------------------------
// Authorization table
// ---------------------------------------------------------------------------

/// Operations a storekeeper may perform.
const STOREKEEPER_OPS: &[&str] = &[
    OP_ARTICLE_CREATE,
    OP_ARTICLE_UPDATE,
    OP_ARTICLE_DELETE,
    OP_MOVEMENT_RECORD,
    OP_MOVEMENT_UPDATE,
    OP_EQUIPMENT_CREATE,
    OP_EQUIPMENT_UPDATE,
    OP_EQUIPMENT_DELETE,
    OP_EQUIPMENT_ASSIGN,
    OP_MAINTENANCE_REPORT,
    OP_MAINTENANCE_UPDATE,
];

/// Operations a technician may perform.
const TECHNICIAN_OPS: &[&str] = &[OP_MAINTENANCE_REPORT, OP_MAINTENANCE_UPDATE];

/// Decide whether `role` may perform `operation`.
///
/// Unknown roles and unknown operations are denied. Admins are allowed
/// everything, so new operations fail closed for every other role until they
/// are added to an allow-set here.
pub fn authorize(role: &str, operation: &str) -> bool {
    match role {
        ROLE_ADMIN => true,
        ROLE_STOREKEEPER => STOREKEEPER_OPS.contains(&operation),
        ROLE_TECHNICIAN => TECHNICIAN_OPS.contains(&operation),
        ROLE_VIEWER => false,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
