//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. The stock and lifecycle
//! engines (`ArticleRepo::record_movement`, `EquipmentRepo::assign`, ...)
//! additionally open their own transactions.

pub mod area_repo;
pub mod article_repo;
pub mod assignment_repo;
pub mod category_repo;
pub mod dashboard_repo;
pub mod equipment_repo;
pub mod maintenance_repo;
pub mod movement_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use area_repo::AreaRepo;
pub use article_repo::ArticleRepo;
pub use assignment_repo::AssignmentRepo;
pub use category_repo::CategoryRepo;
pub use dashboard_repo::DashboardRepo;
pub use equipment_repo::EquipmentRepo;
pub use maintenance_repo::MaintenanceRepo;
pub use movement_repo::MovementRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
