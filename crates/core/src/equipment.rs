//! Equipment and maintenance status constants, conversions, and the fixed
//! side-effect table tying maintenance transitions to equipment status.
//!
//! Direct equipment edits may set any status; only the event-driven
//! operations (assignment, maintenance) consult the table here.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Equipment status constants
// ---------------------------------------------------------------------------

pub const EQUIPMENT_STATUS_AVAILABLE: &str = "available";
pub const EQUIPMENT_STATUS_IN_USE: &str = "in_use";
pub const EQUIPMENT_STATUS_IN_MAINTENANCE: &str = "in_maintenance";
pub const EQUIPMENT_STATUS_IN_REPAIR: &str = "in_repair";
pub const EQUIPMENT_STATUS_RETIRED: &str = "retired";
pub const EQUIPMENT_STATUS_LOST: &str = "lost";

/// All valid equipment statuses.
pub const VALID_EQUIPMENT_STATUSES: &[&str] = &[
    EQUIPMENT_STATUS_AVAILABLE,
    EQUIPMENT_STATUS_IN_USE,
    EQUIPMENT_STATUS_IN_MAINTENANCE,
    EQUIPMENT_STATUS_IN_REPAIR,
    EQUIPMENT_STATUS_RETIRED,
    EQUIPMENT_STATUS_LOST,
];

/// Equipment status enum with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentStatus {
    Available,
    InUse,
    InMaintenance,
    InRepair,
    Retired,
    Lost,
}

impl EquipmentStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => EQUIPMENT_STATUS_AVAILABLE,
            Self::InUse => EQUIPMENT_STATUS_IN_USE,
            Self::InMaintenance => EQUIPMENT_STATUS_IN_MAINTENANCE,
            Self::InRepair => EQUIPMENT_STATUS_IN_REPAIR,
            Self::Retired => EQUIPMENT_STATUS_RETIRED,
            Self::Lost => EQUIPMENT_STATUS_LOST,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            EQUIPMENT_STATUS_AVAILABLE => Ok(Self::Available),
            EQUIPMENT_STATUS_IN_USE => Ok(Self::InUse),
            EQUIPMENT_STATUS_IN_MAINTENANCE => Ok(Self::InMaintenance),
            EQUIPMENT_STATUS_IN_REPAIR => Ok(Self::InRepair),
            EQUIPMENT_STATUS_RETIRED => Ok(Self::Retired),
            EQUIPMENT_STATUS_LOST => Ok(Self::Lost),
            other => Err(CoreError::Validation(format!(
                "Unknown equipment status: '{other}'. Valid statuses: {}",
                VALID_EQUIPMENT_STATUSES.join(", ")
            ))),
        }
    }
}

/// Validate an equipment status string is one of the known statuses.
pub fn validate_equipment_status(status: &str) -> Result<(), CoreError> {
    EquipmentStatus::from_str(status).map(|_| ())
}

// ---------------------------------------------------------------------------
// Maintenance status constants
// ---------------------------------------------------------------------------

/// Reported, not yet worked on.
pub const MAINTENANCE_STATUS_PENDING: &str = "pending";
/// A technician is working on it.
pub const MAINTENANCE_STATUS_IN_PROGRESS: &str = "in_progress";
/// Work finished.
pub const MAINTENANCE_STATUS_COMPLETED: &str = "completed";
/// Abandoned without work.
pub const MAINTENANCE_STATUS_CANCELLED: &str = "cancelled";

/// All valid maintenance record statuses.
pub const VALID_MAINTENANCE_STATUSES: &[&str] = &[
    MAINTENANCE_STATUS_PENDING,
    MAINTENANCE_STATUS_IN_PROGRESS,
    MAINTENANCE_STATUS_COMPLETED,
    MAINTENANCE_STATUS_CANCELLED,
];

/// Maintenance record status enum with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => MAINTENANCE_STATUS_PENDING,
            Self::InProgress => MAINTENANCE_STATUS_IN_PROGRESS,
            Self::Completed => MAINTENANCE_STATUS_COMPLETED,
            Self::Cancelled => MAINTENANCE_STATUS_CANCELLED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            MAINTENANCE_STATUS_PENDING => Ok(Self::Pending),
            MAINTENANCE_STATUS_IN_PROGRESS => Ok(Self::InProgress),
            MAINTENANCE_STATUS_COMPLETED => Ok(Self::Completed),
            MAINTENANCE_STATUS_CANCELLED => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Unknown maintenance status: '{other}'. Valid statuses: {}",
                VALID_MAINTENANCE_STATUSES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Maintenance side-effect table
// ---------------------------------------------------------------------------

/// Equipment status implied by a maintenance record entering `status`.
///
/// `None` means the equipment status is left untouched. Completing or
/// cancelling a record releases the equipment back to available even if it
/// was assigned before the maintenance started; the transition table is
/// deliberately unconditional.
pub fn equipment_status_after_maintenance(status: MaintenanceStatus) -> Option<EquipmentStatus> {
    match status {
        MaintenanceStatus::Completed | MaintenanceStatus::Cancelled => {
            Some(EquipmentStatus::Available)
        }
        MaintenanceStatus::InProgress => Some(EquipmentStatus::InMaintenance),
        MaintenanceStatus::Pending => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
