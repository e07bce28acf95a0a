//! Article status and movement-type constants, plus the signed stock
//! arithmetic behind the movement ledger.
//!
//! Only `entry` and `exit` movements change the stock counter; the remaining
//! types record the affected quantity but leave stock untouched. The counter
//! may never go negative, and the rejection happens here so the repository
//! can bail before writing anything.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Article status constants
// ---------------------------------------------------------------------------

pub const ARTICLE_STATUS_AVAILABLE: &str = "available";
pub const ARTICLE_STATUS_IN_USE: &str = "in_use";
pub const ARTICLE_STATUS_IN_MAINTENANCE: &str = "in_maintenance";
pub const ARTICLE_STATUS_IN_REPAIR: &str = "in_repair";
pub const ARTICLE_STATUS_RETIRED: &str = "retired";

/// All valid article statuses.
pub const VALID_ARTICLE_STATUSES: &[&str] = &[
    ARTICLE_STATUS_AVAILABLE,
    ARTICLE_STATUS_IN_USE,
    ARTICLE_STATUS_IN_MAINTENANCE,
    ARTICLE_STATUS_IN_REPAIR,
    ARTICLE_STATUS_RETIRED,
];

/// Validate an article status string is one of the known statuses.
pub fn validate_article_status(status: &str) -> Result<(), CoreError> {
    if VALID_ARTICLE_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown article status: '{status}'. Valid statuses: {}",
            VALID_ARTICLE_STATUSES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Movement type constants
// ---------------------------------------------------------------------------

/// Stock received into the depot.
pub const MOVEMENT_ENTRY: &str = "entry";
/// Stock leaving the depot.
pub const MOVEMENT_EXIT: &str = "exit";
/// Relocation between storage locations, stock unchanged.
pub const MOVEMENT_TRANSFER: &str = "transfer";
/// Handed to a person, stock unchanged.
pub const MOVEMENT_ASSIGNMENT: &str = "assignment";
/// Returned by a person, stock unchanged.
pub const MOVEMENT_RETURN: &str = "return";
/// Sent to or received from maintenance, stock unchanged.
pub const MOVEMENT_MAINTENANCE: &str = "maintenance";

/// All valid movement types.
pub const VALID_MOVEMENT_TYPES: &[&str] = &[
    MOVEMENT_ENTRY,
    MOVEMENT_EXIT,
    MOVEMENT_TRANSFER,
    MOVEMENT_ASSIGNMENT,
    MOVEMENT_RETURN,
    MOVEMENT_MAINTENANCE,
];

/// Movement type enum with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementType {
    Entry,
    Exit,
    Transfer,
    Assignment,
    Return,
    Maintenance,
}

impl MovementType {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => MOVEMENT_ENTRY,
            Self::Exit => MOVEMENT_EXIT,
            Self::Transfer => MOVEMENT_TRANSFER,
            Self::Assignment => MOVEMENT_ASSIGNMENT,
            Self::Return => MOVEMENT_RETURN,
            Self::Maintenance => MOVEMENT_MAINTENANCE,
        }
    }

    /// Parse from a string, returning an error for unknown types.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            MOVEMENT_ENTRY => Ok(Self::Entry),
            MOVEMENT_EXIT => Ok(Self::Exit),
            MOVEMENT_TRANSFER => Ok(Self::Transfer),
            MOVEMENT_ASSIGNMENT => Ok(Self::Assignment),
            MOVEMENT_RETURN => Ok(Self::Return),
            MOVEMENT_MAINTENANCE => Ok(Self::Maintenance),
            other => Err(CoreError::Validation(format!(
                "Unknown movement type: '{other}'. Valid types: {}",
                VALID_MOVEMENT_TYPES.join(", ")
            ))),
        }
    }

    /// Whether this movement type changes the stock counter.
    pub fn affects_stock(&self) -> bool {
        matches!(self, Self::Entry | Self::Exit)
    }

    /// Signed stock delta contributed by a movement of `quantity` units.
    pub fn signed_delta(&self, quantity: i32) -> i32 {
        match self {
            Self::Entry => quantity,
            Self::Exit => -quantity,
            _ => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Stock arithmetic
// ---------------------------------------------------------------------------

/// Validate a movement quantity for the given type.
///
/// Entry and exit movements must move at least one unit; the neutral types
/// only need a non-negative quantity.
pub fn validate_quantity(movement_type: MovementType, quantity: i32) -> Result<(), CoreError> {
    if movement_type.affects_stock() {
        if quantity <= 0 {
            return Err(CoreError::Validation(format!(
                "Quantity must be greater than zero for {} movements",
                movement_type.as_str()
            )));
        }
    } else if quantity < 0 {
        return Err(CoreError::Validation(
            "Quantity must not be negative".to_string(),
        ));
    }
    Ok(())
}

/// Compute the stock level after applying a movement.
///
/// Rejects an exit that would take stock below zero; the caller must not have
/// written anything yet when this fails.
pub fn stock_after(
    stock_before: i32,
    movement_type: MovementType,
    quantity: i32,
) -> Result<i32, CoreError> {
    let after = stock_before + movement_type.signed_delta(quantity);
    if after < 0 {
        return Err(CoreError::InsufficientStock {
            requested: quantity,
            available: stock_before,
        });
    }
    Ok(after)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- MovementType --------------------------------------------------------

    #[test]
    fn movement_type_as_str() {
        assert_eq!(MovementType::Entry.as_str(), "entry");
        assert_eq!(MovementType::Exit.as_str(), "exit");
        assert_eq!(MovementType::Transfer.as_str(), "transfer");
        assert_eq!(MovementType::Assignment.as_str(), "assignment");
        assert_eq!(MovementType::Return.as_str(), "return");
        assert_eq!(MovementType::Maintenance.as_str(), "maintenance");
    }

    #[test]
    fn movement_type_from_str_valid() {
        for s in VALID_MOVEMENT_TYPES {
            assert_eq!(MovementType::from_str(s).unwrap().as_str(), *s);
        }
    }

    #[test]
    fn movement_type_from_str_invalid() {
        assert!(MovementType::from_str("purchase").is_err());
        assert!(MovementType::from_str("").is_err());
        assert!(MovementType::from_str("ENTRY").is_err());
    }

    #[test]
    fn only_entry_and_exit_affect_stock() {
        assert!(MovementType::Entry.affects_stock());
        assert!(MovementType::Exit.affects_stock());
        assert!(!MovementType::Transfer.affects_stock());
        assert!(!MovementType::Assignment.affects_stock());
        assert!(!MovementType::Return.affects_stock());
        assert!(!MovementType::Maintenance.affects_stock());
    }

    #[test]
    fn signed_delta_per_type() {
        assert_eq!(MovementType::Entry.signed_delta(5), 5);
        assert_eq!(MovementType::Exit.signed_delta(5), -5);
        assert_eq!(MovementType::Transfer.signed_delta(5), 0);
        assert_eq!(MovementType::Assignment.signed_delta(5), 0);
        assert_eq!(MovementType::Return.signed_delta(5), 0);
        assert_eq!(MovementType::Maintenance.signed_delta(5), 0);
    }

    // -- validate_quantity ---------------------------------------------------

    #[test]
    fn entry_and_exit_require_positive_quantity() {
        assert!(validate_quantity(MovementType::Entry, 1).is_ok());
        assert!(validate_quantity(MovementType::Exit, 10).is_ok());
        assert!(validate_quantity(MovementType::Entry, 0).is_err());
        assert!(validate_quantity(MovementType::Exit, 0).is_err());
        assert!(validate_quantity(MovementType::Entry, -3).is_err());
        assert!(validate_quantity(MovementType::Exit, -3).is_err());
    }

    #[test]
    fn neutral_types_accept_zero_quantity() {
        assert!(validate_quantity(MovementType::Transfer, 0).is_ok());
        assert!(validate_quantity(MovementType::Assignment, 2).is_ok());
        assert!(validate_quantity(MovementType::Return, -1).is_err());
    }

    // -- stock_after ---------------------------------------------------------

    #[test]
    fn entry_increases_stock() {
        assert_eq!(stock_after(10, MovementType::Entry, 5).unwrap(), 15);
        assert_eq!(stock_after(0, MovementType::Entry, 1).unwrap(), 1);
    }

    #[test]
    fn exit_decreases_stock() {
        assert_eq!(stock_after(10, MovementType::Exit, 5).unwrap(), 5);
        assert_eq!(stock_after(10, MovementType::Exit, 10).unwrap(), 0);
    }

    #[test]
    fn exit_below_zero_rejected() {
        let err = stock_after(3, MovementType::Exit, 5).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                requested,
                available,
            } => {
                assert_eq!(requested, 5);
                assert_eq!(available, 3);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    #[test]
    fn neutral_types_leave_stock_unchanged() {
        assert_eq!(stock_after(7, MovementType::Transfer, 3).unwrap(), 7);
        assert_eq!(stock_after(7, MovementType::Assignment, 3).unwrap(), 7);
        assert_eq!(stock_after(7, MovementType::Return, 3).unwrap(), 7);
        assert_eq!(stock_after(7, MovementType::Maintenance, 3).unwrap(), 7);
        assert_eq!(stock_after(0, MovementType::Transfer, 99).unwrap(), 0);
    }

    // -- validate_article_status ---------------------------------------------

    #[test]
    fn valid_article_statuses_accepted() {
        for s in VALID_ARTICLE_STATUSES {
            assert!(validate_article_status(s).is_ok());
        }
    }

    #[test]
    fn invalid_article_status_rejected() {
        assert!(validate_article_status("broken").is_err());
        assert!(validate_article_status("").is_err());
        assert!(validate_article_status("Available").is_err());
    }
}
