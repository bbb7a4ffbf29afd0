//! Desk error taxonomy
//!
//! Deliberately small: opening a table is the only operation that reports
//! failures to the waiter. Everything else (unavailable items, unknown
//! order ids, empty-cart submits) is a defined no-op, not an error.

use thiserror::Error;

use crate::occupancy::OccupancyError;

/// Desk errors
#[derive(Debug, Error)]
pub enum DeskError {
    /// The table already has an ACTIVE order open at it.
    #[error("Table is already occupied: {0}")]
    TableBusy(String),

    /// Malformed or out-of-range table identifier.
    #[error("Invalid table identifier: {0:?}")]
    InvalidTable(String),

    #[error("Occupancy store error: {0}")]
    Occupancy(#[from] OccupancyError),
}

pub type DeskResult<T> = Result<T, DeskError>;
