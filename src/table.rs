//! Table identifiers
//!
//! Two entry paths feed the same type: manual entry accepts any nonempty
//! identifier, QR scans are restricted to the venue's numbered floor plan.

use serde::{Deserialize, Serialize};

use crate::error::DeskError;

/// Number of tables in the venue (fixed floor plan)
pub const TABLE_COUNT: u32 = 30;

/// Validated table identifier (桌号)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TableId(String);

impl TableId {
    /// Manual entry: any nonempty identifier after trimming.
    pub fn parse(raw: &str) -> Result<Self, DeskError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DeskError::InvalidTable(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// QR scan entry: an integer table number in `1..=TABLE_COUNT`.
    ///
    /// Decoded payloads like `"07"` normalize to `"7"` so both entry
    /// paths agree on the identifier for the same physical table.
    pub fn from_scan(raw: &str) -> Result<Self, DeskError> {
        let number: u32 = raw
            .trim()
            .parse()
            .map_err(|_| DeskError::InvalidTable(raw.to_string()))?;
        if !(1..=TABLE_COUNT).contains(&number) {
            return Err(DeskError::InvalidTable(raw.to_string()));
        }
        Ok(Self(number.to_string()))
    }

    /// Zero-based slot index for the occupancy store.
    ///
    /// `None` for identifiers outside the numbered floor plan (manual
    /// entry allows arbitrary names).
    pub fn slot(&self) -> Option<usize> {
        let number: u32 = self.0.parse().ok()?;
        (1..=TABLE_COUNT)
            .contains(&number)
            .then(|| (number - 1) as usize)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
