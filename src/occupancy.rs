//! Persisted table-occupancy hints
//!
//! The fixed 30-table venue keeps one boolean per table slot on disk so a
//! restarted desk can show which tables it had marked busy. The ledger
//! stays authoritative for `is_busy`; these flags are a cold-start hint
//! only and are never read to gate a transition.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::table::TABLE_COUNT;

#[derive(Debug, Error)]
pub enum OccupancyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Occupancy file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OccupancyFile {
    slots: Vec<bool>,
}

impl Default for OccupancyFile {
    fn default() -> Self {
        Self {
            slots: vec![false; TABLE_COUNT as usize],
        }
    }
}

/// Occupancy hint store backed by a JSON file, rewritten on every mutation
#[derive(Debug)]
pub struct OccupancyStore {
    file_path: PathBuf,
    data: OccupancyFile,
}

impl OccupancyStore {
    /// Load from `file_path`, starting all-free when the file is absent.
    pub fn load(file_path: impl Into<PathBuf>) -> Result<Self, OccupancyError> {
        let file_path = file_path.into();

        let data = if file_path.exists() {
            let content = std::fs::read_to_string(&file_path)?;
            let mut file: OccupancyFile = serde_json::from_str(&content)?;
            // Tolerate files written with a different venue size
            file.slots.resize(TABLE_COUNT as usize, false);
            file
        } else {
            OccupancyFile::default()
        };

        Ok(Self { file_path, data })
    }

    fn save(&self) -> Result<(), OccupancyError> {
        let content = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }

    /// Flag a slot and rewrite the file. Out-of-range slots are ignored.
    ///
    /// The in-memory flag only changes when the rewrite succeeds, so the
    /// store never diverges from the file.
    pub fn set_occupied(&mut self, slot: usize, occupied: bool) -> Result<(), OccupancyError> {
        let Some(previous) = self.data.slots.get(slot).copied() else {
            return Ok(());
        };
        self.data.slots[slot] = occupied;
        if let Err(err) = self.save() {
            self.data.slots[slot] = previous;
            return Err(err);
        }
        debug!(slot, occupied, "Occupancy hint persisted");
        Ok(())
    }

    pub fn is_occupied(&self, slot: usize) -> bool {
        self.data.slots.get(slot).copied().unwrap_or(false)
    }
}
