use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ops::encode::SparsePreferences;

/// File name of the persisted preferences, stored next to the config
pub const STATE_FILE: &str = ".slotgrid-state.json";

/// Error type for state persistence
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persisted session state (written to .slotgrid-state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SavedState {
    /// When the state was last written
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    /// Current preference rank
    #[serde(default)]
    pub rank: Option<u8>,
    /// Sparse preferences grid, same encoding as the request body
    #[serde(default)]
    pub preferences: SparsePreferences,
}

/// Read the state file from `dir`. Missing or malformed files yield None.
pub fn read_state(dir: &Path) -> Option<SavedState> {
    let content = fs::read_to_string(dir.join(STATE_FILE)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Atomically write the state file into `dir`
pub fn write_state(dir: &Path, state: &SavedState) -> Result<(), StateError> {
    let path = dir.join(STATE_FILE);
    let content = serde_json::to_string_pretty(state)?;
    let write_err = |source| StateError::WriteError {
        path: path.clone(),
        source,
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.persist(&path).map_err(|e| write_err(e.error))?;
    Ok(())
}
