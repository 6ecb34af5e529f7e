//! JSON persistence for the verification counter.
//!
//! The store is a single small JSON document. A missing file is a fresh
//! start, not an error.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use veraz_contracts::error::{VerazError, VerazResult};

/// Persisted progress state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Number of verifications that produced a verdict.
    pub verification_count: u64,
    /// Wall-clock time (UTC) of the last counted verification.
    pub last_verified_at: Option<DateTime<Utc>>,
}

/// Reads and writes a `ProgressSnapshot` at a fixed path.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, or a zeroed one if the file does not exist.
    pub fn load(&self) -> VerazResult<ProgressSnapshot> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no progress file, starting from zero");
                return Ok(ProgressSnapshot::default());
            }
            Err(e) => {
                return Err(VerazError::ProgressStore {
                    reason: format!("failed to read '{}': {}", self.path.display(), e),
                })
            }
        };

        serde_json::from_str(&contents).map_err(|e| VerazError::ProgressStore {
            reason: format!("failed to parse '{}': {}", self.path.display(), e),
        })
    }

    /// Write the snapshot, creating parent directories as needed.
    pub fn save(&self, snapshot: &ProgressSnapshot) -> VerazResult<()> {
        let write_error = |e: std::io::Error| VerazError::ProgressStore {
            reason: format!("failed to write '{}': {}", self.path.display(), e),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }

        let json = serde_json::to_string_pretty(snapshot).map_err(|e| VerazError::ProgressStore {
            reason: format!("failed to serialize progress: {e}"),
        })?;
        std::fs::write(&self.path, json).map_err(write_error)?;

        debug!(
            path = %self.path.display(),
            verification_count = snapshot.verification_count,
            "progress saved"
        );
        Ok(())
    }
}
