#![deny(warnings)]

//! Studio snapshots: versioned JSON documents holding the full studio state.
//!
//! The core never touches storage; this crate turns a [`Studio`] into a
//! [`Snapshot`] and back, as a string or a file.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use studio_core::generation::GeneratorCursor;
use studio_core::{BalanceConfig, StudioState};
use studio_runtime::Studio;
use thiserror::Error;
use tracing::info;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot io: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported snapshot schema version {found} (expected {SCHEMA_VERSION})")]
    UnsupportedVersion { found: u32 },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub schema_version: u32,
    /// In-game date at the moment of saving.
    pub saved_on: NaiveDate,
    pub seed: u64,
    pub cursor: GeneratorCursor,
    pub config: BalanceConfig,
    pub state: StudioState,
}

impl Snapshot {
    pub fn capture(studio: &Studio) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            saved_on: studio.state().aggregate.date,
            seed: studio.seed(),
            cursor: studio.generator_cursor(),
            config: studio.config().clone(),
            state: studio.state().clone(),
        }
    }

    /// Rebuild a studio. Report sinks are not part of a snapshot and must be
    /// registered again.
    pub fn restore(self) -> Studio {
        Studio::from_state(self.state, self.config, self.seed, self.cursor)
    }
}

pub fn to_json(snapshot: &Snapshot) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn from_json(json: &str) -> Result<Snapshot, SnapshotError> {
    #[derive(Deserialize)]
    struct Header {
        schema_version: u32,
    }
    let header: Header = serde_json::from_str(json)?;
    if header.schema_version != SCHEMA_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: header.schema_version,
        });
    }
    Ok(serde_json::from_str(json)?)
}

pub fn save(studio: &Studio, path: &Path) -> Result<(), SnapshotError> {
    let snapshot = Snapshot::capture(studio);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_json(&snapshot)?)?;
    info!(path = %path.display(), day = snapshot.state.aggregate.day, "snapshot saved");
    Ok(())
}

pub fn load(path: &Path) -> Result<Studio, SnapshotError> {
    let json = fs::read_to_string(path)?;
    let snapshot = from_json(&json)?;
    info!(path = %path.display(), saved_on = %snapshot.saved_on, "snapshot loaded");
    Ok(snapshot.restore())
}
