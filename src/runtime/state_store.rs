//! JSON file persistence for strategy snapshots

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::common::errors::Result;
use crate::common::types::StrategyState;

/// Reads and writes a single strategy snapshot file
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the last saved snapshot, or `None` if nothing was saved yet
    pub fn load(&self) -> Result<Option<StrategyState>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let state: StrategyState = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), keys = state.len(), "loaded strategy state");
        Ok(Some(state))
    }

    pub fn save(&self, state: &StrategyState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "saved strategy state");
        Ok(())
    }
}
