//! Persistence for settlement state.

use std::{fs, path::PathBuf};

use spymaster_common::{read_json, write_json};

use crate::error::ContractError;
use crate::state::SettlementState;

pub trait StateStore {
    /// The committed state, or `None` before the first commit.
    fn load(&self) -> Result<Option<SettlementState>, ContractError>;

    /// Durably replace the committed state.
    fn commit(&mut self, state: &SettlementState) -> Result<(), ContractError>;
}

/// In-memory state store for development/testing.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: Option<SettlementState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<SettlementState>, ContractError> {
        Ok(self.state.clone())
    }

    fn commit(&mut self, state: &SettlementState) -> Result<(), ContractError> {
        self.state = Some(state.clone());
        Ok(())
    }
}

/// JSON file store. Commits go to a sibling temporary file that is renamed
/// over the target, so a failed commit leaves the previous file intact.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<SettlementState>, ContractError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(read_json(&self.path)?))
    }

    fn commit(&mut self, state: &SettlementState) -> Result<(), ContractError> {
        let tmp = self.temp_path();
        write_json(&tmp, state)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
