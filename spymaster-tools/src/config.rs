//! Tool configuration.

use std::{env, path::PathBuf};

use anyhow::{ensure, Result};
use spymaster_common::DEFAULT_PROGRAM_NAME;

pub const DEFAULT_KEY_PATH: &str = "artifacts/key.json";
pub const DEFAULT_STATE_PATH: &str = "state/settlement.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolsConfig {
    /// Key manifest written by `keygen`.
    pub key_path: PathBuf,
    /// Settlement state file.
    pub state_path: PathBuf,
    /// Program name bound into every attestation.
    pub program_name: String,
}

impl ToolsConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let key_path = lookup("SPYMASTER_KEY_PATH")
            .unwrap_or_else(|| DEFAULT_KEY_PATH.to_string())
            .into();
        let state_path = lookup("SPYMASTER_STATE_PATH")
            .unwrap_or_else(|| DEFAULT_STATE_PATH.to_string())
            .into();
        let program_name =
            lookup("SPYMASTER_PROGRAM_NAME").unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string());
        ensure!(
            !program_name.trim().is_empty(),
            "SPYMASTER_PROGRAM_NAME must not be empty"
        );

        Ok(Self {
            key_path,
            state_path,
            program_name,
        })
    }
}
