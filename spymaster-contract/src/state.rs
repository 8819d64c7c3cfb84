//! Durable settlement state and its app-state field layout.

use serde::{Deserialize, Serialize};

use crate::error::ContractError;

/// Contract method names.
pub mod methods {
    pub const UPDATE_HIGHEST_MESSAGE_NUMBER: &str = "updateHighestMessageNumber";
}

/// App-state slot indices.
pub mod fields {
    /// Highest admitted message number.
    pub const HIGHEST_MESSAGE_NUMBER: u8 = 0;
    /// Successful settlement transitions.
    pub const UPDATE_COUNT: u8 = 1;
}

/// One app-state slot, value as a decimal field string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStateEntry {
    pub index: u8,
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementState {
    pub highest_message_number: u64,
    pub updates: u64,
    /// Hex digest of the attestation behind the last transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attestation: Option<String>,
}

impl SettlementState {
    /// State of a freshly deployed contract.
    pub fn genesis() -> Self {
        Self::default()
    }

    pub fn app_state(&self) -> Vec<AppStateEntry> {
        vec![
            AppStateEntry {
                index: fields::HIGHEST_MESSAGE_NUMBER,
                value: self.highest_message_number.to_string(),
            },
            AppStateEntry {
                index: fields::UPDATE_COUNT,
                value: self.updates.to_string(),
            },
        ]
    }

    /// Parse app-state slots. Unknown slots are ignored; missing slots are zero.
    pub fn from_app_state(entries: &[AppStateEntry]) -> Result<Self, ContractError> {
        let mut state = Self::genesis();
        for entry in entries {
            match entry.index {
                fields::HIGHEST_MESSAGE_NUMBER => {
                    state.highest_message_number = parse_slot(entry)?;
                }
                fields::UPDATE_COUNT => {
                    state.updates = parse_slot(entry)?;
                }
                _ => {}
            }
        }
        Ok(state)
    }
}

fn parse_slot(entry: &AppStateEntry) -> Result<u64, ContractError> {
    entry.value.parse().map_err(|_| {
        ContractError::InvalidState(format!(
            "slot {} is not a 64-bit decimal: {:?}",
            entry.index, entry.value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_layout() {
        let state = SettlementState {
            highest_message_number: 42,
            updates: 3,
            last_attestation: None,
        };
        let entries = state.app_state();
        assert_eq!(entries[0].index, fields::HIGHEST_MESSAGE_NUMBER);
        assert_eq!(entries[0].value, "42");
        assert_eq!(SettlementState::from_app_state(&entries).unwrap(), state);
    }

    #[test]
    fn test_from_app_state_rejects_garbage() {
        let entries = [AppStateEntry {
            index: fields::HIGHEST_MESSAGE_NUMBER,
            value: "0x10".into(),
        }];
        assert!(matches!(
            SettlementState::from_app_state(&entries),
            Err(ContractError::InvalidState(_))
        ));
    }

    #[test]
    fn test_missing_slots_default_to_zero() {
        let state = SettlementState::from_app_state(&[AppStateEntry {
            index: 7,
            value: "1".into(),
        }])
        .unwrap();
        assert_eq!(state, SettlementState::genesis());
    }
}
