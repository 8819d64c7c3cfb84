//! The settlement contract.
//!
//! Holds the highest admitted message number. The only transition is
//! [`SettlementContract::update_highest_message_number`]: verify the supplied
//! attestation, then overwrite the stored value with its output. The overwrite
//! is unconditional; a verified attestation with a lower output than the
//! stored value replaces it.

use serde::{Deserialize, Serialize};
use spymaster_prover::{Attestation, ProvingSystem};
use tracing::{info, warn};

use crate::error::ContractError;
use crate::state::{methods, AppStateEntry, SettlementState};
use crate::store::StateStore;

/// Result of a successful transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub method: String,
    pub previous: u64,
    pub current: u64,
    pub attestation_digest: String,
    pub updates: u64,
}

pub struct SettlementContract<P, S> {
    system: P,
    store: S,
    state: SettlementState,
}

impl<P: ProvingSystem, S: StateStore> SettlementContract<P, S> {
    /// Attach to `store`, initializing it to the genesis state if empty.
    pub fn deploy(system: P, mut store: S) -> Result<Self, ContractError> {
        let state = match store.load()? {
            Some(state) => state,
            None => {
                let genesis = SettlementState::genesis();
                store.commit(&genesis)?;
                genesis
            }
        };
        info!(
            program = %system.program().name,
            highest_message_number = state.highest_message_number,
            "settlement contract deployed"
        );
        Ok(SettlementContract {
            system,
            store,
            state,
        })
    }

    pub fn highest_message_number(&self) -> u64 {
        self.state.highest_message_number
    }

    pub fn state(&self) -> &SettlementState {
        &self.state
    }

    pub fn app_state(&self) -> Vec<AppStateEntry> {
        self.state.app_state()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Verify `attestation` and commit its output. On any error the stored
    /// state is unchanged.
    pub fn update_highest_message_number(
        &mut self,
        attestation: &Attestation,
    ) -> Result<SettlementReceipt, ContractError> {
        if !self.system.verify(attestation) {
            warn!(
                kind = ?attestation.kind,
                output = attestation.output(),
                "rejected settlement: attestation does not verify"
            );
            return Err(ContractError::VerificationFailure(format!(
                "{:?} attestation with output {} does not verify",
                attestation.kind,
                attestation.output()
            )));
        }

        let previous = self.state.highest_message_number;
        let current = attestation.output();
        let updates = self
            .state
            .updates
            .checked_add(1)
            .ok_or_else(|| ContractError::InvalidState("update counter overflow".into()))?;
        let digest = hex::encode(attestation.digest());
        let next = SettlementState {
            highest_message_number: current,
            updates,
            last_attestation: Some(digest.clone()),
        };
        self.store.commit(&next)?;
        self.state = next;

        if current < previous {
            warn!(previous, current, "highest message number decreased");
        }
        info!(previous, current, depth = attestation.depth(), "settled");

        Ok(SettlementReceipt {
            method: methods::UPDATE_HIGHEST_MESSAGE_NUMBER.to_string(),
            previous,
            current,
            attestation_digest: digest,
            updates: self.state.updates,
        })
    }
}
