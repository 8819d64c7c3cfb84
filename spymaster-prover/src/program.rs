//! The recursive step function.
//!
//! `step(message, prior, is_recursive)`:
//!
//! 1. a non-recursive step only accepts the program's own zero-output base;
//! 2. a recursive step requires the prior to verify;
//! 3. the step circuit is evaluated against `prior.output()`;
//! 4. the backend certifies the resulting statement, linked to the prior by
//!    digest.
//!
//! Invalid messages are not errors. They produce an attestation whose output
//! equals the prior's.

use spymaster_circuit::{Message, StepCircuit};
use tracing::debug;

use crate::attestation::{message_commitment, Attestation, Statement, StepEvidence};
use crate::chain::ChainBuilder;
use crate::error::ProofError;
use crate::system::ProvingSystem;

#[derive(Clone, Debug)]
pub struct StepProgram<P> {
    system: P,
}

impl<P: ProvingSystem> StepProgram<P> {
    pub fn new(system: P) -> Self {
        StepProgram { system }
    }

    pub fn system(&self) -> &P {
        &self.system
    }

    /// The placeholder attestation a chain starts from. Output 0.
    pub fn dummy(&self) -> Attestation {
        self.system.base(0)
    }

    pub fn step(
        &self,
        message: &Message,
        prior: &Attestation,
        is_recursive: bool,
    ) -> Result<Attestation, ProofError> {
        if !is_recursive && *prior != self.dummy() {
            return Err(ProofError::StructuralMisuse(format!(
                "non-recursive step given a {:?} attestation with output {} at depth {}",
                prior.kind,
                prior.output(),
                prior.depth()
            )));
        }
        self.system.verify_if(prior, is_recursive)?;
        let depth = prior.depth().checked_add(1).ok_or_else(|| {
            ProofError::StructuralMisuse("prior attestation is at maximum depth".into())
        })?;

        let prev_output = prior.output();
        let outcome = StepCircuit::new(*message, prev_output).evaluate()?;

        let statement = Statement {
            prev_output,
            output: outcome.new_highest,
            accepted: outcome.accepted,
            recursive: is_recursive,
            depth,
            prior_digest: prior.digest(),
            message_commitment: message_commitment(message),
        };
        let evidence = StepEvidence {
            public_inputs: outcome.public_inputs,
            shape: outcome.shape,
            prior_verified: is_recursive,
        };
        let attestation = self.system.certify(statement, &evidence)?;

        debug!(
            depth = statement.depth,
            message_number = message.message_number,
            accepted = outcome.accepted,
            output = statement.output,
            "step certified"
        );
        Ok(attestation)
    }

    /// First step of a chain, seeded from the program's own base attestation.
    pub fn genesis(&self, message: &Message) -> Result<Attestation, ProofError> {
        self.step(message, &self.dummy(), false)
    }

    /// Recursive step on top of a verified prior.
    pub fn extend(&self, message: &Message, prior: &Attestation) -> Result<Attestation, ProofError> {
        self.step(message, prior, true)
    }

    /// A verifiable attestation with output 0, made by folding the all-zero
    /// message onto the base attestation.
    pub fn bootstrap(&self) -> Result<Attestation, ProofError> {
        self.genesis(&Message::dummy())
    }

    /// Fold a message sequence from the base attestation. An empty sequence
    /// yields the base attestation itself.
    pub fn fold<I>(&self, messages: I) -> Result<Attestation, ProofError>
    where
        I: IntoIterator<Item = Message>,
    {
        Ok(ChainBuilder::new(self).extend(messages)?.finish())
    }
}
