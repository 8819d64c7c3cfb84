//! Folding message sequences into a single attestation.

use serde::{Deserialize, Serialize};
use spymaster_circuit::Message;
use tracing::info;

use crate::attestation::Attestation;
use crate::error::ProofError;
use crate::program::StepProgram;
use crate::system::ProvingSystem;

/// Summary of one folded message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub message_number: u64,
    pub accepted: bool,
    /// The message moved the running highest.
    pub raised: bool,
    pub output: u64,
}

/// Explicit fold accumulator: the current tip plus whether the next step
/// must verify it.
pub struct ChainBuilder<'a, P> {
    program: &'a StepProgram<P>,
    tip: Attestation,
    recursive: bool,
    history: Vec<StepRecord>,
}

impl<'a, P: ProvingSystem> ChainBuilder<'a, P> {
    /// Start from the base attestation; the first step is non-recursive.
    pub fn new(program: &'a StepProgram<P>) -> Self {
        ChainBuilder {
            program,
            tip: program.dummy(),
            recursive: false,
            history: Vec::new(),
        }
    }

    /// Start from [`StepProgram::bootstrap`]; every step is recursive.
    pub fn bootstrapped(program: &'a StepProgram<P>) -> Result<Self, ProofError> {
        Ok(ChainBuilder {
            program,
            tip: program.bootstrap()?,
            recursive: true,
            history: Vec::new(),
        })
    }

    /// Resume from an existing verified attestation.
    pub fn resume(program: &'a StepProgram<P>, tip: Attestation) -> Result<Self, ProofError> {
        program.system().verify_if(&tip, true)?;
        Ok(ChainBuilder {
            program,
            tip,
            recursive: true,
            history: Vec::new(),
        })
    }

    pub fn push(&mut self, message: &Message) -> Result<&StepRecord, ProofError> {
        let next = self.program.step(message, &self.tip, self.recursive)?;
        let record = StepRecord {
            message_number: message.message_number,
            accepted: next.statement.accepted,
            raised: next.statement.output != next.statement.prev_output,
            output: next.output(),
        };
        self.tip = next;
        self.recursive = true;
        self.history.push(record);
        Ok(&self.history[self.history.len() - 1])
    }

    pub fn extend<I>(mut self, messages: I) -> Result<Self, ProofError>
    where
        I: IntoIterator<Item = Message>,
    {
        for message in messages {
            self.push(&message)?;
        }
        Ok(self)
    }

    pub fn tip(&self) -> &Attestation {
        &self.tip
    }

    pub fn history(&self) -> &[StepRecord] {
        &self.history
    }

    pub fn finish(self) -> Attestation {
        self.into_parts().0
    }

    pub fn into_parts(self) -> (Attestation, Vec<StepRecord>) {
        info!(
            steps = self.history.len(),
            output = self.tip.output(),
            "chain folded"
        );
        (self.tip, self.history)
    }
}

/// Fold independent batches, each from its own base attestation.
#[cfg(feature = "parallel")]
pub fn fold_independent<P>(
    program: &StepProgram<P>,
    batches: &[Vec<Message>],
) -> Vec<Result<Attestation, ProofError>>
where
    P: ProvingSystem + Sync,
{
    use rayon::prelude::*;

    batches
        .par_iter()
        .map(|batch| program.fold(batch.iter().copied()))
        .collect()
}

/// Fold independent batches, each from its own base attestation.
#[cfg(not(feature = "parallel"))]
pub fn fold_independent<P>(
    program: &StepProgram<P>,
    batches: &[Vec<Message>],
) -> Vec<Result<Attestation, ProofError>>
where
    P: ProvingSystem,
{
    batches
        .iter()
        .map(|batch| program.fold(batch.iter().copied()))
        .collect()
}
