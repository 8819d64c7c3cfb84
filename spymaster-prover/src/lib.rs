//! Recursive attestations over the spymaster step circuit.
//!
//! A [`StepProgram`] folds messages one at a time. Each step verifies the
//! attestation it extends (when told to), evaluates the step circuit, and asks
//! a [`ProvingSystem`] to certify the result. The shipped backend is
//! [`KeyedTranscriptSystem`].

pub mod attestation;
pub mod chain;
pub mod error;
pub mod keyed;
pub mod program;
pub mod system;

pub use attestation::{
    message_commitment, Attestation, AttestationKind, ProgramInfo, Statement, StepEvidence,
};
pub use chain::{fold_independent, ChainBuilder, StepRecord};
pub use error::ProofError;
pub use keyed::{AttestationKey, KeyedTranscriptSystem};
pub use program::StepProgram;
pub use system::ProvingSystem;
