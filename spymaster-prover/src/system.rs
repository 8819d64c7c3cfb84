//! The proving capability the step function and the settlement contract
//! depend on. Backends decide what a proof is; callers only see this trait.

use tracing::warn;

use crate::attestation::{Attestation, ProgramInfo, Statement, StepEvidence};
use crate::error::ProofError;

pub trait ProvingSystem {
    /// The program this system produces and accepts attestations for.
    fn program(&self) -> &ProgramInfo;

    /// True iff `attestation` is a genuine step attestation of this program.
    /// Base attestations never verify.
    fn verify(&self, attestation: &Attestation) -> bool;

    /// Certify a statement backed by step evidence.
    fn certify(
        &self,
        statement: Statement,
        evidence: &StepEvidence,
    ) -> Result<Attestation, ProofError>;

    /// Verify only when `condition` holds.
    fn verify_if(&self, attestation: &Attestation, condition: bool) -> Result<(), ProofError> {
        if !condition || self.verify(attestation) {
            return Ok(());
        }
        warn!(
            depth = attestation.depth(),
            output = attestation.output(),
            "prior attestation failed verification"
        );
        Err(ProofError::VerificationFailure(format!(
            "{:?} attestation at depth {} does not verify",
            attestation.kind,
            attestation.depth()
        )))
    }

    /// A base attestation carrying `output`.
    fn base(&self, output: u64) -> Attestation {
        Attestation::base(self.program().id, output)
    }
}

impl<P: ProvingSystem + ?Sized> ProvingSystem for &P {
    fn program(&self) -> &ProgramInfo {
        (**self).program()
    }

    fn verify(&self, attestation: &Attestation) -> bool {
        (**self).verify(attestation)
    }

    fn certify(
        &self,
        statement: Statement,
        evidence: &StepEvidence,
    ) -> Result<Attestation, ProofError> {
        (**self).certify(statement, evidence)
    }
}
