use thiserror::Error;

/// Errors raised while producing or checking attestations.
#[derive(Debug, Error)]
pub enum ProofError {
    /// A prior attestation that had to verify did not.
    #[error("verification failed: {0}")]
    VerificationFailure(String),

    /// A non-base prior attestation was supplied on the non-recursive path.
    #[error("structural misuse: {0}")]
    StructuralMisuse(String),

    /// The step circuit could not be synthesized.
    #[error("circuit synthesis failed: {0}")]
    Synthesis(#[from] spymaster_circuit::Error),

    /// The backend refused to certify a statement.
    #[error("evidence rejected: {0}")]
    InvalidEvidence(String),

    #[error("invalid attestation key: {0}")]
    InvalidKey(String),
}
