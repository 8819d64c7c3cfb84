//! Attestation types.
//!
//! An attestation claims "this program, applied to some chain of messages,
//! produced `output`". Step attestations link to the attestation they extend
//! through `prior_digest`, forming a singly-linked chain back to a base.

use serde::{Deserialize, Serialize};
use spymaster_circuit::{CircuitShape, Fp, Message};
use spymaster_common::{domain_hash, serde_hex32, serde_hex_vec, PROGRAM_VERSION};

use crate::error::ProofError;

const PROGRAM_DOMAIN: &[u8] = b"spymaster_program_v1";
const ATTESTATION_DOMAIN: &[u8] = b"spymaster_attestation_v1";
const MESSAGE_DOMAIN: &[u8] = b"spymaster_message_v1";

/// Identity of a compiled step program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInfo {
    pub name: String,
    pub version: u32,
    pub shape: CircuitShape,
    #[serde(with = "serde_hex32")]
    pub id: [u8; 32],
}

impl ProgramInfo {
    /// Measure the step circuit and derive the program id from its shape.
    pub fn compile(name: impl Into<String>) -> Result<Self, ProofError> {
        let name = name.into();
        let shape = spymaster_circuit::StepCircuit::shape()?;
        let id = domain_hash(
            PROGRAM_DOMAIN,
            &[
                name.as_bytes(),
                &PROGRAM_VERSION.to_le_bytes(),
                &shape.to_bytes(),
            ],
        );
        Ok(ProgramInfo {
            name,
            version: PROGRAM_VERSION,
            shape,
            id,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttestationKind {
    /// Placeholder that carries an output but no proof. Never verifies.
    Base,
    /// Produced by one application of the step function.
    Step,
}

/// Public claim of a step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub prev_output: u64,
    pub output: u64,
    pub accepted: bool,
    pub recursive: bool,
    /// Number of steps folded into this attestation.
    pub depth: u64,
    #[serde(with = "serde_hex32")]
    pub prior_digest: [u8; 32],
    #[serde(with = "serde_hex32")]
    pub message_commitment: [u8; 32],
}

impl Statement {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(90);
        out.extend_from_slice(&self.prev_output.to_le_bytes());
        out.extend_from_slice(&self.output.to_le_bytes());
        out.push(self.accepted as u8);
        out.push(self.recursive as u8);
        out.extend_from_slice(&self.depth.to_le_bytes());
        out.extend_from_slice(&self.prior_digest);
        out.extend_from_slice(&self.message_commitment);
        out
    }

    /// Public inputs the step circuit must have exposed for this claim.
    pub fn public_inputs(&self) -> Vec<Fp> {
        vec![
            Fp::from(self.prev_output),
            Fp::from(self.output),
            Fp::from(self.accepted as u64),
        ]
    }
}

/// What the prover hands the backend alongside a statement.
#[derive(Clone, Debug)]
pub struct StepEvidence {
    pub public_inputs: Vec<Fp>,
    pub shape: CircuitShape,
    /// Set only after the prior attestation passed verification.
    pub prior_verified: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    #[serde(with = "serde_hex32")]
    pub program_id: [u8; 32],
    pub kind: AttestationKind,
    pub statement: Statement,
    #[serde(with = "serde_hex_vec")]
    pub proof: Vec<u8>,
}

impl Attestation {
    /// A base attestation for `program_id` carrying `output`.
    pub fn base(program_id: [u8; 32], output: u64) -> Self {
        Attestation {
            program_id,
            kind: AttestationKind::Base,
            statement: Statement {
                output,
                ..Statement::default()
            },
            proof: Vec::new(),
        }
    }

    pub fn output(&self) -> u64 {
        self.statement.output
    }

    pub fn depth(&self) -> u64 {
        self.statement.depth
    }

    pub fn is_base(&self) -> bool {
        self.kind == AttestationKind::Base
    }

    /// Digest binding every field, proof included.
    pub fn digest(&self) -> [u8; 32] {
        let kind = [match self.kind {
            AttestationKind::Base => 0u8,
            AttestationKind::Step => 1u8,
        }];
        domain_hash(
            ATTESTATION_DOMAIN,
            &[
                &self.program_id,
                &kind,
                &self.statement.to_bytes(),
                &self.proof,
            ],
        )
    }
}

/// Binding commitment to a message's five attributes.
pub fn message_commitment(message: &Message) -> [u8; 32] {
    domain_hash(MESSAGE_DOMAIN, &[&message.to_bytes()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_id_depends_on_name() {
        let a = ProgramInfo::compile("process-messages").unwrap();
        let b = ProgramInfo::compile("other").unwrap();
        assert_eq!(a.shape, b.shape);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_base_attestation() {
        let base = Attestation::base([1u8; 32], 0);
        assert!(base.is_base());
        assert_eq!(base.output(), 0);
        assert_eq!(base.depth(), 0);
        assert!(base.proof.is_empty());
    }

    #[test]
    fn test_digest_covers_output() {
        let a = Attestation::base([1u8; 32], 0);
        let b = Attestation::base([1u8; 32], 1);
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn test_message_commitment_is_field_sensitive() {
        let m = Message::new(1, 100, 1000, 5000, 6100);
        let mut swapped = m;
        swapped.agent_x_loc = 5000;
        swapped.agent_y_loc = 1000;
        assert_ne!(message_commitment(&m), message_commitment(&swapped));
    }
}
