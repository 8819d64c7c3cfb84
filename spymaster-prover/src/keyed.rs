//! Designated-verifier backend.
//!
//! A proof is a keyed BLAKE3 MAC over a domain-separated transcript of the
//! program id, the circuit shape and the statement. Whoever holds the
//! [`AttestationKey`] can both certify and verify; nobody else can forge a
//! step attestation. `certify` only signs statements whose circuit evidence
//! matches them.

use std::fmt;

use rand::{rngs::OsRng, CryptoRng, RngCore};
use spymaster_common::KeyManifest;
use subtle::ConstantTimeEq;

use crate::attestation::{Attestation, AttestationKind, ProgramInfo, Statement, StepEvidence};
use crate::error::ProofError;
use crate::system::ProvingSystem;

const TRANSCRIPT_DOMAIN: &[u8] = b"spymaster_step_transcript_v1";
pub const KEY_LEN: usize = 32;
pub const PROOF_LEN: usize = 32;

#[derive(Clone, PartialEq, Eq)]
pub struct AttestationKey([u8; KEY_LEN]);

impl AttestationKey {
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rng.fill_bytes(&mut bytes);
        AttestationKey(bytes)
    }

    pub fn random() -> Self {
        Self::generate(&mut OsRng)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProofError> {
        let bytes: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
            ProofError::InvalidKey(format!("expected {KEY_LEN} bytes, got {}", bytes.len()))
        })?;
        Ok(AttestationKey(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    pub fn to_manifest(&self, program: &str) -> KeyManifest {
        KeyManifest::new(program, &self.0)
    }

    pub fn from_manifest(manifest: &KeyManifest) -> Result<Self, ProofError> {
        let bytes = manifest
            .key_bytes()
            .map_err(|e| ProofError::InvalidKey(format!("{e:#}")))?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Debug for AttestationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AttestationKey(..)")
    }
}

#[derive(Clone, Debug)]
pub struct KeyedTranscriptSystem {
    key: AttestationKey,
    program: ProgramInfo,
}

impl KeyedTranscriptSystem {
    pub fn new(key: AttestationKey, program: ProgramInfo) -> Self {
        KeyedTranscriptSystem { key, program }
    }

    fn transcript_mac(&self, statement: &Statement) -> [u8; PROOF_LEN] {
        let mut hasher = blake3::Hasher::new_keyed(self.key.as_bytes());
        hasher.update(TRANSCRIPT_DOMAIN);
        hasher.update(&self.program.id);
        hasher.update(&self.program.shape.to_bytes());
        hasher.update(&statement.to_bytes());
        *hasher.finalize().as_bytes()
    }
}

impl ProvingSystem for KeyedTranscriptSystem {
    fn program(&self) -> &ProgramInfo {
        &self.program
    }

    fn verify(&self, attestation: &Attestation) -> bool {
        if attestation.kind != AttestationKind::Step
            || attestation.program_id != self.program.id
            || attestation.proof.len() != PROOF_LEN
        {
            return false;
        }
        let expected = self.transcript_mac(&attestation.statement);
        expected
            .as_slice()
            .ct_eq(attestation.proof.as_slice())
            .into()
    }

    fn certify(
        &self,
        statement: Statement,
        evidence: &StepEvidence,
    ) -> Result<Attestation, ProofError> {
        if evidence.shape != self.program.shape {
            return Err(ProofError::InvalidEvidence(
                "circuit shape differs from the compiled program".into(),
            ));
        }
        if evidence.public_inputs != statement.public_inputs() {
            return Err(ProofError::InvalidEvidence(
                "public inputs do not match the statement".into(),
            ));
        }
        if statement.recursive && !evidence.prior_verified {
            return Err(ProofError::InvalidEvidence(
                "recursive statement without a verified prior".into(),
            ));
        }

        Ok(Attestation {
            program_id: self.program.id,
            kind: AttestationKind::Step,
            proof: self.transcript_mac(&statement).to_vec(),
            statement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use spymaster_circuit::{Message, StepCircuit};

    fn system() -> KeyedTranscriptSystem {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        KeyedTranscriptSystem::new(
            AttestationKey::generate(&mut rng),
            ProgramInfo::compile("process-messages").unwrap(),
        )
    }

    fn certified(system: &KeyedTranscriptSystem) -> Attestation {
        let m = Message::with_check_sum(1, 100, 1000, 5000).unwrap();
        let out = StepCircuit::new(m, 0).evaluate().unwrap();
        let statement = Statement {
            prev_output: 0,
            output: out.new_highest,
            accepted: out.accepted,
            ..Statement::default()
        };
        let evidence = StepEvidence {
            public_inputs: out.public_inputs,
            shape: out.shape,
            prior_verified: false,
        };
        system.certify(statement, &evidence).unwrap()
    }

    #[test]
    fn test_certified_attestation_verifies() {
        let system = system();
        let att = certified(&system);
        assert_eq!(att.output(), 1);
        assert!(system.verify(&att));
        assert!(system.verify_if(&att, true).is_ok());
    }

    #[test]
    fn test_base_never_verifies() {
        let system = system();
        let base = system.base(0);
        assert!(!system.verify(&base));
        assert!(system.verify_if(&base, false).is_ok());
        assert!(matches!(
            system.verify_if(&base, true),
            Err(ProofError::VerificationFailure(_))
        ));
    }

    #[test]
    fn test_tampering_is_detected() {
        let system = system();
        let att = certified(&system);

        let mut raised = att.clone();
        raised.statement.output = 1000;
        assert!(!system.verify(&raised));

        let mut flipped = att.clone();
        flipped.proof[0] ^= 1;
        assert!(!system.verify(&flipped));

        let mut truncated = att;
        truncated.proof.pop();
        assert!(!system.verify(&truncated));
    }

    #[test]
    fn test_other_key_rejects() {
        let att = certified(&system());
        let other = KeyedTranscriptSystem::new(
            AttestationKey::random(),
            ProgramInfo::compile("process-messages").unwrap(),
        );
        assert!(!other.verify(&att));
    }

    #[test]
    fn test_certify_rejects_mismatched_evidence() {
        let system = system();
        let statement = Statement {
            output: 5,
            accepted: true,
            ..Statement::default()
        };
        let evidence = StepEvidence {
            public_inputs: Statement::default().public_inputs(),
            shape: system.program().shape,
            prior_verified: false,
        };
        assert!(matches!(
            system.certify(statement, &evidence),
            Err(ProofError::InvalidEvidence(_))
        ));

        let recursive = Statement {
            recursive: true,
            ..Statement::default()
        };
        let evidence = StepEvidence {
            public_inputs: recursive.public_inputs(),
            shape: system.program().shape,
            prior_verified: false,
        };
        assert!(matches!(
            system.certify(recursive, &evidence),
            Err(ProofError::InvalidEvidence(_))
        ));
    }

    #[test]
    fn test_key_manifest_round_trip() {
        let key = AttestationKey::random();
        let manifest = key.to_manifest("process-messages");
        assert_eq!(AttestationKey::from_manifest(&manifest).unwrap(), key);
        assert!(AttestationKey::from_bytes(&[0u8; 16]).is_err());
    }
}
