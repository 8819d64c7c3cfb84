//! The recursive step circuit.
//!
//! One step consumes a message and the running highest message number carried
//! by the prior attestation, and produces the next running highest:
//!
//! ```text
//! public inputs: [prev_highest, new_highest, accepted]
//! new_highest = select(accepted AND NOT duplicate, message_number, prev_highest)
//! ```
//!
//! Verification of the prior attestation is not part of this circuit; the
//! proving backend binds it when it certifies the step.

use pasta_curves::Fp;
use serde::{Deserialize, Serialize};

use crate::driver::Driver;
use crate::drivers::{CircuitShape, CountingDriver, WitnessDriver};
use crate::error::Error;
use crate::field::u64_from_field;
use crate::gadgets::{and, not, select, BoolWire};
use crate::message::Message;
use crate::predicates::{alloc_u64, is_valid, MessageWires, ValidityWires};

/// Number of public inputs exposed by [`StepCircuit`].
pub const STEP_PUBLIC_INPUTS: usize = 3;

/// Witness for one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCircuit {
    pub message: Message,
    pub prev_highest: u64,
}

/// Wires produced by [`StepCircuit::synthesize`].
pub struct StepWires<D: Driver> {
    pub prev_highest: D::W,
    pub validity: ValidityWires<D>,
    pub raises: BoolWire<D>,
    pub new_highest: D::W,
}

/// Concrete result of evaluating a step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    pub accepted: bool,
    pub raised: bool,
    pub new_highest: u64,
    pub public_inputs: Vec<Fp>,
    pub shape: CircuitShape,
}

impl StepCircuit {
    pub fn new(message: Message, prev_highest: u64) -> Self {
        StepCircuit {
            message,
            prev_highest,
        }
    }

    pub fn synthesize<D: Driver>(&self, dr: &mut D) -> Result<StepWires<D>, Error> {
        let prev_highest = alloc_u64(dr, self.prev_highest)?;
        dr.expose(&prev_highest)?;

        let message = MessageWires::alloc(dr, &self.message)?;
        let validity = is_valid(dr, &message, &prev_highest)?;

        let fresh = not(dr, &validity.duplicate)?;
        let raises = and(dr, &validity.valid, &fresh)?;
        let new_highest = select(dr, &raises, &message.message_number, &prev_highest)?;

        dr.expose(&new_highest)?;
        dr.expose(validity.valid.wire())?;

        Ok(StepWires {
            prev_highest,
            validity,
            raises,
            new_highest,
        })
    }

    /// Synthesize over the Pallas base field, checking every constraint.
    pub fn evaluate(&self) -> Result<StepOutcome, Error> {
        let mut dr = WitnessDriver::<Fp>::new();
        let wires = self.synthesize(&mut dr)?;

        let new_highest = u64_from_field(&wires.new_highest.value())?;
        let accepted = wires
            .validity
            .valid
            .value()
            .ok_or(Error::MissingWitness("accepted flag"))?;
        let raised = wires
            .raises
            .value()
            .ok_or(Error::MissingWitness("raise flag"))?;
        let shape = dr.shape();

        Ok(StepOutcome {
            accepted,
            raised,
            new_highest,
            public_inputs: dr.into_public_inputs(),
            shape,
        })
    }

    /// Shape of the step circuit. Independent of the witness.
    pub fn shape() -> Result<CircuitShape, Error> {
        let mut dr = CountingDriver::<Fp>::new();
        StepCircuit::new(Message::dummy(), 0).synthesize(&mut dr)?;
        Ok(dr.shape())
    }
}
