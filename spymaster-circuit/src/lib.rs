//! Message validity circuit for the spymaster admission chain.
//!
//! The crate has two layers:
//!
//! - [`Message`] and its native predicates, used wherever a plain answer is
//!   enough (fixtures, logging, cross-checks).
//! - A small constraint-synthesis layer ([`Driver`], [`gadgets`],
//!   [`predicates`]) and the [`StepCircuit`] built on it, which the prover
//!   evaluates to obtain the step's public inputs.

pub mod driver;
pub mod drivers;
pub mod error;
pub mod field;
pub mod gadgets;
pub mod message;
pub mod predicates;
pub mod step;

pub use driver::Driver;
pub use drivers::{CircuitShape, CountingDriver, WitnessDriver, WitnessWire};
pub use error::Error;
pub use field::{field_from_u64, u64_from_field};
pub use message::{
    is_valid, next_highest, Message, Validity, MAX_AGENT_ID, MAX_AGENT_X_LOC, MAX_AGENT_Y_LOC,
    MIN_AGENT_Y_LOC, VALUE_BITS,
};
pub use step::{StepCircuit, StepOutcome, StepWires, STEP_PUBLIC_INPUTS};

pub use pasta_curves::Fp;
