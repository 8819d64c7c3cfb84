//! Driver implementations.

mod counting;
mod witness;

pub use counting::{CircuitShape, CountingDriver};
pub use witness::{WitnessDriver, WitnessWire};
