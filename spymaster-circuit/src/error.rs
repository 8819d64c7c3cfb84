//! Errors raised during circuit synthesis.

use thiserror::Error;

/// Errors that can occur while synthesizing a circuit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A constraint evaluated to a nonzero value.
    #[error("unsatisfied constraint #{index}: {message}")]
    Unsatisfied {
        /// Position of the constraint in synthesis order.
        index: usize,
        message: &'static str,
    },

    /// A gadget needed a concrete value from a driver that carries none.
    #[error("missing witness value: {0}")]
    MissingWitness(&'static str),

    /// A gadget was invoked with parameters it cannot support.
    #[error("invalid gadget configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A field element does not fit the requested integer type.
    #[error("field element is not a canonical {bits}-bit integer")]
    NonCanonical { bits: usize },
}
