//! Counting driver: measures circuit size without touching witnesses.

use std::marker::PhantomData;

use ff::PrimeField;
use serde::{Deserialize, Serialize};

use crate::driver::Driver;
use crate::error::Error;

/// Size of a synthesized circuit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CircuitShape {
    pub allocations: usize,
    pub multiplications: usize,
    pub linear_constraints: usize,
    pub public_inputs: usize,
}

impl CircuitShape {
    /// Multiplication gates plus linear constraints.
    pub fn constraints(&self) -> usize {
        self.multiplications + self.linear_constraints
    }

    /// Stable byte encoding, used to bind program identifiers to a circuit.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (chunk, n) in out.chunks_exact_mut(8).zip([
            self.allocations,
            self.multiplications,
            self.linear_constraints,
            self.public_inputs,
        ]) {
            chunk.copy_from_slice(&(n as u64).to_le_bytes());
        }
        out
    }
}

/// Records allocations and constraints; carries no values.
#[derive(Debug, Clone)]
pub struct CountingDriver<F> {
    shape: CircuitShape,
    _marker: PhantomData<F>,
}

impl<F: PrimeField> Default for CountingDriver<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PrimeField> CountingDriver<F> {
    pub fn new() -> Self {
        CountingDriver {
            shape: CircuitShape::default(),
            _marker: PhantomData,
        }
    }

    pub fn shape(&self) -> CircuitShape {
        self.shape
    }
}

impl<F: PrimeField> Driver for CountingDriver<F> {
    type F = F;
    type W = ();

    fn one(&self) -> Self::W {}

    fn value(_wire: &Self::W) -> Option<F> {
        None
    }

    fn alloc(&mut self, _value: impl FnOnce() -> Result<F, Error>) -> Result<Self::W, Error> {
        self.shape.allocations += 1;
        Ok(())
    }

    fn mul(&mut self, _a: &Self::W, _b: &Self::W) -> Result<Self::W, Error> {
        self.shape.multiplications += 1;
        Ok(())
    }

    fn add(&mut self, _lc: &[(Self::W, F)]) -> Result<Self::W, Error> {
        Ok(())
    }

    fn enforce_zero(&mut self, _lc: &[(Self::W, F)]) -> Result<(), Error> {
        self.shape.linear_constraints += 1;
        Ok(())
    }

    fn expose(&mut self, _wire: &Self::W) -> Result<(), Error> {
        self.shape.public_inputs += 1;
        Ok(())
    }
}
