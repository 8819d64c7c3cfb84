//! Witness driver: evaluates a circuit on concrete values.
//!
//! Every wire holds its value. Multiplications are computed, linear
//! combinations are summed, and each `enforce_zero` is checked immediately, so
//! synthesis fails at the first constraint the witness does not satisfy.

use ff::PrimeField;

use crate::driver::Driver;
use crate::drivers::CircuitShape;
use crate::error::Error;

/// A wire in the witness driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WitnessWire<F> {
    value: F,
}

impl<F: PrimeField> WitnessWire<F> {
    pub const fn value(&self) -> F {
        self.value
    }
}

/// Evaluates constraints on concrete values and collects public inputs.
#[derive(Debug, Clone)]
pub struct WitnessDriver<F: PrimeField> {
    shape: CircuitShape,
    public_inputs: Vec<F>,
}

impl<F: PrimeField> Default for WitnessDriver<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PrimeField> WitnessDriver<F> {
    pub fn new() -> Self {
        WitnessDriver {
            shape: CircuitShape::default(),
            public_inputs: Vec::new(),
        }
    }

    /// Public inputs in the order they were exposed.
    pub fn public_inputs(&self) -> &[F] {
        &self.public_inputs
    }

    /// Shape of everything synthesized so far.
    pub fn shape(&self) -> CircuitShape {
        self.shape
    }

    pub fn into_public_inputs(self) -> Vec<F> {
        self.public_inputs
    }

    fn sum(lc: &[(WitnessWire<F>, F)]) -> F {
        lc.iter()
            .fold(F::ZERO, |acc, (wire, coeff)| acc + wire.value * coeff)
    }
}

impl<F: PrimeField> Driver for WitnessDriver<F> {
    type F = F;
    type W = WitnessWire<F>;

    fn one(&self) -> Self::W {
        WitnessWire { value: F::ONE }
    }

    fn value(wire: &Self::W) -> Option<F> {
        Some(wire.value)
    }

    fn alloc(&mut self, value: impl FnOnce() -> Result<F, Error>) -> Result<Self::W, Error> {
        self.shape.allocations += 1;
        Ok(WitnessWire { value: value()? })
    }

    fn mul(&mut self, a: &Self::W, b: &Self::W) -> Result<Self::W, Error> {
        self.shape.multiplications += 1;
        Ok(WitnessWire {
            value: a.value * b.value,
        })
    }

    fn add(&mut self, lc: &[(Self::W, F)]) -> Result<Self::W, Error> {
        Ok(WitnessWire {
            value: Self::sum(lc),
        })
    }

    fn enforce_zero(&mut self, lc: &[(Self::W, F)]) -> Result<(), Error> {
        let index = self.shape.linear_constraints;
        self.shape.linear_constraints += 1;
        if Self::sum(lc) != F::ZERO {
            return Err(Error::Unsatisfied {
                index,
                message: "linear combination is nonzero",
            });
        }
        Ok(())
    }

    fn expose(&mut self, wire: &Self::W) -> Result<(), Error> {
        self.shape.public_inputs += 1;
        self.public_inputs.push(wire.value);
        Ok(())
    }
}
