//! Circuit synthesis drivers.
//!
//! A `Driver` decides what happens when a circuit is synthesized. The same
//! gadget code runs against every driver:
//!
//! - [`WitnessDriver`](crate::drivers::WitnessDriver) carries concrete field
//!   values on every wire and checks each constraint as it is emitted.
//! - [`CountingDriver`](crate::drivers::CountingDriver) carries no values and
//!   only records the shape of the circuit.
//!
//! Witness computations are passed as closures so that drivers without values
//! never run them.
//!
//! # Example
//!
//! ```rust
//! use ff::Field;
//! use pasta_curves::Fp;
//! use spymaster_circuit::{Driver, Error, WitnessDriver};
//!
//! fn square_plus_one<D: Driver>(dr: &mut D, a: &D::W) -> Result<D::W, Error> {
//!     let sq = dr.mul(a, a)?;
//!     let one = dr.one();
//!     dr.add(&[(sq, D::F::ONE), (one, D::F::ONE)])
//! }
//!
//! let mut dr = WitnessDriver::<Fp>::new();
//! let a = dr.alloc(|| Ok(Fp::from(3)))?;
//! let out = square_plus_one(&mut dr, &a)?;
//! assert_eq!(WitnessDriver::<Fp>::value(&out), Some(Fp::from(10)));
//! # Ok::<(), Error>(())
//! ```

use ff::{Field, PrimeField};

use crate::error::Error;

/// A circuit synthesis driver.
pub trait Driver: Sized {
    /// The field over which this driver operates.
    type F: PrimeField;

    /// The abstract wire type. All a gadget can do with a wire is clone it,
    /// hand it back to the driver, or ask the driver for its value.
    type W: Clone;

    /// The wire fixed to the constant one.
    fn one(&self) -> Self::W;

    /// The concrete value on a wire, if this driver carries values.
    fn value(wire: &Self::W) -> Option<Self::F>;

    /// Allocate a fresh witness wire. The closure is only invoked by drivers
    /// that carry values.
    fn alloc(&mut self, value: impl FnOnce() -> Result<Self::F, Error>) -> Result<Self::W, Error>;

    /// Create an enforced multiplication gate and return its output wire.
    fn mul(&mut self, a: &Self::W, b: &Self::W) -> Result<Self::W, Error>;

    /// Create a virtual wire equal to a linear combination of wires.
    fn add(&mut self, lc: &[(Self::W, Self::F)]) -> Result<Self::W, Error>;

    /// Enforce that a linear combination of wires equals zero.
    fn enforce_zero(&mut self, lc: &[(Self::W, Self::F)]) -> Result<(), Error>;

    /// Expose a wire as a public input.
    fn expose(&mut self, wire: &Self::W) -> Result<(), Error>;

    /// A wire constrained to a constant value.
    fn constant(&mut self, value: Self::F) -> Result<Self::W, Error> {
        let one = self.one();
        self.add(&[(one, value)])
    }

    /// Enforce that two wires carry the same value.
    fn enforce_equal(&mut self, a: &Self::W, b: &Self::W) -> Result<(), Error> {
        self.enforce_zero(&[(a.clone(), Self::F::ONE), (b.clone(), -Self::F::ONE)])
    }

    /// Enforce `a * (1 - a) = 0`.
    fn enforce_boolean(&mut self, a: &Self::W) -> Result<(), Error> {
        let one = self.one();
        let one_minus_a = self.add(&[(one, Self::F::ONE), (a.clone(), -Self::F::ONE)])?;
        let product = self.mul(a, &one_minus_a)?;
        self.enforce_zero(&[(product, Self::F::ONE)])
    }
}

/// Read a wire value, failing when the driver carries none.
pub(crate) fn witness<D: Driver>(wire: &D::W, what: &'static str) -> Result<D::F, Error> {
    D::value(wire).ok_or(Error::MissingWitness(what))
}
