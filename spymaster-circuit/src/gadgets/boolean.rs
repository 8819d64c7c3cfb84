
//! Boolean gadgets.

use ff::Field;

use crate::driver::Driver;
use crate::error::Error;

/// A wire constrained to 0 or 1.
pub struct BoolWire<D: Driver> {
    wire: D::W,
}

impl<D: Driver> Clone for BoolWire<D> {
    fn clone(&self) -> Self {
        BoolWire {
            wire: self.wire.clone(),
        }
    }
}

impl<D: Driver> BoolWire<D> {
    /// Wrap a wire the caller has already constrained to be boolean.
    pub fn new_unchecked(wire: D::W) -> Self {
        BoolWire { wire }
    }

    /// Allocate a boolean witness and enforce `w * (1 - w) = 0`.
    pub fn alloc(dr: &mut D, value: impl FnOnce() -> Result<bool, Error>) -> Result<Self, Error> {
        let wire = dr.alloc(|| {
            Ok(if value()? {
                D::F::ONE
            } else {
                D::F::ZERO
            })
        })?;
        dr.enforce_boolean(&wire)?;
        Ok(BoolWire { wire })
    }

    pub fn constant(dr: &mut D, value: bool) -> Result<Self, Error> {
        let wire = dr.constant(if value { D::F::ONE } else { D::F::ZERO })?;
        Ok(BoolWire { wire })
    }

    pub fn wire(&self) -> &D::W {
        &self.wire
    }

    /// The boolean value, if the driver carries values.
    pub fn value(&self) -> Option<bool> {
        D::value(&self.wire).map(|v| v == D::F::ONE)
    }
}

/// `a AND b = a * b`
pub fn and<D: Driver>(dr: &mut D, a: &BoolWire<D>, b: &BoolWire<D>) -> Result<BoolWire<D>, Error> {
    let c = dr.mul(&a.wire, &b.wire)?;
    Ok(BoolWire::new_unchecked(c))
}

/// `a OR b = a + b - a * b`
pub fn or<D: Driver>(dr: &mut D, a: &BoolWire<D>, b: &BoolWire<D>) -> Result<BoolWire<D>, Error> {
    let ab = and(dr, a, b)?;
    let wire = dr.add(&[
        (a.wire.clone(), D::F::ONE),
        (b.wire.clone(), D::F::ONE),
        (ab.wire, -D::F::ONE),
    ])?;
    Ok(BoolWire::new_unchecked(wire))
}

/// `NOT a = 1 - a`
pub fn not<D: Driver>(dr: &mut D, a: &BoolWire<D>) -> Result<BoolWire<D>, Error> {
    let one = dr.one();
    let wire = dr.add(&[(one, D::F::ONE), (a.wire.clone(), -D::F::ONE)])?;
    Ok(BoolWire::new_unchecked(wire))
}

/// Fold a slice of booleans with AND. An empty slice is true.
pub fn and_all<D: Driver>(dr: &mut D, terms: &[BoolWire<D>]) -> Result<BoolWire<D>, Error> {
    let mut iter = terms.iter();
    let mut acc = match iter.next() {
        Some(first) => first.clone(),
        None => return BoolWire::constant(dr, true),
    };
    for term in iter {
        acc = and(dr, &acc, term)?;
    }
    Ok(acc)
}
