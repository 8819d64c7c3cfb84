
//! Conditional selection.

use ff::Field;

use crate::driver::Driver;
use crate::error::Error;
use crate::gadgets::boolean::BoolWire;

/// Returns `a` if `cond` is 1, else `b`, as `cond * (a - b) + b`.
pub fn select<D: Driver>(
    dr: &mut D,
    cond: &BoolWire<D>,
    a: &D::W,
    b: &D::W,
) -> Result<D::W, Error> {
    let diff = dr.add(&[(a.clone(), D::F::ONE), (b.clone(), -D::F::ONE)])?;
    let scaled = dr.mul(cond.wire(), &diff)?;
    dr.add(&[(scaled, D::F::ONE), (b.clone(), D::F::ONE)])
}
