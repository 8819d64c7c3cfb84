
//! Equality and ordering comparisons over range-checked integers.

use ff::Field;

use crate::driver::{witness, Driver};
use crate::error::Error;
use crate::gadgets::boolean::{not, BoolWire};
use crate::gadgets::range::{pow2, to_bits};

/// Returns 1 iff `a == 0`.
///
/// Witnesses `inv = a^-1` (or 0), sets `out = 1 - a * inv` and enforces
/// `a * out = 0`.
pub fn is_zero<D: Driver>(dr: &mut D, a: &D::W) -> Result<BoolWire<D>, Error> {
    let inv = dr.alloc(|| {
        let v = witness::<D>(a, "is_zero input")?;
        Ok(v.invert().unwrap_or(D::F::ZERO))
    })?;
    let product = dr.mul(a, &inv)?;
    let one = dr.one();
    let out = dr.add(&[(one, D::F::ONE), (product, -D::F::ONE)])?;
    let check = dr.mul(a, &out)?;
    dr.enforce_zero(&[(check, D::F::ONE)])?;
    Ok(BoolWire::new_unchecked(out))
}

/// Returns 1 iff `a == b`.
pub fn is_equal<D: Driver>(dr: &mut D, a: &D::W, b: &D::W) -> Result<BoolWire<D>, Error> {
    let diff = dr.add(&[(a.clone(), D::F::ONE), (b.clone(), -D::F::ONE)])?;
    is_zero(dr, &diff)
}

/// Returns 1 iff `a < b`.
///
/// Both inputs must already be constrained below `2^num_bits`. The gadget
/// decomposes `a - b + 2^num_bits` into `num_bits + 1` bits; the top bit is set
/// exactly when `a >= b`.
pub fn is_less_than<D: Driver>(
    dr: &mut D,
    a: &D::W,
    b: &D::W,
    num_bits: usize,
) -> Result<BoolWire<D>, Error> {
    let one = dr.one();
    let shifted = dr.add(&[
        (a.clone(), D::F::ONE),
        (b.clone(), -D::F::ONE),
        (one, pow2::<D::F>(num_bits)),
    ])?;
    let bits = to_bits(dr, &shifted, num_bits + 1)?;
    let top = &bits[num_bits];
    not(dr, top)
}

/// Returns 1 iff `a <= b`. Same input requirements as [`is_less_than`].
pub fn is_less_or_equal<D: Driver>(
    dr: &mut D,
    a: &D::W,
    b: &D::W,
    num_bits: usize,
) -> Result<BoolWire<D>, Error> {
    let b_lt_a = is_less_than(dr, b, a, num_bits)?;
    not(dr, &b_lt_a)
}
