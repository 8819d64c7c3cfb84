
//! Bit decomposition and range checks.

use ff::{Field, PrimeField};

use crate::driver::Driver;
use crate::error::Error;
use crate::gadgets::boolean::BoolWire;

/// `2^n` as a field element.
pub(crate) fn pow2<F: PrimeField>(n: usize) -> F {
    let mut acc = F::ONE;
    for _ in 0..n {
        acc = acc.double();
    }
    acc
}

/// Decompose `a` into `num_bits` little-endian boolean wires.
///
/// Enforces `sum(bit_i * 2^i) = a`, so this fails whenever `a >= 2^num_bits`.
pub fn to_bits<D: Driver>(
    dr: &mut D,
    a: &D::W,
    num_bits: usize,
) -> Result<Vec<BoolWire<D>>, Error> {
    if num_bits == 0 || num_bits >= D::F::NUM_BITS as usize {
        return Err(Error::InvalidConfiguration(
            "bit length must be nonzero and below the field size",
        ));
    }

    let repr = D::value(a).map(|v| v.to_repr());
    let mut bits = Vec::with_capacity(num_bits);
    for i in 0..num_bits {
        let bit = BoolWire::alloc(dr, || {
            let repr = repr.ok_or(Error::MissingWitness("value to decompose"))?;
            let bytes = repr.as_ref();
            Ok((bytes[i / 8] >> (i % 8)) & 1 == 1)
        })?;
        bits.push(bit);
    }

    let mut lc = Vec::with_capacity(num_bits + 1);
    let mut coeff = D::F::ONE;
    for bit in &bits {
        lc.push((bit.wire().clone(), coeff));
        coeff = coeff.double();
    }
    lc.push((a.clone(), -D::F::ONE));
    dr.enforce_zero(&lc)?;

    Ok(bits)
}

/// Enforce `a < 2^num_bits`.
pub fn range_check<D: Driver>(dr: &mut D, a: &D::W, num_bits: usize) -> Result<(), Error> {
    to_bits(dr, a, num_bits).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::WitnessDriver;
    use pasta_curves::Fp;

    #[test]
    fn test_to_bits_little_endian() {
        let mut dr = WitnessDriver::<Fp>::new();
        let a = dr.alloc(|| Ok(Fp::from(0b1011))).unwrap();
        let bits = to_bits(&mut dr, &a, 4).unwrap();
        let values: Vec<_> = bits.iter().map(|b| b.value().unwrap()).collect();
        assert_eq!(values, vec![true, true, false, true]);
    }

    #[test]
    fn test_range_check_boundaries() {
        let mut dr = WitnessDriver::<Fp>::new();
        let max = dr.alloc(|| Ok(Fp::from(u64::MAX))).unwrap();
        assert!(range_check(&mut dr, &max, 64).is_ok());

        let over = dr.alloc(|| Ok(pow2::<Fp>(64))).unwrap();
        assert!(matches!(
            range_check(&mut dr, &over, 64),
            Err(Error::Unsatisfied { .. })
        ));
    }

    #[test]
    fn test_rejects_degenerate_widths() {
        let mut dr = WitnessDriver::<Fp>::new();
        let a = dr.alloc(|| Ok(Fp::ONE)).unwrap();
        assert!(matches!(
            to_bits(&mut dr, &a, 0),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            to_bits(&mut dr, &a, Fp::NUM_BITS as usize),
            Err(Error::InvalidConfiguration(_))
        ));
    }
}
