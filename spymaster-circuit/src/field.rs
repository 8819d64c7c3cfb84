//! Conversions between field elements and machine integers.

use ff::PrimeField;

use crate::error::Error;

/// Embed a `u64` into the field.
pub fn field_from_u64<F: PrimeField>(value: u64) -> F {
    F::from(value)
}

/// Recover a `u64` from a field element whose canonical form fits in 64 bits.
///
/// Assumes a little-endian `Repr`, which holds for the pasta fields.
pub fn u64_from_field<F: PrimeField>(value: &F) -> Result<u64, Error> {
    let repr = value.to_repr();
    let bytes = repr.as_ref();
    if bytes.len() < 8 || bytes[8..].iter().any(|b| *b != 0) {
        return Err(Error::NonCanonical { bits: 64 });
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    Ok(u64::from_le_bytes(buf))
}
