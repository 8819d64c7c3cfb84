//! In-circuit message validity predicates.
//!
//! Each function mirrors the native check of the same name on
//! [`Message`](crate::Message). Every predicate is always synthesized; the
//! composite combines them with boolean gates.

use ff::Field;

use crate::driver::Driver;
use crate::error::Error;
use crate::field::field_from_u64;
use crate::gadgets::{
    and, and_all, is_equal, is_less_or_equal, is_less_than, is_zero, or, range_check, BoolWire,
};
use crate::message::{
    Message, MAX_AGENT_ID, MAX_AGENT_X_LOC, MAX_AGENT_Y_LOC, MIN_AGENT_Y_LOC, VALUE_BITS,
};

/// The five message attributes as range-checked wires.
pub struct MessageWires<D: Driver> {
    pub message_number: D::W,
    pub agent_id: D::W,
    pub agent_x_loc: D::W,
    pub agent_y_loc: D::W,
    pub check_sum: D::W,
}

impl<D: Driver> MessageWires<D> {
    /// Allocate every attribute and constrain it to [`VALUE_BITS`] bits.
    pub fn alloc(dr: &mut D, message: &Message) -> Result<Self, Error> {
        Ok(MessageWires {
            message_number: alloc_u64(dr, message.message_number)?,
            agent_id: alloc_u64(dr, message.agent_id)?,
            agent_x_loc: alloc_u64(dr, message.agent_x_loc)?,
            agent_y_loc: alloc_u64(dr, message.agent_y_loc)?,
            check_sum: alloc_u64(dr, message.check_sum)?,
        })
    }
}

/// Boolean wires for every sub-predicate and the composite.
pub struct ValidityWires<D: Driver> {
    pub agent_id_zero: BoolWire<D>,
    pub duplicate: BoolWire<D>,
    pub details_valid: BoolWire<D>,
    pub valid: BoolWire<D>,
}

/// Allocate a `u64` witness constrained to [`VALUE_BITS`] bits.
pub fn alloc_u64<D: Driver>(dr: &mut D, v: u64) -> Result<D::W, Error> {
    let w = dr.alloc(|| Ok(field_from_u64(v)))?;
    range_check(dr, &w, VALUE_BITS)?;
    Ok(w)
}

fn constant_u64<D: Driver>(dr: &mut D, v: u64) -> Result<D::W, Error> {
    dr.constant(field_from_u64(v))
}

pub fn is_agent_id_zero<D: Driver>(dr: &mut D, m: &MessageWires<D>) -> Result<BoolWire<D>, Error> {
    is_zero(dr, &m.agent_id)
}

pub fn is_agent_id_in_range<D: Driver>(
    dr: &mut D,
    m: &MessageWires<D>,
) -> Result<BoolWire<D>, Error> {
    let max = constant_u64(dr, MAX_AGENT_ID)?;
    is_less_or_equal(dr, &m.agent_id, &max, VALUE_BITS)
}

/// `check_sum == agent_id + agent_x_loc + agent_y_loc`. The sum of three
/// 64-bit values cannot wrap in the field.
pub fn is_check_sum_correct<D: Driver>(
    dr: &mut D,
    m: &MessageWires<D>,
) -> Result<BoolWire<D>, Error> {
    let sum = dr.add(&[
        (m.agent_id.clone(), D::F::ONE),
        (m.agent_x_loc.clone(), D::F::ONE),
        (m.agent_y_loc.clone(), D::F::ONE),
    ])?;
    is_equal(dr, &m.check_sum, &sum)
}

pub fn is_agent_x_loc_in_range<D: Driver>(
    dr: &mut D,
    m: &MessageWires<D>,
) -> Result<BoolWire<D>, Error> {
    let max = constant_u64(dr, MAX_AGENT_X_LOC)?;
    is_less_or_equal(dr, &m.agent_x_loc, &max, VALUE_BITS)
}

pub fn is_agent_y_loc_in_range<D: Driver>(
    dr: &mut D,
    m: &MessageWires<D>,
) -> Result<BoolWire<D>, Error> {
    let min = constant_u64(dr, MIN_AGENT_Y_LOC)?;
    let max = constant_u64(dr, MAX_AGENT_Y_LOC)?;
    let above_min = is_less_or_equal(dr, &min, &m.agent_y_loc, VALUE_BITS)?;
    let below_max = is_less_or_equal(dr, &m.agent_y_loc, &max, VALUE_BITS)?;
    and(dr, &above_min, &below_max)
}

pub fn is_agent_y_loc_greater_than_agent_x_loc<D: Driver>(
    dr: &mut D,
    m: &MessageWires<D>,
) -> Result<BoolWire<D>, Error> {
    is_less_than(dr, &m.agent_x_loc, &m.agent_y_loc, VALUE_BITS)
}

/// `message_number <= prev_highest`. `prev_highest` must be range-checked.
pub fn is_duplicate<D: Driver>(
    dr: &mut D,
    m: &MessageWires<D>,
    prev_highest: &D::W,
) -> Result<BoolWire<D>, Error> {
    is_less_or_equal(dr, &m.message_number, prev_highest, VALUE_BITS)
}

/// `agent_id_zero OR duplicate OR (all five content checks)`.
pub fn is_valid<D: Driver>(
    dr: &mut D,
    m: &MessageWires<D>,
    prev_highest: &D::W,
) -> Result<ValidityWires<D>, Error> {
    let agent_id_zero = is_agent_id_zero(dr, m)?;
    let duplicate = is_duplicate(dr, m, prev_highest)?;

    let checks = [
        is_agent_id_in_range(dr, m)?,
        is_check_sum_correct(dr, m)?,
        is_agent_x_loc_in_range(dr, m)?,
        is_agent_y_loc_in_range(dr, m)?,
        is_agent_y_loc_greater_than_agent_x_loc(dr, m)?,
    ];
    let details_valid = and_all(dr, &checks)?;

    let zero_or_duplicate = or(dr, &agent_id_zero, &duplicate)?;
    let valid = or(dr, &zero_or_duplicate, &details_valid)?;

    Ok(ValidityWires {
        agent_id_zero,
        duplicate,
        details_valid,
        valid,
    })
}
