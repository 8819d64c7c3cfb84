//! The agent message and its validity rules, evaluated natively.
//!
//! The in-circuit counterparts live in [`crate::predicates`]; both must agree
//! on every input.

use serde::{Deserialize, Serialize};

/// Highest agent id that passes the range check.
pub const MAX_AGENT_ID: u64 = 3000;
/// Highest X coordinate that passes the range check.
pub const MAX_AGENT_X_LOC: u64 = 15_000;
/// Lowest Y coordinate that passes the range check.
pub const MIN_AGENT_Y_LOC: u64 = 5_000;
/// Highest Y coordinate that passes the range check.
pub const MAX_AGENT_Y_LOC: u64 = 20_000;
/// Bit width of every message attribute.
pub const VALUE_BITS: usize = 64;

/// A single agent report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    pub message_number: u64,
    pub agent_id: u64,
    pub agent_x_loc: u64,
    pub agent_y_loc: u64,
    pub check_sum: u64,
}

impl Message {
    pub fn new(
        message_number: u64,
        agent_id: u64,
        agent_x_loc: u64,
        agent_y_loc: u64,
        check_sum: u64,
    ) -> Self {
        Message {
            message_number,
            agent_id,
            agent_x_loc,
            agent_y_loc,
            check_sum,
        }
    }

    /// Build a message whose checksum is correct, if the sum fits in a `u64`.
    pub fn with_check_sum(
        message_number: u64,
        agent_id: u64,
        agent_x_loc: u64,
        agent_y_loc: u64,
    ) -> Option<Self> {
        let check_sum = agent_id.checked_add(agent_x_loc)?.checked_add(agent_y_loc)?;
        Some(Self::new(
            message_number,
            agent_id,
            agent_x_loc,
            agent_y_loc,
            check_sum,
        ))
    }

    /// The all-zero message used to seed a chain.
    pub fn dummy() -> Self {
        Self::default()
    }

    pub fn is_agent_id_zero(&self) -> bool {
        self.agent_id == 0
    }

    pub fn is_agent_id_in_range(&self) -> bool {
        self.agent_id <= MAX_AGENT_ID
    }

    pub fn is_check_sum_correct(&self) -> bool {
        let sum = self.agent_id as u128 + self.agent_x_loc as u128 + self.agent_y_loc as u128;
        sum == self.check_sum as u128
    }

    pub fn is_agent_x_loc_in_range(&self) -> bool {
        self.agent_x_loc <= MAX_AGENT_X_LOC
    }

    pub fn is_agent_y_loc_in_range(&self) -> bool {
        (MIN_AGENT_Y_LOC..=MAX_AGENT_Y_LOC).contains(&self.agent_y_loc)
    }

    pub fn is_agent_y_loc_greater_than_agent_x_loc(&self) -> bool {
        self.agent_y_loc > self.agent_x_loc
    }

    /// True when this message number does not exceed the running highest.
    pub fn is_duplicate(&self, prev_highest: u64) -> bool {
        self.message_number <= prev_highest
    }

    /// Evaluate every sub-predicate against `prev_highest`.
    pub fn validity(&self, prev_highest: u64) -> Validity {
        Validity {
            agent_id_zero: self.is_agent_id_zero(),
            duplicate: self.is_duplicate(prev_highest),
            agent_id_in_range: self.is_agent_id_in_range(),
            check_sum_correct: self.is_check_sum_correct(),
            agent_x_loc_in_range: self.is_agent_x_loc_in_range(),
            agent_y_loc_in_range: self.is_agent_y_loc_in_range(),
            agent_y_loc_greater_than_agent_x_loc: self.is_agent_y_loc_greater_than_agent_x_loc(),
        }
    }

    /// Canonical little-endian encoding of the five attributes.
    pub fn to_bytes(&self) -> [u8; 40] {
        let mut out = [0u8; 40];
        for (chunk, v) in out.chunks_exact_mut(8).zip([
            self.message_number,
            self.agent_id,
            self.agent_x_loc,
            self.agent_y_loc,
            self.check_sum,
        ]) {
            chunk.copy_from_slice(&v.to_le_bytes());
        }
        out
    }
}

/// Outcome of each sub-predicate for one message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validity {
    pub agent_id_zero: bool,
    pub duplicate: bool,
    pub agent_id_in_range: bool,
    pub check_sum_correct: bool,
    pub agent_x_loc_in_range: bool,
    pub agent_y_loc_in_range: bool,
    pub agent_y_loc_greater_than_agent_x_loc: bool,
}

impl Validity {
    /// All five content checks hold.
    pub fn details_valid(&self) -> bool {
        self.agent_id_in_range
            && self.check_sum_correct
            && self.agent_x_loc_in_range
            && self.agent_y_loc_in_range
            && self.agent_y_loc_greater_than_agent_x_loc
    }

    /// Zero agent, duplicate, or fully valid details.
    pub fn is_valid(&self) -> bool {
        self.agent_id_zero || self.duplicate || self.details_valid()
    }

    /// Whether accepting this message moves the running highest.
    pub fn raises(&self) -> bool {
        self.is_valid() && !self.duplicate
    }
}

/// The composite predicate.
pub fn is_valid(message: &Message, prev_highest: u64) -> bool {
    message.validity(prev_highest).is_valid()
}

/// Native step transition: the message number if it is accepted and greater
/// than `prev_highest`, else `prev_highest`.
pub fn next_highest(message: &Message, prev_highest: u64) -> u64 {
    if message.validity(prev_highest).raises() {
        message.message_number
    } else {
        prev_highest
    }
}
