//! Gadgets built on the [`Driver`](crate::Driver) abstraction.
//!
//! Every gadget synthesizes the same constraints regardless of the witness, so
//! the predicates composed from them never branch on private data.

pub mod boolean;
pub mod compare;
pub mod range;
pub mod select;

pub use boolean::{and, and_all, not, or, BoolWire};
pub use compare::{is_equal, is_less_or_equal, is_less_than, is_zero};
pub use range::{range_check, to_bits};
pub use select::select;
