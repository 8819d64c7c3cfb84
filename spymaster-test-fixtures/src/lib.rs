//! Shared message batches for spymaster tests.
//!
//! Every [`Scenario`] lists its messages together with whether each one is
//! expected to pass the validity predicate, and the running highest message
//! number expected after folding the whole batch.

use once_cell::sync::Lazy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use spymaster_circuit::Message;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub messages: Vec<(bool, Message)>,
    pub expected_highest: u64,
}

impl Scenario {
    fn new(name: &str, messages: Vec<(bool, Message)>, expected_highest: u64) -> Self {
        Scenario {
            name: name.to_string(),
            messages,
            expected_highest,
        }
    }

    pub fn batch(&self) -> Vec<Message> {
        self.messages.iter().map(|(_, m)| *m).collect()
    }
}

/// A message with a correct checksum.
pub fn signed(message_number: u64, agent_id: u64, x: u64, y: u64) -> Message {
    Message::new(message_number, agent_id, x, y, agent_id + x + y)
}

pub fn three_valid_messages() -> Scenario {
    Scenario::new(
        "three valid messages",
        vec![
            (true, signed(1, 100, 1000, 10_000)),
            (true, signed(2, 101, 2000, 11_000)),
            (true, signed(3, 102, 3000, 12_000)),
        ],
        3,
    )
}

pub fn invalid_check_sum() -> Scenario {
    Scenario::new(
        "invalid checksum",
        vec![(false, Message::new(1, 100, 1000, 10_000, 100 + 1000 + 10_001))],
        0,
    )
}

pub fn agent_id_out_of_range() -> Scenario {
    Scenario::new(
        "agent id out of range",
        vec![(false, signed(1, 3001, 1000, 10_000))],
        0,
    )
}

pub fn agent_x_loc_out_of_range() -> Scenario {
    Scenario::new(
        "agent x location out of range",
        vec![(false, signed(1, 100, 15_001, 10_000))],
        0,
    )
}

pub fn agent_y_loc_out_of_range() -> Scenario {
    Scenario::new(
        "agent y location out of range",
        vec![(false, signed(1, 100, 1000, 20_001))],
        0,
    )
}

pub fn agent_y_loc_below_x_loc() -> Scenario {
    Scenario::new(
        "agent y location below x location",
        vec![(false, signed(1, 100, 10_000, 1000))],
        0,
    )
}

pub fn agent_id_zero() -> Scenario {
    Scenario::new(
        "agent id zero",
        vec![(true, Message::new(1, 0, 1000, 10_000, 0))],
        1,
    )
}

pub fn duplicate_message_number() -> Scenario {
    Scenario::new(
        "duplicate message number",
        vec![
            (true, signed(1, 100, 1000, 10_000)),
            (true, signed(1, 101, 2000, 11_000)),
        ],
        1,
    )
}

pub fn empty_batch() -> Scenario {
    Scenario::new("empty batch", Vec::new(), 0)
}

pub fn all_invalid() -> Scenario {
    Scenario::new(
        "all invalid",
        vec![
            (false, signed(1, 3001, 1000, 10_000)),
            (false, signed(2, 100, 15_001, 10_000)),
            (false, Message::new(3, 100, 10_000, 5000, 100 + 10_000 + 1000)),
            (false, signed(4, 100, 1000, 20_001)),
        ],
        0,
    )
}

pub fn mixed_valid_and_invalid() -> Scenario {
    Scenario::new(
        "mixed valid and invalid",
        vec![
            (true, signed(1, 100, 1000, 10_000)),
            (false, signed(2, 3001, 1000, 10_000)),
            (true, signed(3, 101, 2000, 11_000)),
            (false, signed(4, 100, 10_000, 1000)),
        ],
        3,
    )
}

/// `count` valid messages numbered from 1.
pub fn large_valid_batch(count: u64) -> Scenario {
    let messages = (1..=count)
        .map(|n| {
            let agent_id = 1 + n % 3000;
            let x = n % 15_000;
            (true, signed(n, agent_id, x, 15_001 + n % 4000))
        })
        .collect();
    Scenario::new("large valid batch", messages, count)
}

/// Random messages, roughly half of them valid. Validity flags are computed
/// against the running highest, so the scenario is self-consistent.
pub fn random_batch(seed: u64, count: usize) -> Scenario {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut highest = 0u64;
    let mut messages = Vec::with_capacity(count);
    for _ in 0..count {
        let message_number = rng.gen_range(0..(count as u64 + 5));
        let agent_id = rng.gen_range(0..3500);
        let x = rng.gen_range(0..17_000);
        let y = rng.gen_range(3000..22_000);
        let message = if rng.gen_bool(0.8) {
            signed(message_number, agent_id, x, y)
        } else {
            Message::new(message_number, agent_id, x, y, rng.gen())
        };
        let valid = spymaster_circuit::is_valid(&message, highest);
        highest = spymaster_circuit::next_highest(&message, highest);
        messages.push((valid, message));
    }
    Scenario::new("random batch", messages, highest)
}

/// Every fixed scenario.
pub static SCENARIOS: Lazy<Vec<Scenario>> = Lazy::new(|| {
    vec![
        three_valid_messages(),
        invalid_check_sum(),
        agent_id_out_of_range(),
        agent_x_loc_out_of_range(),
        agent_y_loc_out_of_range(),
        agent_y_loc_below_x_loc(),
        agent_id_zero(),
        duplicate_message_number(),
        empty_batch(),
        all_invalid(),
        mixed_valid_and_invalid(),
    ]
});
