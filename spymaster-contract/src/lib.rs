//! Settlement contract for spymaster attestations.

pub mod contract;
pub mod error;
pub mod state;
pub mod store;

pub use contract::{SettlementContract, SettlementReceipt};
pub use error::ContractError;
pub use state::{fields, methods, AppStateEntry, SettlementState};
pub use store::{JsonFileStore, MemoryStore, StateStore};
