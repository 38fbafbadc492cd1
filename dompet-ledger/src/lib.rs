//! dompet-ledger: transaction storage backends for dompet-core

pub mod json_store;
pub mod memory;
pub mod state;

pub use json_store::JsonLedger;
pub use memory::MemoryLedger;
pub use state::{LedgerState, StoredTransaction};
