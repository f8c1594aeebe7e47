//! Operation layer for the toll interoperability exchange.
//!
//! [`Contract`] wires invocations to the entity models, the validation
//! engine and the transition tables, and reads and writes through a
//! [`tollx_ledger::Ledger`]. Each operation is one synchronous
//! request/response: at most one existence read per referenced record,
//! then at most one write.
//!
//! Callers either use the typed methods (`create_charge`,
//! `update_settlement_status`, ...) or [`Contract::invoke`] with a function
//! name and positional string arguments, which returns JSON.

pub mod config;
pub mod contract;
pub mod dispatch;
pub mod error;
mod operations;

pub use config::{ContractConfig, ReconciliationPolicy};
pub use contract::{parse_payload, Contract};
pub use dispatch::Function;
pub use error::{ContractError, ContractResult};
