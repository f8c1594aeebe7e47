//! Ledger access for the toll interoperability exchange.
//!
//! The operation layer never talks to a concrete ledger. It reads and writes
//! through the [`Ledger`] trait, which models the narrow surface the
//! transactional runtime exposes:
//!
//! - a shared store every participant can see
//! - named partitions private to the parties of a bilateral relationship
//! - an equality [`Selector`] query over either
//! - one timestamp per transaction
//!
//! # Modules
//!
//! - [`error`] -- [`LedgerError`] and [`LedgerResult`]
//! - [`selector`] -- [`Scope`] and [`Selector`]
//! - [`traits`] -- the [`Ledger`] port
//! - [`memory`] -- [`InMemoryLedger`], with JSON snapshot persistence

pub mod error;
pub mod memory;
pub mod selector;
pub mod traits;

pub use error::{LedgerError, LedgerResult};
pub use memory::InMemoryLedger;
pub use selector::{Scope, Selector};
pub use traits::{Ledger, QueryHit};
