//! Business rules for the toll interoperability exchange.
//!
//! Two pure rule sets sit between a decoded payload and the ledger:
//!
//! - [`validation`] -- the ordered field-level checks run before any write
//! - [`lifecycle`] -- the static status transition tables and their checker
//!
//! Neither touches storage; the operation layer composes them.

pub mod error;
pub mod lifecycle;
pub mod validation;

pub use error::{RuleError, RuleResult, TransitionError};
pub use lifecycle::{
    Lifecycle, TransitionTable, AGENCY_TRANSITIONS, CHARGE_TRANSITIONS, SETTLEMENT_TRANSITIONS,
    TAG_TRANSITIONS,
};
pub use validation::{Stage, Validate};
