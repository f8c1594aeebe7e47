//! Entity models for the toll interoperability exchange.
//!
//! This crate defines the records agencies exchange, the closed wire-code
//! sets they use, and the deterministic naming scheme that places each
//! record in the ledger. Nothing here performs I/O.
//!
//! # Entities
//!
//! - [`Agency`] -- network participant (shared store)
//! - [`Tag`] -- transponder credential (shared store)
//! - [`Charge`] -- toll transaction between an away and a home agency
//! - [`Correction`] -- numbered adjustment to a charge
//! - [`Reconciliation`] -- home agency posting result for a charge
//! - [`Acknowledgement`] -- batch submission receipt (shared store)
//! - [`Settlement`] -- periodic bilateral financial summary
//!
//! Charges, corrections and reconciliations live in the bilateral partition
//! of their agency pair; settlements in a separate bilateral partition. See
//! [`keys`] for the exact formats.

#[macro_use]
mod macros;

pub mod acknowledgement;
pub mod agency;
pub mod blank;
pub mod charge;
pub mod codes;
pub mod correction;
pub mod entity;
pub mod error;
pub mod keys;
pub mod reconciliation;
#[cfg(any(test, feature = "test-util"))]
pub mod samples;
pub mod settlement;
pub mod status;
pub mod tag;

pub use acknowledgement::Acknowledgement;
pub use agency::Agency;
pub use charge::Charge;
pub use codes::{
    CorrectionReason, DispositionCode, RecordKind, RecordType, ReturnCode, SubmissionType,
};
pub use correction::Correction;
pub use entity::{DocType, Entity, Record, DOC_TYPE_FIELD};
pub use error::{TypeError, TypeResult};
pub use reconciliation::Reconciliation;
pub use settlement::{Settlement, SettlementTotals};
pub use status::{AgencyRole, AgencyStatus, ChargeStatus, SettlementStatus, TagStatus};
pub use tag::{DiscountPlan, PlateDetail, Tag};

pub use chrono;
pub use rust_decimal::Decimal;
