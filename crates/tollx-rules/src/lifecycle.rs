//! Allowed status transitions per entity.
//!
//! Tables are `static` data: built at compile time, never mutated. A status
//! absent from a table's keys is unknown to that table and every transition
//! out of it fails. Terminal statuses are listed with an empty target set so
//! that moving out of them reports "cannot transition" instead.
//! Remaining in the same status is only allowed where a table lists it.

use std::fmt::Display;
use std::str::FromStr;

use tollx_types::{
    Agency, AgencyStatus, Charge, ChargeStatus, Record, Settlement, SettlementStatus, Tag,
    TagStatus, TypeError,
};

use crate::error::TransitionError;

/// Immutable mapping from a current status to the statuses it may move to.
#[derive(Debug)]
pub struct TransitionTable<S: 'static> {
    entity: &'static str,
    initial: &'static [S],
    edges: &'static [(S, &'static [S])],
}

impl<S> TransitionTable<S>
where
    S: Copy + PartialEq + Display + 'static,
{
    pub const fn new(
        entity: &'static str,
        initial: &'static [S],
        edges: &'static [(S, &'static [S])],
    ) -> Self {
        Self {
            entity,
            initial,
            edges,
        }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Statuses a record may be created in.
    pub fn initial(&self) -> &'static [S] {
        self.initial
    }

    pub fn is_initial(&self, status: S) -> bool {
        self.initial.contains(&status)
    }

    /// Targets reachable from `from`, or `None` if `from` is not a key.
    pub fn allowed(&self, from: S) -> Option<&'static [S]> {
        self.edges
            .iter()
            .find(|(state, _)| *state == from)
            .map(|(_, targets)| *targets)
    }

    pub fn is_allowed(&self, from: S, to: S) -> bool {
        self.allowed(from)
            .map(|targets| targets.contains(&to))
            .unwrap_or(false)
    }

    /// Check a requested move, naming both statuses on failure.
    pub fn check(&self, from: S, to: S) -> Result<(), TransitionError> {
        let targets = self
            .allowed(from)
            .ok_or_else(|| TransitionError::UnknownStatus {
                entity: self.entity.to_string(),
                status: from.to_string(),
            })?;
        if targets.contains(&to) {
            Ok(())
        } else {
            Err(TransitionError::NotAllowed {
                entity: self.entity.to_string(),
                from: from.to_string(),
                to: to.to_string(),
            })
        }
    }
}

pub static AGENCY_TRANSITIONS: TransitionTable<AgencyStatus> = {
    use AgencyStatus::*;
    TransitionTable::new(
        "agency",
        &[Active, Suspended, Inactive],
        &[
            (Active, &[Suspended, Inactive]),
            (Suspended, &[Active, Inactive]),
            (Inactive, &[Active]),
        ],
    )
};

pub static TAG_TRANSITIONS: TransitionTable<TagStatus> = {
    use TagStatus::*;
    TransitionTable::new(
        "tag",
        &[Valid, Invalid, Inactive, Lost, Stolen],
        &[
            (Valid, &[Invalid, Inactive, Lost, Stolen]),
            (Invalid, &[Valid]),
            (Inactive, &[Valid, Invalid]),
            (Lost, &[Valid, Invalid]),
            (Stolen, &[Valid, Invalid]),
        ],
    )
};

pub static CHARGE_TRANSITIONS: TransitionTable<ChargeStatus> = {
    use ChargeStatus::*;
    TransitionTable::new(
        "charge",
        &[Pending],
        &[
            (Pending, &[Posted, Rejected]),
            (Posted, &[Settled, Disputed]),
            (Disputed, &[Posted]),
            (Rejected, &[]),
            (Settled, &[]),
        ],
    )
};

pub static SETTLEMENT_TRANSITIONS: TransitionTable<SettlementStatus> = {
    use SettlementStatus::*;
    TransitionTable::new(
        "settlement",
        &[Draft],
        &[
            (Draft, &[Submitted]),
            (Submitted, &[Accepted, Disputed]),
            (Disputed, &[Accepted, Cancelled]),
            (Accepted, &[Paid]),
            (Cancelled, &[]),
            (Paid, &[]),
        ],
    )
};

/// An entity with a status field governed by a transition table.
pub trait Lifecycle: Record {
    type Status: Copy + PartialEq + Display + FromStr<Err = TypeError> + 'static;

    /// Wire name of the status attribute.
    const STATUS_FIELD: &'static str;

    fn transitions() -> &'static TransitionTable<Self::Status>;

    /// Current status, `None` when the record carries none.
    fn status(&self) -> Option<Self::Status>;

    fn set_status(&mut self, status: Self::Status);
}

impl Lifecycle for Agency {
    type Status = AgencyStatus;
    const STATUS_FIELD: &'static str = "status";

    fn transitions() -> &'static TransitionTable<AgencyStatus> {
        &AGENCY_TRANSITIONS
    }

    fn status(&self) -> Option<AgencyStatus> {
        self.status
    }

    fn set_status(&mut self, status: AgencyStatus) {
        self.status = Some(status);
    }
}

impl Lifecycle for Tag {
    type Status = TagStatus;
    const STATUS_FIELD: &'static str = "tagStatus";

    fn transitions() -> &'static TransitionTable<TagStatus> {
        &TAG_TRANSITIONS
    }

    fn status(&self) -> Option<TagStatus> {
        self.tag_status
    }

    fn set_status(&mut self, status: TagStatus) {
        self.tag_status = Some(status);
    }
}

impl Lifecycle for Charge {
    type Status = ChargeStatus;
    const STATUS_FIELD: &'static str = "status";

    fn transitions() -> &'static TransitionTable<ChargeStatus> {
        &CHARGE_TRANSITIONS
    }

    fn status(&self) -> Option<ChargeStatus> {
        self.status
    }

    fn set_status(&mut self, status: ChargeStatus) {
        self.status = Some(status);
    }
}

impl Lifecycle for Settlement {
    type Status = SettlementStatus;
    const STATUS_FIELD: &'static str = "status";

    fn transitions() -> &'static TransitionTable<SettlementStatus> {
        &SETTLEMENT_TRANSITIONS
    }

    fn status(&self) -> Option<SettlementStatus> {
        self.status
    }

    fn set_status(&mut self, status: SettlementStatus) {
        self.status = Some(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn charge_happy_path() {
        use ChargeStatus::*;
        assert!(CHARGE_TRANSITIONS.check(Pending, Posted).is_ok());
        assert!(CHARGE_TRANSITIONS.check(Posted, Settled).is_ok());
        assert!(CHARGE_TRANSITIONS.check(Posted, Disputed).is_ok());
        assert!(CHARGE_TRANSITIONS.check(Disputed, Posted).is_ok());
    }

    #[test]
    fn charge_cannot_skip_posting() {
        let err = CHARGE_TRANSITIONS
            .check(ChargeStatus::Pending, ChargeStatus::Settled)
            .unwrap_err();
        assert_eq!(err.to_string(), "cannot transition charge from pending to settled");
    }

    #[test]
    fn same_status_is_rejected_unless_listed() {
        for status in ChargeStatus::ALL {
            assert!(CHARGE_TRANSITIONS.check(*status, *status).is_err());
        }
        for status in SettlementStatus::ALL {
            assert!(SETTLEMENT_TRANSITIONS.check(*status, *status).is_err());
        }
        for status in TagStatus::ALL {
            assert!(TAG_TRANSITIONS.check(*status, *status).is_err());
        }
    }

    #[test]
    fn terminal_statuses_have_no_exits() {
        assert_eq!(CHARGE_TRANSITIONS.allowed(ChargeStatus::Settled), Some(&[][..]));
        let err = CHARGE_TRANSITIONS
            .check(ChargeStatus::Settled, ChargeStatus::Settled)
            .unwrap_err();
        assert!(matches!(err, TransitionError::NotAllowed { .. }));
        assert!(SETTLEMENT_TRANSITIONS
            .check(SettlementStatus::Paid, SettlementStatus::Accepted)
            .is_err());
    }

    #[test]
    fn settlement_table() {
        use SettlementStatus::*;
        assert!(SETTLEMENT_TRANSITIONS.is_allowed(Draft, Submitted));
        assert!(SETTLEMENT_TRANSITIONS.is_allowed(Submitted, Disputed));
        assert!(SETTLEMENT_TRANSITIONS.is_allowed(Disputed, Cancelled));
        assert!(SETTLEMENT_TRANSITIONS.is_allowed(Accepted, Paid));
        assert!(!SETTLEMENT_TRANSITIONS.is_allowed(Draft, Paid));
        assert!(!SETTLEMENT_TRANSITIONS.is_allowed(Submitted, Paid));
    }

    #[test]
    fn tag_table() {
        use TagStatus::*;
        assert!(TAG_TRANSITIONS.is_allowed(Valid, Stolen));
        assert!(TAG_TRANSITIONS.is_allowed(Stolen, Valid));
        assert!(!TAG_TRANSITIONS.is_allowed(Invalid, Lost));
        assert!(!TAG_TRANSITIONS.is_allowed(Lost, Stolen));
    }

    #[test]
    fn initial_statuses() {
        assert!(CHARGE_TRANSITIONS.is_initial(ChargeStatus::Pending));
        assert!(!CHARGE_TRANSITIONS.is_initial(ChargeStatus::Posted));
        assert_eq!(SETTLEMENT_TRANSITIONS.initial(), &[SettlementStatus::Draft]);
        assert!(TagStatus::ALL.iter().all(|s| TAG_TRANSITIONS.is_initial(*s)));
    }

    static PARTIAL: TransitionTable<ChargeStatus> = TransitionTable::new(
        "charge",
        &[ChargeStatus::Pending],
        &[(ChargeStatus::Pending, &[ChargeStatus::Posted])],
    );

    #[test]
    fn status_missing_from_table_is_unknown() {
        let err = PARTIAL
            .check(ChargeStatus::Posted, ChargeStatus::Settled)
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::UnknownStatus {
                entity: "charge".into(),
                status: "posted".into(),
            }
        );
    }

    fn charge_status() -> impl Strategy<Value = ChargeStatus> {
        proptest::sample::select(ChargeStatus::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn check_agrees_with_table(from in charge_status(), to in charge_status()) {
            let listed = CHARGE_TRANSITIONS
                .allowed(from)
                .map(|targets| targets.contains(&to))
                .unwrap_or(false);
            prop_assert_eq!(CHARGE_TRANSITIONS.check(from, to).is_ok(), listed);
        }

        #[test]
        fn unknown_current_always_fails(from in charge_status(), to in charge_status()) {
            prop_assume!(from != ChargeStatus::Pending);
            prop_assert!(PARTIAL.check(from, to).is_err());
        }
    }
}
