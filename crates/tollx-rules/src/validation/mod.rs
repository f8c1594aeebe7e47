//! Ordered field-level validation.
//!
//! Every entity is checked in five stages: required fields, closed-set
//! codes, numeric ranges and formats, cross-field business rules, and
//! conditional requirements. The first violation wins, so an entity missing
//! a required field never reports a range error.

pub mod checks;

mod acknowledgement;
mod agency;
mod charge;
mod correction;
mod reconciliation;
mod settlement;
mod tag;

use std::fmt;

use tollx_types::Entity;

use crate::error::RuleResult;

/// One step of the validation pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Required,
    Enumerations,
    Ranges,
    CrossField,
    Conditional,
}

impl Stage {
    /// Stages in the order they run.
    pub const ORDER: [Stage; 5] = [
        Stage::Required,
        Stage::Enumerations,
        Stage::Ranges,
        Stage::CrossField,
        Stage::Conditional,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Required => "required",
            Stage::Enumerations => "enumerations",
            Stage::Ranges => "ranges",
            Stage::CrossField => "cross-field",
            Stage::Conditional => "conditional",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field-level rules for one entity type.
///
/// Implementors fill in the stages they need; the rest pass.
pub trait Validate {
    fn required(&self) -> RuleResult<()>;

    fn enumerations(&self) -> RuleResult<()> {
        Ok(())
    }

    fn ranges(&self) -> RuleResult<()> {
        Ok(())
    }

    fn cross_field(&self) -> RuleResult<()> {
        Ok(())
    }

    fn conditional(&self) -> RuleResult<()> {
        Ok(())
    }

    /// Run a single stage.
    fn check(&self, stage: Stage) -> RuleResult<()> {
        match stage {
            Stage::Required => self.required(),
            Stage::Enumerations => self.enumerations(),
            Stage::Ranges => self.ranges(),
            Stage::CrossField => self.cross_field(),
            Stage::Conditional => self.conditional(),
        }
    }

    /// Run every stage in order, stopping at the first violation.
    fn validate(&self) -> RuleResult<()> {
        for stage in Stage::ORDER {
            self.check(stage)?;
        }
        Ok(())
    }
}

impl Validate for Entity {
    fn required(&self) -> RuleResult<()> {
        self.check(Stage::Required)
    }

    fn check(&self, stage: Stage) -> RuleResult<()> {
        match self {
            Entity::Agency(e) => e.check(stage),
            Entity::Tag(e) => e.check(stage),
            Entity::Charge(e) => e.check(stage),
            Entity::Correction(e) => e.check(stage),
            Entity::Reconciliation(e) => e.check(stage),
            Entity::Acknowledgement(e) => e.check(stage),
            Entity::Settlement(e) => e.check(stage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollx_types::{samples, Record};

    #[test]
    fn samples_are_valid() {
        let entities = [
            samples::agency("A1").into_entity(),
            samples::tag("A1", "0012345678").into_entity(),
            samples::charge("CHG-1", "A2", "A1").into_entity(),
            samples::correction("CHG-1", 1, "A2", "A1").into_entity(),
            samples::reconciliation("CHG-1", "A2", "A1").into_entity(),
            samples::acknowledgement("ACK-1", "A1", "A2").into_entity(),
            samples::settlement("S-1", "A1", "A2").into_entity(),
        ];
        for entity in &entities {
            assert_eq!(entity.validate(), Ok(()), "{:?}", entity.doc_type());
        }
    }

    #[test]
    fn entity_dispatches_to_variant_rules() {
        let mut charge = samples::charge("CHG-1", "A2", "A1");
        charge.facility_id.clear();
        let err = charge.into_entity().validate().unwrap_err();
        assert_eq!(err.field(), "facilityID");
    }

    #[test]
    fn earlier_stage_wins() {
        // Missing chargeID and a bad disposition: the required stage reports.
        let mut recon = samples::reconciliation("CHG-1", "A2", "A1");
        recon.charge_id.clear();
        recon.posting_disposition = "X".into();
        let err = recon.validate().unwrap_err();
        assert_eq!(err.field(), "chargeID");
        assert!(recon.check(Stage::Enumerations).is_err());
    }
}
