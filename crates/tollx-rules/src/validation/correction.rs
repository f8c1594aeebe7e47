use tollx_types::keys::MAX_CORRECTION_SEQ;
use tollx_types::{CorrectionReason, Correction, RecordType};

use super::checks::{code, distinct_parties, identifier, in_range, money, require, require_some};
use super::Validate;
use crate::error::{RuleError, RuleResult};

impl Validate for Correction {
    fn required(&self) -> RuleResult<()> {
        require("originalChargeID", &self.original_charge_id)?;
        require("awayAgencyID", &self.away_agency_id)?;
        require("homeAgencyID", &self.home_agency_id)?;
        require("recordType", &self.record_type)?;
        require("correctionReason", &self.correction_reason)?;
        require_some("amount", &self.amount)
    }

    fn enumerations(&self) -> RuleResult<()> {
        let record_type: RecordType = code("recordType", &self.record_type)?;
        if !record_type.adjustment {
            return Err(RuleError::validation(
                "recordType",
                format!("correction requires an adjustment code, got {record_type}"),
            ));
        }
        code::<CorrectionReason>("correctionReason", &self.correction_reason)?;
        Ok(())
    }

    fn ranges(&self) -> RuleResult<()> {
        identifier("originalChargeID", &self.original_charge_id)?;
        identifier("awayAgencyID", &self.away_agency_id)?;
        identifier("homeAgencyID", &self.home_agency_id)?;
        in_range("correctionSeqNo", self.correction_seq_no, 1..=MAX_CORRECTION_SEQ)?;
        in_range("vehicleClass", self.vehicle_class, 0..=99)?;
        if let Some(amount) = self.amount {
            money("amount", amount)?;
        }
        money("fee", self.fee)
    }

    fn cross_field(&self) -> RuleResult<()> {
        distinct_parties(
            "awayAgencyID",
            &self.away_agency_id,
            "homeAgencyID",
            &self.home_agency_id,
        )?;
        if self.amount.is_some_and(|amount| self.fee > amount) {
            return Err(RuleError::validation("fee", "fee must not exceed amount"));
        }
        Ok(())
    }

    fn conditional(&self) -> RuleResult<()> {
        let reason = self.correction_reason.parse::<CorrectionReason>();
        if matches!(reason, Ok(r) if r.requires_detail()) {
            require("reasonDetail", &self.reason_detail)?;
        }
        Ok(())
    }
}
