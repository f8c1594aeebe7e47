use tollx_types::Settlement;

use super::checks::{cents, distinct_parties, identifier, money, require, require_some, upper_letters};
use super::Validate;
use crate::error::{RuleError, RuleResult};

impl Validate for Settlement {
    fn required(&self) -> RuleResult<()> {
        require("settlementID", &self.settlement_id)?;
        require("payorAgencyID", &self.payor_agency_id)?;
        require("payeeAgencyID", &self.payee_agency_id)?;
        require_some("periodStart", &self.period_start)?;
        require_some("periodEnd", &self.period_end)?;
        require("currency", &self.currency)?;
        require_some("status", &self.status)
    }

    fn ranges(&self) -> RuleResult<()> {
        identifier("settlementID", &self.settlement_id)?;
        identifier("payorAgencyID", &self.payor_agency_id)?;
        identifier("payeeAgencyID", &self.payee_agency_id)?;
        upper_letters("currency", &self.currency, 3)?;
        money("grossAmount", self.gross_amount)?;
        money("feeAmount", self.fee_amount)?;
        cents("correctionAmount", self.correction_amount)?;
        cents("netAmount", self.net_amount)
    }

    fn cross_field(&self) -> RuleResult<()> {
        distinct_parties(
            "payorAgencyID",
            &self.payor_agency_id,
            "payeeAgencyID",
            &self.payee_agency_id,
        )?;
        if let (Some(start), Some(end)) = (self.period_start, self.period_end) {
            if end <= start {
                return Err(RuleError::validation(
                    "periodEnd",
                    "periodEnd must be after periodStart",
                ));
            }
        }
        if self.fee_amount > self.gross_amount {
            return Err(RuleError::validation(
                "feeAmount",
                "feeAmount must not exceed grossAmount",
            ));
        }
        let expected = self.expected_net().ok_or_else(|| {
            RuleError::validation("netAmount", "grossAmount - feeAmount + correctionAmount overflows")
        })?;
        if self.net_amount != expected {
            return Err(RuleError::validation(
                "netAmount",
                format!(
                    "netAmount must equal grossAmount - feeAmount + correctionAmount ({expected})"
                ),
            ));
        }
        Ok(())
    }

    fn conditional(&self) -> RuleResult<()> {
        if self.charge_count == 0 && !self.gross_amount.is_zero() {
            return Err(RuleError::validation(
                "grossAmount",
                "must be zero when chargeCount is zero",
            ));
        }
        if self.correction_count == 0 && !self.correction_amount.is_zero() {
            return Err(RuleError::validation(
                "correctionAmount",
                "must be zero when correctionCount is zero",
            ));
        }
        Ok(())
    }
}
