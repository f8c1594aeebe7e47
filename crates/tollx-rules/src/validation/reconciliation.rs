use tollx_types::{DispositionCode, Reconciliation};

use super::checks::{code, distinct_parties, identifier, money, require, require_some};
use super::Validate;
use crate::error::RuleResult;

impl Validate for Reconciliation {
    fn required(&self) -> RuleResult<()> {
        require("chargeID", &self.charge_id)?;
        require("awayAgencyID", &self.away_agency_id)?;
        require("homeAgencyID", &self.home_agency_id)?;
        require("postingDisposition", &self.posting_disposition)
    }

    fn enumerations(&self) -> RuleResult<()> {
        code::<DispositionCode>("postingDisposition", &self.posting_disposition)?;
        Ok(())
    }

    fn ranges(&self) -> RuleResult<()> {
        identifier("chargeID", &self.charge_id)?;
        identifier("awayAgencyID", &self.away_agency_id)?;
        identifier("homeAgencyID", &self.home_agency_id)?;
        if let Some(amount) = self.posted_amount {
            money("postedAmount", amount)?;
        }
        Ok(())
    }

    fn cross_field(&self) -> RuleResult<()> {
        distinct_parties(
            "awayAgencyID",
            &self.away_agency_id,
            "homeAgencyID",
            &self.home_agency_id,
        )
    }

    fn conditional(&self) -> RuleResult<()> {
        let disposition = self.posting_disposition.parse::<DispositionCode>();
        if matches!(disposition, Ok(d) if d.is_posted()) {
            require_some("postedDateTime", &self.posted_date_time)?;
            require_some("postedAmount", &self.posted_amount)?;
        }
        Ok(())
    }
}
