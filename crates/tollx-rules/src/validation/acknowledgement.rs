use tollx_types::{Acknowledgement, ReturnCode, SubmissionType};

use super::checks::{code, distinct_parties, identifier, require, require_some};
use super::Validate;
use crate::error::RuleResult;

impl Validate for Acknowledgement {
    fn required(&self) -> RuleResult<()> {
        require("acknowledgementID", &self.acknowledgement_id)?;
        require("submissionType", &self.submission_type)?;
        require("submissionID", &self.submission_id)?;
        require("fromAgencyID", &self.from_agency_id)?;
        require("toAgencyID", &self.to_agency_id)?;
        require("returnCode", &self.return_code)?;
        require_some("submissionDateTime", &self.submission_date_time)
    }

    fn enumerations(&self) -> RuleResult<()> {
        code::<SubmissionType>("submissionType", &self.submission_type)?;
        code::<ReturnCode>("returnCode", &self.return_code)?;
        Ok(())
    }

    fn ranges(&self) -> RuleResult<()> {
        identifier("acknowledgementID", &self.acknowledgement_id)?;
        identifier("fromAgencyID", &self.from_agency_id)?;
        identifier("toAgencyID", &self.to_agency_id)
    }

    fn cross_field(&self) -> RuleResult<()> {
        distinct_parties(
            "fromAgencyID",
            &self.from_agency_id,
            "toAgencyID",
            &self.to_agency_id,
        )
    }

    fn conditional(&self) -> RuleResult<()> {
        let return_code = self.return_code.parse::<ReturnCode>();
        if matches!(return_code, Ok(c) if !c.is_success()) {
            require("returnMessage", &self.return_message)?;
        }
        Ok(())
    }
}
