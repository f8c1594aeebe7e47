use tollx_types::Agency;

use super::checks::{identifier, require, require_some, upper_letters};
use super::Validate;
use crate::error::RuleResult;

impl Validate for Agency {
    fn required(&self) -> RuleResult<()> {
        require("agencyID", &self.agency_id)?;
        require("name", &self.name)?;
        require("consortiumID", &self.consortium_id)?;
        require_some("role", &self.role)?;
        require_some("status", &self.status)
    }

    fn ranges(&self) -> RuleResult<()> {
        identifier("agencyID", &self.agency_id)?;
        identifier("consortiumID", &self.consortium_id)?;
        if !self.state.is_empty() {
            upper_letters("state", &self.state, 2)?;
        }
        Ok(())
    }
}
