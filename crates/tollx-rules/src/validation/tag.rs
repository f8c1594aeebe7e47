use std::collections::HashSet;

use tollx_types::Tag;

use super::checks::{identifier, in_range, require, require_some, upper_letters};
use super::Validate;
use crate::error::{RuleError, RuleResult};

/// Longest tag serial number carried on the wire.
pub const MAX_TAG_SERIAL_LEN: usize = 20;

impl Validate for Tag {
    fn required(&self) -> RuleResult<()> {
        require("tagSerialNumber", &self.tag_serial_number)?;
        require("tagAgencyID", &self.tag_agency_id)?;
        require("homeAgencyID", &self.home_agency_id)?;
        require_some("tagStatus", &self.tag_status)?;
        if let Some(plate) = &self.plate_info {
            require("plateInfo.country", &plate.country)?;
            require("plateInfo.state", &plate.state)?;
            require("plateInfo.number", &plate.number)?;
        }
        for (i, plan) in self.discount_plans.iter().enumerate() {
            require(&format!("discountPlans[{i}].planID"), &plan.plan_id)?;
            require_some(&format!("discountPlans[{i}].startDate"), &plan.start_date)?;
        }
        Ok(())
    }

    fn ranges(&self) -> RuleResult<()> {
        let serial = &self.tag_serial_number;
        if serial.len() > MAX_TAG_SERIAL_LEN || !serial.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(RuleError::validation(
                "tagSerialNumber",
                format!("must be at most {MAX_TAG_SERIAL_LEN} letters or digits"),
            ));
        }
        identifier("tagAgencyID", &self.tag_agency_id)?;
        identifier("homeAgencyID", &self.home_agency_id)?;
        in_range("tagClass", self.tag_class, 1..=15)?;
        if let Some(plate) = &self.plate_info {
            upper_letters("plateInfo.country", &plate.country, 2)?;
            upper_letters("plateInfo.state", &plate.state, 2)?;
        }
        Ok(())
    }

    fn cross_field(&self) -> RuleResult<()> {
        let mut seen = HashSet::new();
        for (i, plan) in self.discount_plans.iter().enumerate() {
            if let (Some(start), Some(end)) = (plan.start_date, plan.end_date) {
                if end < start {
                    return Err(RuleError::validation(
                        format!("discountPlans[{i}].endDate"),
                        "endDate must not be before startDate",
                    ));
                }
            }
            if !seen.insert(plan.plan_id.as_str()) {
                return Err(RuleError::validation(
                    format!("discountPlans[{i}].planID"),
                    format!("duplicate plan '{}'", plan.plan_id),
                ));
            }
        }
        Ok(())
    }
}
