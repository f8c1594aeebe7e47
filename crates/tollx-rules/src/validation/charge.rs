use tollx_types::{Charge, RecordType};

use super::checks::{code, distinct_parties, identifier, in_range, money, require, require_some};
use super::Validate;
use crate::error::{RuleError, RuleResult};

impl Validate for Charge {
    fn required(&self) -> RuleResult<()> {
        require("chargeID", &self.charge_id)?;
        require("recordType", &self.record_type)?;
        require("awayAgencyID", &self.away_agency_id)?;
        require("homeAgencyID", &self.home_agency_id)?;
        require("facilityID", &self.facility_id)?;
        require("exitPlaza", &self.exit_plaza)?;
        require_some("exitDateTime", &self.exit_date_time)?;
        require_some("amount", &self.amount)?;
        require_some("status", &self.status)
    }

    fn enumerations(&self) -> RuleResult<()> {
        let record_type: RecordType = code("recordType", &self.record_type)?;
        if record_type.adjustment {
            return Err(RuleError::validation(
                "recordType",
                format!("adjustment code {record_type} is only valid on a correction"),
            ));
        }
        Ok(())
    }

    fn ranges(&self) -> RuleResult<()> {
        identifier("chargeID", &self.charge_id)?;
        identifier("awayAgencyID", &self.away_agency_id)?;
        identifier("homeAgencyID", &self.home_agency_id)?;
        in_range("vehicleClass", self.vehicle_class, 1..=99)?;
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
        if let (Some(entry), Some(exit)) = (self.entry_date_time, self.exit_date_time) {
            if entry > exit {
                return Err(RuleError::validation(
                    "entryDateTime",
                    "entryDateTime must not be after exitDateTime",
                ));
            }
        }
        Ok(())
    }

    fn conditional(&self) -> RuleResult<()> {
        let Ok(record_type) = self.record_type.parse::<RecordType>() else {
            return Ok(());
        };
        let kind = record_type.kind;
        if kind.is_tag_based() {
            require("tagSerialNumber", &self.tag_serial_number)?;
            require("tagAgencyID", &self.tag_agency_id)?;
        }
        if kind.is_video() {
            let plate = self.plate_info.as_ref().ok_or_else(|| {
                RuleError::validation("plateInfo", format!("is required for {kind} records"))
            })?;
            require("plateInfo.number", &plate.number)?;
        }
        if kind.requires_entry() {
            require("entryPlaza", &self.entry_plaza)?;
            require_some("entryDateTime", &self.entry_date_time)?;
        }
        Ok(())
    }
}
