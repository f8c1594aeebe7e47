use tollx_ledger::{Ledger, Scope, Selector};
use tollx_rules::{Lifecycle, Validate};
use tollx_types::{keys, Agency};

use crate::contract::{parse_status, Contract};
use crate::error::ContractResult;

impl<L: Ledger> Contract<L> {
    pub fn create_agency(&self, agency: Agency) -> ContractResult<Agency> {
        agency.validate()?;
        self.insert(agency, |_| Ok(()))
    }

    pub fn get_agency(&self, agency_id: &str) -> ContractResult<Agency> {
        self.fetch(&Scope::Shared, &keys::agency_key(agency_id))
    }

    pub fn update_agency_status(&self, agency_id: &str, status: &str) -> ContractResult<Agency> {
        self.transition(&Scope::Shared, &keys::agency_key(agency_id), status)
    }

    pub fn query_agencies_by_status(&self, status: &str) -> ContractResult<Vec<Agency>> {
        let status = parse_status::<Agency>(status)?;
        self.query(
            Scope::Shared,
            Selector::new().with(Agency::STATUS_FIELD, status.as_str()),
        )
    }

    /// Fails with `NotFound` if reference checks are on and the agency is
    /// not registered.
    pub(crate) fn require_agency(&self, agency_id: &str) -> ContractResult<()> {
        if !self.config().verify_references {
            return Ok(());
        }
        self.require_present(&Scope::Shared, &keys::agency_key(agency_id))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ContractError;
    use crate::operations::fixtures;
    use tollx_types::{samples, AgencyStatus};

    #[test]
    fn create_stamps_both_timestamps() {
        let contract = fixtures::contract();
        let agency = contract.get_agency("A1").unwrap();
        assert_eq!(agency.created_at, Some(fixtures::now()));
        assert_eq!(agency.updated_at, Some(fixtures::now()));
    }

    #[test]
    fn caller_timestamps_are_overwritten() {
        let contract = fixtures::contract();
        let mut agency = samples::agency("A3");
        agency.created_at = Some(fixtures::now() - chrono::Duration::days(400));
        let created = contract.create_agency(agency).unwrap();
        assert_eq!(created.created_at, Some(fixtures::now()));
    }

    #[test]
    fn duplicate_leaves_stored_record_unchanged() {
        let contract = fixtures::contract();
        let mut renamed = samples::agency("A1");
        renamed.name = "Someone Else".into();
        let err = contract.create_agency(renamed).unwrap_err();
        assert!(matches!(err, ContractError::Duplicate { ref key } if key == "AGENCY_A1"));
        assert_eq!(contract.get_agency("A1").unwrap().name, "Agency A1");
    }

    #[test]
    fn suspend_and_reactivate() {
        let contract = fixtures::contract();
        let agency = contract.update_agency_status("A1", "suspended").unwrap();
        assert_eq!(agency.status, Some(AgencyStatus::Suspended));
        contract.update_agency_status("A1", "active").unwrap();
        let err = contract.update_agency_status("A1", "active").unwrap_err();
        assert_eq!(err.kind(), "InvalidTransitionError");
    }

    #[test]
    fn query_by_status() {
        let contract = fixtures::contract();
        contract.update_agency_status("A2", "inactive").unwrap();
        let active = contract.query_agencies_by_status("active").unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].agency_id, "A1");
        assert!(matches!(
            contract.query_agencies_by_status("ACTIVE"),
            Err(ContractError::InvalidEnum { .. })
        ));
    }

    #[test]
    fn missing_agency() {
        let contract = fixtures::contract();
        assert!(matches!(
            contract.get_agency("A9"),
            Err(ContractError::NotFound { ref key }) if key == "AGENCY_A9"
        ));
    }
}
