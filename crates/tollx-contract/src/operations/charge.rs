use tollx_ledger::{Ledger, Scope, Selector};
use tollx_rules::{Lifecycle, Validate};
use tollx_types::{keys, Charge};

use crate::contract::{parse_status, require_initial, Contract};
use crate::error::{ContractError, ContractResult};

fn partition(away_agency_id: &str, home_agency_id: &str) -> Scope {
    Scope::Partition(keys::charge_partition(away_agency_id, home_agency_id))
}

/// Reject a dependent record whose agency pair is not the charge's.
pub(crate) fn same_parties(
    away_agency_id: &str,
    home_agency_id: &str,
    charge: &Charge,
) -> ContractResult<()> {
    if charge.away_agency_id != away_agency_id || charge.home_agency_id != home_agency_id {
        return Err(ContractError::validation(
            "awayAgencyID",
            format!(
                "charge {} is from {} to {}",
                charge.charge_id, charge.away_agency_id, charge.home_agency_id
            ),
        ));
    }
    Ok(())
}

impl<L: Ledger> Contract<L> {
    pub fn create_charge(&self, charge: Charge) -> ContractResult<Charge> {
        charge.validate()?;
        require_initial(&charge)?;
        self.insert(charge, |charge| {
            self.require_agency(&charge.away_agency_id)?;
            self.require_agency(&charge.home_agency_id)
        })
    }

    pub fn get_charge(
        &self,
        away_agency_id: &str,
        home_agency_id: &str,
        charge_id: &str,
    ) -> ContractResult<Charge> {
        self.fetch(
            &partition(away_agency_id, home_agency_id),
            &keys::charge_key(charge_id),
        )
    }

    pub fn update_charge_status(
        &self,
        away_agency_id: &str,
        home_agency_id: &str,
        charge_id: &str,
        status: &str,
    ) -> ContractResult<Charge> {
        self.transition(
            &partition(away_agency_id, home_agency_id),
            &keys::charge_key(charge_id),
            status,
        )
    }

    pub fn query_charges_by_status(
        &self,
        away_agency_id: &str,
        home_agency_id: &str,
        status: &str,
    ) -> ContractResult<Vec<Charge>> {
        let status = parse_status::<Charge>(status)?;
        self.query(
            partition(away_agency_id, home_agency_id),
            Selector::new().with(Charge::STATUS_FIELD, status.as_str()),
        )
    }

    /// Charges for one tag, identified by its issuing agency and serial.
    pub fn query_charges_by_tag(
        &self,
        away_agency_id: &str,
        home_agency_id: &str,
        tag_agency_id: &str,
        tag_serial_number: &str,
    ) -> ContractResult<Vec<Charge>> {
        self.query(
            partition(away_agency_id, home_agency_id),
            Selector::new()
                .with("tagAgencyID", tag_agency_id)
                .with("tagSerialNumber", tag_serial_number),
        )
    }
}
