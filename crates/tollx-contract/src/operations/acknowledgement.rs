use tollx_ledger::{Ledger, Scope, Selector};
use tollx_rules::Validate;
use tollx_types::{keys, Acknowledgement};

use crate::contract::Contract;
use crate::error::ContractResult;

impl<L: Ledger> Contract<L> {
    pub fn create_acknowledgement(
        &self,
        acknowledgement: Acknowledgement,
    ) -> ContractResult<Acknowledgement> {
        acknowledgement.validate()?;
        self.insert(acknowledgement, |_| Ok(()))
    }

    pub fn get_acknowledgement(&self, acknowledgement_id: &str) -> ContractResult<Acknowledgement> {
        self.fetch(
            &Scope::Shared,
            &keys::acknowledgement_key(acknowledgement_id),
        )
    }

    pub fn query_acknowledgements_by_sender(
        &self,
        from_agency_id: &str,
    ) -> ContractResult<Vec<Acknowledgement>> {
        self.query(
            Scope::Shared,
            Selector::new().with("fromAgencyID", from_agency_id),
        )
    }
}
