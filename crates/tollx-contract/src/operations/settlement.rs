use chrono::NaiveDate;

use tollx_ledger::{Ledger, Scope, Selector};
use tollx_rules::{Lifecycle, Validate};
use tollx_types::{keys, Charge, Correction, Settlement, SettlementTotals};

use crate::contract::{parse_status, require_initial, Contract};
use crate::error::{ContractError, ContractResult};

fn partition(payor_agency_id: &str, payee_agency_id: &str) -> Scope {
    Scope::Partition(keys::settlement_partition(payor_agency_id, payee_agency_id))
}

impl<L: Ledger> Contract<L> {
    pub fn create_settlement(&self, settlement: Settlement) -> ContractResult<Settlement> {
        settlement.validate()?;
        require_initial(&settlement)?;
        self.insert(settlement, |settlement| {
            self.require_agency(&settlement.payor_agency_id)?;
            self.require_agency(&settlement.payee_agency_id)
        })
    }

    pub fn get_settlement(
        &self,
        payor_agency_id: &str,
        payee_agency_id: &str,
        settlement_id: &str,
    ) -> ContractResult<Settlement> {
        self.fetch(
            &partition(payor_agency_id, payee_agency_id),
            &keys::settlement_key(settlement_id),
        )
    }

    pub fn update_settlement_status(
        &self,
        payor_agency_id: &str,
        payee_agency_id: &str,
        settlement_id: &str,
        status: &str,
    ) -> ContractResult<Settlement> {
        self.transition(
            &partition(payor_agency_id, payee_agency_id),
            &keys::settlement_key(settlement_id),
            status,
        )
    }

    pub fn query_settlements_by_status(
        &self,
        payor_agency_id: &str,
        payee_agency_id: &str,
        status: &str,
    ) -> ContractResult<Vec<Settlement>> {
        let status = parse_status::<Settlement>(status)?;
        self.query(
            partition(payor_agency_id, payee_agency_id),
            Selector::new().with(Settlement::STATUS_FIELD, status.as_str()),
        )
    }

    /// Totals the payor (home agency) owes the payee (away agency) for
    /// posted and settled charges exiting in `[period_start, period_end)`.
    ///
    /// Reads only; the result can seed a `CreateSettlement` payload.
    pub fn calculate_settlement_totals(
        &self,
        payor_agency_id: &str,
        payee_agency_id: &str,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> ContractResult<SettlementTotals> {
        if payor_agency_id == payee_agency_id {
            return Err(ContractError::validation(
                "payorAgencyID",
                "must differ from payeeAgencyID",
            ));
        }
        if period_end <= period_start {
            return Err(ContractError::validation(
                "periodEnd",
                "periodEnd must be after periodStart",
            ));
        }
        let scope = Scope::Partition(keys::charge_partition(payee_agency_id, payor_agency_id));
        let charges: Vec<Charge> = self.query_unbounded(scope.clone(), Selector::new())?;
        let corrections: Vec<Correction> = self.query_unbounded(scope, Selector::new())?;
        let totals = SettlementTotals::aggregate(
            payor_agency_id,
            payee_agency_id,
            period_start,
            period_end,
            &charges,
            &corrections,
        )?;
        Ok(totals)
    }
}
