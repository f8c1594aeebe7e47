//! Typed operations, one module per entity.

mod acknowledgement;
mod agency;
mod charge;
mod correction;
mod reconciliation;
mod settlement;
mod tag;

#[cfg(test)]
pub(crate) mod fixtures {
    use tollx_ledger::InMemoryLedger;
    use chrono::{DateTime, Utc};
    use tollx_types::samples;

    use crate::config::ContractConfig;
    use crate::contract::Contract;

    /// 2026-05-15T00:00:00Z
    pub fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_778_803_200, 0).unwrap()
    }

    /// A contract over an empty ledger with agencies `A1` and `A2`
    /// registered and the clock pinned to [`now`].
    pub fn contract_with(config: ContractConfig) -> Contract<InMemoryLedger> {
        let ledger = InMemoryLedger::new();
        ledger.set_timestamp(Some(now()));
        let contract = Contract::with_config(ledger, config);
        contract.create_agency(samples::agency("A1")).unwrap();
        contract.create_agency(samples::agency("A2")).unwrap();
        contract
    }

    pub fn contract() -> Contract<InMemoryLedger> {
        contract_with(ContractConfig::default())
    }
}
