use tracing::info;

use tollx_ledger::{Ledger, Scope, Selector};
use tollx_rules::Validate;
use tollx_types::{keys, Charge, DispositionCode, Reconciliation, Record};

use super::charge::same_parties;
use crate::config::ReconciliationPolicy;
use crate::contract::{decode, locate, Contract};
use crate::error::{ContractError, ContractResult};

impl<L: Ledger> Contract<L> {
    /// Record the home agency's posting result for a charge.
    ///
    /// Under [`ReconciliationPolicy::Strict`] a charge has at most one
    /// reconciliation. Under [`ReconciliationPolicy::Supersede`] a later one
    /// replaces the stored one when its `resubmitCount` is higher.
    pub fn create_reconciliation(
        &self,
        reconciliation: Reconciliation,
    ) -> ContractResult<Reconciliation> {
        reconciliation.validate()?;
        match self.config().reconciliation_policy {
            ReconciliationPolicy::Strict => {
                self.insert(reconciliation, |r| self.require_reconcilable(r))
            }
            ReconciliationPolicy::Supersede => self.supersede(reconciliation),
        }
    }

    fn supersede(&self, mut reconciliation: Reconciliation) -> ContractResult<Reconciliation> {
        let (scope, key) = locate(&reconciliation);
        let Some(bytes) = self.ledger().read(&scope, &key)? else {
            return self.insert(reconciliation, |r| self.require_reconcilable(r));
        };
        let stored: Reconciliation = decode(&key, &bytes)?;
        if reconciliation.resubmit_count <= stored.resubmit_count {
            return Err(ContractError::Duplicate { key });
        }
        self.require_reconcilable(&reconciliation)?;

        let now = self.ledger().tx_timestamp()?;
        reconciliation.stamp_created(now);
        reconciliation.created_at = stored.created_at.or(Some(now));
        self.store(&scope, &key, &reconciliation)?;
        info!(
            %key,
            previous = stored.resubmit_count,
            resubmit = reconciliation.resubmit_count,
            "reconciliation superseded"
        );
        Ok(reconciliation)
    }

    fn require_reconcilable(&self, reconciliation: &Reconciliation) -> ContractResult<()> {
        let (scope, _) = locate(reconciliation);
        let charge: Charge = self.fetch(&scope, &reconciliation.charge_key())?;
        same_parties(
            &reconciliation.away_agency_id,
            &reconciliation.home_agency_id,
            &charge,
        )
    }

    pub fn get_reconciliation(
        &self,
        away_agency_id: &str,
        home_agency_id: &str,
        charge_id: &str,
    ) -> ContractResult<Reconciliation> {
        self.fetch(
            &Scope::Partition(keys::charge_partition(away_agency_id, home_agency_id)),
            &keys::reconciliation_key(charge_id),
        )
    }

    pub fn query_reconciliations_by_disposition(
        &self,
        away_agency_id: &str,
        home_agency_id: &str,
        disposition: &str,
    ) -> ContractResult<Vec<Reconciliation>> {
        let code: DispositionCode =
            disposition
                .parse()
                .map_err(|_| ContractError::InvalidEnum {
                    field: "postingDisposition".into(),
                    value: disposition.to_string(),
                })?;
        self.query(
            Scope::Partition(keys::charge_partition(away_agency_id, home_agency_id)),
            Selector::new().with("postingDisposition", code.as_str()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContractConfig;
    use crate::operations::fixtures;
    use tollx_ledger::InMemoryLedger;
    use chrono::Duration;
    use tollx_types::{samples, Decimal};

    fn with_charge(policy: ReconciliationPolicy) -> Contract<InMemoryLedger> {
        let contract = fixtures::contract_with(ContractConfig {
            reconciliation_policy: policy,
            ..Default::default()
        });
        contract
            .create_charge(samples::charge("CHG-1", "A2", "A1"))
            .unwrap();
        contract
    }

    #[test]
    fn posted_needs_posted_date() {
        let contract = with_charge(ReconciliationPolicy::Strict);
        let mut recon = samples::reconciliation("CHG-1", "A2", "A1");
        recon.posting_disposition = "P".into();
        let err = contract.create_reconciliation(recon).unwrap_err();
        assert!(matches!(err, ContractError::Validation { ref field, .. } if field == "postedDateTime"));
        assert!(contract.get_reconciliation("A2", "A1", "CHG-1").is_err());

        let recon = samples::reconciliation("CHG-1", "A2", "A1");
        assert!(contract.create_reconciliation(recon).is_ok());
    }

    #[test]
    fn charge_must_exist() {
        let contract = with_charge(ReconciliationPolicy::Strict);
        let err = contract
            .create_reconciliation(samples::reconciliation("CHG-2", "A2", "A1"))
            .unwrap_err();
        assert!(matches!(err, ContractError::NotFound { ref key } if key == "CHARGE_CHG-2"));
    }

    #[test]
    fn strict_rejects_second() {
        let contract = with_charge(ReconciliationPolicy::Strict);
        contract
            .create_reconciliation(samples::reconciliation("CHG-1", "A2", "A1"))
            .unwrap();
        let mut again = samples::reconciliation("CHG-1", "A2", "A1");
        again.resubmit_count = 1;
        let err = contract.create_reconciliation(again).unwrap_err();
        assert!(matches!(err, ContractError::Duplicate { ref key } if key == "RECON_CHG-1"));
        let stored = contract.get_reconciliation("A2", "A1", "CHG-1").unwrap();
        assert_eq!(stored.resubmit_count, 0);
    }

    #[test]
    fn supersede_requires_higher_resubmit_count() {
        let contract = with_charge(ReconciliationPolicy::Supersede);
        let first = contract
            .create_reconciliation(samples::reconciliation("CHG-1", "A2", "A1"))
            .unwrap();

        let same = samples::reconciliation("CHG-1", "A2", "A1");
        assert!(matches!(
            contract.create_reconciliation(same),
            Err(ContractError::Duplicate { .. })
        ));

        let later = fixtures::now() + Duration::hours(2);
        contract.ledger().set_timestamp(Some(later));
        let mut posted = samples::reconciliation("CHG-1", "A2", "A1");
        posted.posting_disposition = "P".into();
        posted.posted_amount = Some(Decimal::new(475, 2));
        posted.posted_date_time = Some(later);
        posted.resubmit_count = 1;
        let replaced = contract.create_reconciliation(posted).unwrap();
        assert_eq!(replaced.created_at, first.created_at);
        assert_eq!(replaced.updated_at, Some(later));

        let stored = contract.get_reconciliation("A1", "A2", "CHG-1").unwrap();
        assert_eq!(stored.posting_disposition, "P");
        assert_eq!(stored.resubmit_count, 1);
    }

    #[test]
    fn query_by_disposition() {
        let contract = with_charge(ReconciliationPolicy::Strict);
        contract
            .create_charge(samples::charge("CHG-2", "A2", "A1"))
            .unwrap();
        contract
            .create_reconciliation(samples::reconciliation("CHG-1", "A2", "A1"))
            .unwrap();
        let mut invalid = samples::reconciliation("CHG-2", "A2", "A1");
        invalid.posting_disposition = "I".into();
        contract.create_reconciliation(invalid).unwrap();

        let dups = contract
            .query_reconciliations_by_disposition("A2", "A1", "D")
            .unwrap();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].charge_id, "CHG-1");
        assert!(matches!(
            contract.query_reconciliations_by_disposition("A2", "A1", "d"),
            Err(ContractError::InvalidEnum { .. })
        ));
    }
}
