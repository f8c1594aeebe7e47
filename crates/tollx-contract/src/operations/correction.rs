use tollx_ledger::{Ledger, Scope, Selector};
use tollx_rules::Validate;
use tollx_types::{keys, Charge, Correction};

use super::charge::same_parties;
use crate::contract::{locate, Contract};
use crate::error::{ContractError, ContractResult};

impl<L: Ledger> Contract<L> {
    /// Record correction `correctionSeqNo` of a charge.
    ///
    /// The charge must exist in the pair's partition and, past the first,
    /// the previous correction must already be recorded.
    pub fn create_correction(&self, correction: Correction) -> ContractResult<Correction> {
        correction.validate()?;
        self.insert(correction, |correction| {
            let (scope, _) = locate(correction);
            let charge: Charge = self.fetch(&scope, &correction.charge_key())?;
            same_parties(
                &correction.away_agency_id,
                &correction.home_agency_id,
                &charge,
            )?;
            if let Some(previous) = correction.predecessor_key() {
                if !self.ledger().exists(&scope, &previous)? {
                    return Err(ContractError::validation(
                        "correctionSeqNo",
                        format!(
                            "correction {} of charge {} has not been recorded",
                            correction.correction_seq_no - 1,
                            correction.original_charge_id
                        ),
                    ));
                }
            }
            Ok(())
        })
    }

    pub fn get_correction(
        &self,
        away_agency_id: &str,
        home_agency_id: &str,
        original_charge_id: &str,
        seq_no: u32,
    ) -> ContractResult<Correction> {
        self.fetch(
            &Scope::Partition(keys::charge_partition(away_agency_id, home_agency_id)),
            &keys::correction_key(original_charge_id, seq_no),
        )
    }

    /// Corrections of one charge in sequence order.
    pub fn query_corrections_by_charge(
        &self,
        away_agency_id: &str,
        home_agency_id: &str,
        original_charge_id: &str,
    ) -> ContractResult<Vec<Correction>> {
        self.query(
            Scope::Partition(keys::charge_partition(away_agency_id, home_agency_id)),
            Selector::new().with("originalChargeID", original_charge_id),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::fixtures;
    use tollx_types::samples;

    fn with_charge() -> crate::contract::Contract<tollx_ledger::InMemoryLedger> {
        let contract = fixtures::contract();
        contract
            .create_charge(samples::charge("CHG-1", "A2", "A1"))
            .unwrap();
        contract
    }

    #[test]
    fn sequence_must_be_contiguous() {
        let contract = with_charge();
        let err = contract
            .create_correction(samples::correction("CHG-1", 2, "A2", "A1"))
            .unwrap_err();
        assert!(matches!(err, ContractError::Validation { ref field, .. } if field == "correctionSeqNo"));

        contract
            .create_correction(samples::correction("CHG-1", 1, "A2", "A1"))
            .unwrap();
        contract
            .create_correction(samples::correction("CHG-1", 2, "A2", "A1"))
            .unwrap();

        let again = contract
            .create_correction(samples::correction("CHG-1", 1, "A2", "A1"))
            .unwrap_err();
        assert!(matches!(again, ContractError::Duplicate { ref key } if key == "CORR_CHG-1_001"));
    }

    #[test]
    fn charge_must_exist() {
        let contract = with_charge();
        let err = contract
            .create_correction(samples::correction("CHG-9", 1, "A2", "A1"))
            .unwrap_err();
        assert!(matches!(err, ContractError::NotFound { ref key } if key == "CHARGE_CHG-9"));
    }

    #[test]
    fn parties_must_match_the_charge() {
        let contract = with_charge();
        let err = contract
            .create_correction(samples::correction("CHG-1", 1, "A1", "A2"))
            .unwrap_err();
        assert!(matches!(err, ContractError::Validation { ref field, .. } if field == "awayAgencyID"));
    }

    #[test]
    fn listed_in_sequence_order() {
        let contract = with_charge();
        for seq in 1..=3 {
            contract
                .create_correction(samples::correction("CHG-1", seq, "A2", "A1"))
                .unwrap();
        }
        let listed = contract.query_corrections_by_charge("A1", "A2", "CHG-1").unwrap();
        let seqs: Vec<u32> = listed.iter().map(|c| c.correction_seq_no).collect();
        assert_eq!(seqs, [1, 2, 3]);
        let second = contract.get_correction("A2", "A1", "CHG-1", 2).unwrap();
        assert_eq!(second.correction_seq_no, 2);
    }
}
