use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::{entity_conversions, DocType, Record};
use crate::keys;

/// An adjustment to a previously submitted charge.
///
/// Corrections for one charge are numbered from 1 upward; the latest one
/// carries the amounts that replace the original charge's.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    #[serde(rename = "originalChargeID", default)]
    pub original_charge_id: String,
    #[serde(default)]
    pub correction_seq_no: u32,
    #[serde(rename = "awayAgencyID", default)]
    pub away_agency_id: String,
    #[serde(rename = "homeAgencyID", default)]
    pub home_agency_id: String,
    /// Adjustment record-type code, e.g. `TB01A`.
    #[serde(default)]
    pub record_type: String,
    #[serde(default)]
    pub correction_reason: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason_detail: String,
    /// Corrected vehicle class; zero when the class is unchanged.
    #[serde(default)]
    pub vehicle_class: u8,
    #[serde(default, deserialize_with = "crate::blank::optional")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub fee: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Correction {
    /// Key of the correction this one must follow, if any.
    pub fn predecessor_key(&self) -> Option<String> {
        match self.correction_seq_no {
            0 | 1 => None,
            seq => Some(keys::correction_key(&self.original_charge_id, seq - 1)),
        }
    }

    /// Key of the charge being corrected.
    pub fn charge_key(&self) -> String {
        keys::charge_key(&self.original_charge_id)
    }
}

impl Record for Correction {
    const DOC_TYPE: DocType = DocType::Correction;

    fn key(&self) -> String {
        keys::correction_key(&self.original_charge_id, self.correction_seq_no)
    }

    fn partition_name(&self) -> Option<String> {
        Some(keys::charge_partition(
            &self.away_agency_id,
            &self.home_agency_id,
        ))
    }

    fn stamp_created(&mut self, at: DateTime<Utc>) {
        self.created_at = Some(at);
        self.updated_at = Some(at);
    }

    fn stamp_updated(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    entity_conversions!(Correction);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_zero_padded() {
        let correction = crate::samples::correction("CHG-1", 12, "A2", "A1");
        assert_eq!(correction.key(), "CORR_CHG-1_012");
        assert_eq!(correction.charge_key(), "CHARGE_CHG-1");
    }

    #[test]
    fn predecessor_follows_sequence() {
        let first = crate::samples::correction("CHG-1", 1, "A2", "A1");
        assert!(first.predecessor_key().is_none());
        let third = crate::samples::correction("CHG-1", 3, "A2", "A1");
        assert_eq!(third.predecessor_key().as_deref(), Some("CORR_CHG-1_002"));
    }

    #[test]
    fn shares_partition_with_charge() {
        let charge = crate::samples::charge("CHG-1", "A2", "A1");
        let correction = crate::samples::correction("CHG-1", 1, "A2", "A1");
        assert_eq!(charge.partition_name(), correction.partition_name());
    }
}
