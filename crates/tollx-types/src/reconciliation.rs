use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::{entity_conversions, DocType, Record};
use crate::keys;

/// The home agency's posting result for one charge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    #[serde(rename = "chargeID", default)]
    pub charge_id: String,
    #[serde(rename = "awayAgencyID", default)]
    pub away_agency_id: String,
    #[serde(rename = "homeAgencyID", default)]
    pub home_agency_id: String,
    /// Disposition wire code, e.g. `P`.
    #[serde(default)]
    pub posting_disposition: String,
    #[serde(
        default,
        deserialize_with = "crate::blank::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub posted_amount: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "crate::blank::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub posted_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub adjustment_count: u32,
    /// Number of times this result has been resubmitted.
    #[serde(default)]
    pub resubmit_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Reconciliation {
    /// Key of the reconciled charge.
    pub fn charge_key(&self) -> String {
        keys::charge_key(&self.charge_id)
    }
}

impl Record for Reconciliation {
    const DOC_TYPE: DocType = DocType::Reconciliation;

    fn key(&self) -> String {
        keys::reconciliation_key(&self.charge_id)
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

    entity_conversions!(Reconciliation);
}
