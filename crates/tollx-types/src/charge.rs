use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::{entity_conversions, DocType, Record};
use crate::keys;
use crate::status::ChargeStatus;
use crate::tag::PlateDetail;

/// A toll transaction incurred at an away agency facility and billed to the
/// home agency that issued the credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    #[serde(rename = "chargeID", default)]
    pub charge_id: String,
    /// Protocol record-type code, e.g. `TB01`.
    #[serde(default)]
    pub record_type: String,
    #[serde(rename = "awayAgencyID", default)]
    pub away_agency_id: String,
    #[serde(rename = "homeAgencyID", default)]
    pub home_agency_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag_serial_number: String,
    #[serde(rename = "tagAgencyID", default, skip_serializing_if = "String::is_empty")]
    pub tag_agency_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate_info: Option<PlateDetail>,
    #[serde(rename = "facilityID", default)]
    pub facility_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub entry_plaza: String,
    #[serde(
        default,
        deserialize_with = "crate::blank::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub entry_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub exit_plaza: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub exit_lane: String,
    #[serde(default, deserialize_with = "crate::blank::optional")]
    pub exit_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub vehicle_class: u8,
    #[serde(default, deserialize_with = "crate::blank::optional")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub fee: Decimal,
    #[serde(rename = "discountPlanID", default, skip_serializing_if = "String::is_empty")]
    pub discount_plan_id: String,
    #[serde(default, deserialize_with = "crate::blank::optional")]
    pub status: Option<ChargeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Charge {
    /// Amount owed to the away agency after its interoperability fee.
    /// `None` without an amount or when the difference overflows.
    pub fn net_amount(&self) -> Option<Decimal> {
        self.amount?.checked_sub(self.fee)
    }
}

impl Record for Charge {
    const DOC_TYPE: DocType = DocType::Charge;

    fn key(&self) -> String {
        keys::charge_key(&self.charge_id)
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

    entity_conversions!(Charge);
}
