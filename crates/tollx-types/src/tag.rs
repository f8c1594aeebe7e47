use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{entity_conversions, DocType, Record};
use crate::keys;
use crate::status::TagStatus;

/// License plate attached to a tag account or read from a video transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateDetail {
    /// ISO 3166 two-letter country code.
    #[serde(default)]
    pub country: String,
    /// Two-letter state or province code.
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub plate_type: String,
}

impl PlateDetail {
    pub fn new(country: &str, state: &str, number: &str) -> Self {
        Self {
            country: country.into(),
            state: state.into(),
            number: number.into(),
            plate_type: String::new(),
        }
    }
}

/// Discount plan enrolment on a tag account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountPlan {
    #[serde(rename = "planID", default)]
    pub plan_id: String,
    #[serde(default, deserialize_with = "crate::blank::optional")]
    pub start_date: Option<NaiveDate>,
    /// Open-ended when absent.
    #[serde(
        default,
        deserialize_with = "crate::blank::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,
}

impl DiscountPlan {
    /// Returns `true` if the plan covers `date`.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        let started = self.start_date.map(|start| start <= date).unwrap_or(false);
        let not_ended = self.end_date.map(|end| date <= end).unwrap_or(true);
        started && not_ended
    }
}

/// A transponder credential issued by a home agency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(default)]
    pub tag_serial_number: String,
    /// Agency that issued the tag.
    #[serde(rename = "tagAgencyID", default)]
    pub tag_agency_id: String,
    /// Agency that owns the customer account.
    #[serde(rename = "homeAgencyID", default)]
    pub home_agency_id: String,
    #[serde(rename = "accountID", default, skip_serializing_if = "String::is_empty")]
    pub account_id: String,
    #[serde(default)]
    pub tag_class: u8,
    #[serde(default, deserialize_with = "crate::blank::optional")]
    pub tag_status: Option<TagStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate_info: Option<PlateDetail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discount_plans: Vec<DiscountPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Tag {
    /// Discount plans in force on `date`.
    pub fn active_plans(&self, date: NaiveDate) -> impl Iterator<Item = &DiscountPlan> {
        self.discount_plans
            .iter()
            .filter(move |plan| plan.is_active_on(date))
    }
}

impl Record for Tag {
    const DOC_TYPE: DocType = DocType::Tag;

    fn key(&self) -> String {
        keys::tag_key(&self.tag_agency_id, &self.tag_serial_number)
    }

    fn stamp_created(&mut self, at: DateTime<Utc>) {
        self.created_at = Some(at);
        self.updated_at = Some(at);
    }

    fn stamp_updated(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    entity_conversions!(Tag);
}
