use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{entity_conversions, DocType, Record};
use crate::keys;
use crate::status::{AgencyRole, AgencyStatus};

/// A network participant: a toll operator, a tag issuer, or both.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agency {
    #[serde(rename = "agencyID", default)]
    pub agency_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "consortiumID", default)]
    pub consortium_id: String,
    /// Two-letter state or province code; empty when not reported.
    #[serde(default)]
    pub state: String,
    #[serde(default, deserialize_with = "crate::blank::optional")]
    pub role: Option<AgencyRole>,
    #[serde(default, deserialize_with = "crate::blank::optional")]
    pub status: Option<AgencyStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Agency {
    pub fn is_active(&self) -> bool {
        self.status == Some(AgencyStatus::Active)
    }
}

impl Record for Agency {
    const DOC_TYPE: DocType = DocType::Agency;

    fn key(&self) -> String {
        keys::agency_key(&self.agency_id)
    }

    fn stamp_created(&mut self, at: DateTime<Utc>) {
        self.created_at = Some(at);
        self.updated_at = Some(at);
    }

    fn stamp_updated(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    entity_conversions!(Agency);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_payload() {
        let json = r#"{
            "agencyID": "A1",
            "name": "Bay Bridge Authority",
            "consortiumID": "WEST",
            "state": "CA",
            "role": "both",
            "status": "active"
        }"#;
        let agency: Agency = serde_json::from_str(json).unwrap();
        assert_eq!(agency.agency_id, "A1");
        assert_eq!(agency.role, Some(AgencyRole::Both));
        assert!(agency.is_active());
        assert_eq!(agency.key(), "AGENCY_A1");
        assert!(agency.created_at.is_none());
    }

    #[test]
    fn stamping_sets_metadata() {
        let mut agency = crate::samples::agency("A1");
        let t0 = DateTime::from_timestamp(1_780_000_000, 0).unwrap();
        let t1 = DateTime::from_timestamp(1_780_000_100, 0).unwrap();
        agency.stamp_created(t0);
        assert_eq!(agency.created_at, Some(t0));
        agency.stamp_updated(t1);
        assert_eq!(agency.created_at, Some(t0));
        assert_eq!(agency.updated_at, Some(t1));
    }
}
