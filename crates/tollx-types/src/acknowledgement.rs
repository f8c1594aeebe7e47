use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{entity_conversions, DocType, Record};
use crate::keys;

/// Receipt and result of a batch submission between two agencies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgement {
    #[serde(rename = "acknowledgementID", default)]
    pub acknowledgement_id: String,
    /// Submission type wire code, e.g. `STRAN`.
    #[serde(default)]
    pub submission_type: String,
    /// Identifier of the acknowledged submission.
    #[serde(rename = "submissionID", default)]
    pub submission_id: String,
    #[serde(rename = "fromAgencyID", default)]
    pub from_agency_id: String,
    #[serde(rename = "toAgencyID", default)]
    pub to_agency_id: String,
    /// Return code wire value, e.g. `00`.
    #[serde(default)]
    pub return_code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub return_message: String,
    #[serde(default)]
    pub record_count: u32,
    #[serde(default, deserialize_with = "crate::blank::optional")]
    pub submission_date_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Acknowledgement {
    const DOC_TYPE: DocType = DocType::Acknowledgement;

    fn key(&self) -> String {
        keys::acknowledgement_key(&self.acknowledgement_id)
    }

    fn stamp_created(&mut self, at: DateTime<Utc>) {
        self.created_at = Some(at);
        self.updated_at = Some(at);
    }

    fn stamp_updated(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    entity_conversions!(Acknowledgement);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acknowledgements_live_in_the_shared_store() {
        let ack = crate::samples::acknowledgement("ACK-1", "A1", "A2");
        assert_eq!(ack.key(), "ACK_ACK-1");
        assert!(ack.partition_name().is_none());
    }

    #[test]
    fn return_code_keeps_leading_zero() {
        let ack = crate::samples::acknowledgement("ACK-1", "A1", "A2");
        let json = serde_json::to_value(&ack).unwrap();
        assert_eq!(json["returnCode"], "00");
    }
}
