//! The closed set of entity kinds and their shared storage behaviour.
//!
//! Every stored record is an [`Entity`] serialized as JSON with a `docType`
//! discriminator, which is also the attribute secondary-index queries filter
//! on. Code that knows the concrete type works through the [`Record`] trait
//! instead of matching on the discriminator.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::acknowledgement::Acknowledgement;
use crate::agency::Agency;
use crate::charge::Charge;
use crate::correction::Correction;
use crate::error::{TypeError, TypeResult};
use crate::reconciliation::Reconciliation;
use crate::settlement::Settlement;
use crate::tag::Tag;

/// Name of the discriminator attribute on stored records.
pub const DOC_TYPE_FIELD: &str = "docType";

closed_set! {
    /// Discriminator identifying an entity's kind.
    pub enum DocType as "doc type" {
        Agency => "agency",
        Tag => "tag",
        Charge => "charge",
        Correction => "correction",
        Reconciliation => "reconciliation",
        Acknowledgement => "acknowledgement",
        Settlement => "settlement",
    }
}

/// A stored record of any kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "docType", rename_all = "lowercase")]
pub enum Entity {
    Agency(Agency),
    Tag(Tag),
    Charge(Charge),
    Correction(Correction),
    Reconciliation(Reconciliation),
    Acknowledgement(Acknowledgement),
    Settlement(Settlement),
}

impl Entity {
    pub fn doc_type(&self) -> DocType {
        match self {
            Self::Agency(_) => DocType::Agency,
            Self::Tag(_) => DocType::Tag,
            Self::Charge(_) => DocType::Charge,
            Self::Correction(_) => DocType::Correction,
            Self::Reconciliation(_) => DocType::Reconciliation,
            Self::Acknowledgement(_) => DocType::Acknowledgement,
            Self::Settlement(_) => DocType::Settlement,
        }
    }

    pub fn key(&self) -> String {
        match self {
            Self::Agency(e) => e.key(),
            Self::Tag(e) => e.key(),
            Self::Charge(e) => e.key(),
            Self::Correction(e) => e.key(),
            Self::Reconciliation(e) => e.key(),
            Self::Acknowledgement(e) => e.key(),
            Self::Settlement(e) => e.key(),
        }
    }

    pub fn partition_name(&self) -> Option<String> {
        match self {
            Self::Agency(e) => e.partition_name(),
            Self::Tag(e) => e.partition_name(),
            Self::Charge(e) => e.partition_name(),
            Self::Correction(e) => e.partition_name(),
            Self::Reconciliation(e) => e.partition_name(),
            Self::Acknowledgement(e) => e.partition_name(),
            Self::Settlement(e) => e.partition_name(),
        }
    }

    /// Encode as the JSON bytes handed to the ledger.
    pub fn encode(&self) -> TypeResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Decode JSON bytes read back from the ledger.
    pub fn decode(bytes: &[u8]) -> TypeResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| TypeError::Serialization(e.to_string()))
    }
}

/// Behaviour shared by every concrete entity type.
pub trait Record: Clone + Serialize + DeserializeOwned {
    const DOC_TYPE: DocType;

    /// Deterministic storage key derived from identity fields only.
    fn key(&self) -> String;

    /// Bilateral partition holding the record, or `None` for the shared store.
    fn partition_name(&self) -> Option<String> {
        None
    }

    fn stamp_created(&mut self, at: DateTime<Utc>);

    fn stamp_updated(&mut self, at: DateTime<Utc>);

    fn into_entity(self) -> Entity;

    /// Unwrap an entity of this kind; `None` if the discriminator differs.
    fn from_entity(entity: Entity) -> Option<Self>;

    /// Encode this record with its discriminator.
    fn encode(&self) -> TypeResult<Vec<u8>> {
        self.clone().into_entity().encode()
    }

    /// Decode stored bytes, requiring the discriminator to match.
    fn decode(bytes: &[u8]) -> TypeResult<Self> {
        let entity = Entity::decode(bytes)?;
        let found = entity.doc_type();
        Self::from_entity(entity).ok_or_else(|| {
            TypeError::Serialization(format!(
                "expected {} record, found {found}",
                Self::DOC_TYPE
            ))
        })
    }
}

/// Implements the conversion half of [`Record`] for one entity variant.
macro_rules! entity_conversions {
    ($variant:ident) => {
        fn into_entity(self) -> $crate::entity::Entity {
            $crate::entity::Entity::$variant(self)
        }

        fn from_entity(entity: $crate::entity::Entity) -> Option<Self> {
            match entity {
                $crate::entity::Entity::$variant(inner) => Some(inner),
                _ => None,
            }
        }
    };
}

pub(crate) use entity_conversions;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::AgencyStatus;
    use crate::samples;

    #[test]
    fn encoded_record_carries_doc_type() {
        let agency = samples::agency("A1");
        let bytes = Record::encode(&agency).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value[DOC_TYPE_FIELD], "agency");
        assert_eq!(value["agencyID"], "A1");
    }

    #[test]
    fn decode_checks_discriminator() {
        let agency = samples::agency("A1");
        let bytes = Record::encode(&agency).unwrap();
        let decoded = Agency::decode(&bytes).unwrap();
        assert_eq!(decoded.status, Some(AgencyStatus::Active));

        let err = Charge::decode(&bytes).unwrap_err();
        assert_eq!(
            err,
            TypeError::Serialization("expected charge record, found agency".into())
        );
    }

    #[test]
    fn entity_dispatches_key_and_partition() {
        let charge = samples::charge("CHG-1", "A2", "A1");
        let entity = charge.clone().into_entity();
        assert_eq!(entity.doc_type(), DocType::Charge);
        assert_eq!(entity.key(), "CHARGE_CHG-1");
        assert_eq!(entity.partition_name().as_deref(), Some("charges_A1_A2"));
        assert!(samples::agency("A1").into_entity().partition_name().is_none());
    }

    #[test]
    fn doc_type_names_match_serde_tags() {
        for doc_type in DocType::ALL {
            let json = serde_json::to_string(doc_type).unwrap();
            assert_eq!(json, format!("\"{}\"", doc_type.as_str()));
        }
    }
}
