//! The operation pipeline shared by every entity.
//!
//! Creates run parse, validate, locate, existence check, reference checks,
//! stamp and a single write, in that order. Reads locate and decode. Status
//! updates fetch, check the transition table, then write the status and
//! `updatedAt` only. Any failure returns before the write.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use tollx_ledger::{Ledger, Scope, Selector};
use tollx_rules::Lifecycle;
use tollx_types::{Record, DOC_TYPE_FIELD};

use crate::config::ContractConfig;
use crate::error::{ContractError, ContractResult};

/// The operation layer, bound to one ledger.
#[derive(Debug)]
pub struct Contract<L> {
    ledger: L,
    config: ContractConfig,
}

/// Where a record lives: its scope and key.
pub(crate) fn locate<R: Record>(record: &R) -> (Scope, String) {
    (Scope::from_partition(record.partition_name()), record.key())
}

pub(crate) fn decode<R: Record>(key: &str, bytes: &[u8]) -> ContractResult<R> {
    R::decode(bytes).map_err(|e| ContractError::Corrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Decode an invocation payload, rejecting a `docType` naming another
/// entity.
pub fn parse_payload<R>(raw: &str) -> ContractResult<R>
where
    R: Record + DeserializeOwned,
{
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ContractError::Parse(e.to_string()))?;
    if let Some(doc_type) = value.get(DOC_TYPE_FIELD) {
        if doc_type.as_str() != Some(R::DOC_TYPE.as_str()) {
            return Err(ContractError::Parse(format!(
                "expected {DOC_TYPE_FIELD} '{}', found {doc_type}",
                R::DOC_TYPE
            )));
        }
    }
    serde_json::from_value(value).map_err(|e| ContractError::Parse(e.to_string()))
}

/// Parse a requested status for `R`.
pub(crate) fn parse_status<R: Lifecycle>(raw: &str) -> ContractResult<R::Status> {
    raw.parse().map_err(|_| ContractError::InvalidEnum {
        field: R::STATUS_FIELD.to_string(),
        value: raw.to_string(),
    })
}

/// Reject a new record whose status is missing or not an initial one.
pub(crate) fn require_initial<R: Lifecycle>(record: &R) -> ContractResult<()> {
    let table = R::transitions();
    let Some(status) = record.status() else {
        return Err(ContractError::validation(R::STATUS_FIELD, "is required"));
    };
    if table.is_initial(status) {
        return Ok(());
    }
    let allowed: Vec<String> = table.initial().iter().map(|s| s.to_string()).collect();
    Err(ContractError::validation(
        R::STATUS_FIELD,
        format!(
            "a new {} must be created as {}, got {}",
            table.entity(),
            allowed.join(" or "),
            status
        ),
    ))
}

impl<L: Ledger> Contract<L> {
    pub fn new(ledger: L) -> Self {
        Self::with_config(ledger, ContractConfig::default())
    }

    pub fn with_config(ledger: L, config: ContractConfig) -> Self {
        Self { ledger, config }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    pub fn into_ledger(self) -> L {
        self.ledger
    }

    pub(crate) fn ensure_absent(&self, scope: &Scope, key: &str) -> ContractResult<()> {
        if self.ledger.exists(scope, key)? {
            return Err(ContractError::Duplicate {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn require_present(&self, scope: &Scope, key: &str) -> ContractResult<()> {
        if !self.ledger.exists(scope, key)? {
            return Err(ContractError::NotFound {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn store<R: Record>(&self, scope: &Scope, key: &str, record: &R) -> ContractResult<()> {
        let bytes = record.encode().map_err(|e| ContractError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.ledger.write(scope, key, &bytes)?;
        Ok(())
    }

    /// Write a validated new record after the existence and reference
    /// checks pass.
    pub(crate) fn insert<R, F>(&self, mut record: R, check_references: F) -> ContractResult<R>
    where
        R: Record,
        F: FnOnce(&R) -> ContractResult<()>,
    {
        let (scope, key) = locate(&record);
        debug!(doc_type = %R::DOC_TYPE, %scope, %key, "resolved record location");
        self.ensure_absent(&scope, &key)?;
        check_references(&record)?;
        record.stamp_created(self.ledger.tx_timestamp()?);
        self.store(&scope, &key, &record)?;
        info!(doc_type = %R::DOC_TYPE, %scope, %key, "created");
        Ok(record)
    }

    pub(crate) fn fetch<R: Record>(&self, scope: &Scope, key: &str) -> ContractResult<R> {
        debug!(doc_type = %R::DOC_TYPE, %scope, %key, "fetch");
        let bytes = self
            .ledger
            .read(scope, key)?
            .ok_or_else(|| ContractError::NotFound {
                key: key.to_string(),
            })?;
        decode(key, &bytes)
    }

    /// Move a stored record to `requested` along its transition table.
    pub(crate) fn transition<R: Lifecycle>(
        &self,
        scope: &Scope,
        key: &str,
        requested: &str,
    ) -> ContractResult<R> {
        let target = parse_status::<R>(requested)?;
        let mut record: R = self.fetch(scope, key)?;
        let current = record.status().ok_or_else(|| ContractError::Corrupt {
            key: key.to_string(),
            reason: format!("no {} recorded", R::STATUS_FIELD),
        })?;
        R::transitions().check(current, target)?;
        record.set_status(target);
        record.stamp_updated(self.ledger.tx_timestamp()?);
        self.store(scope, key, &record)?;
        info!(
            entity = R::transitions().entity(),
            %key,
            from = %current,
            to = %target,
            "status updated"
        );
        Ok(record)
    }

    /// Records of type `R` in `scope` matching `selector`, capped at the
    /// configured query limit, in key order.
    pub(crate) fn query<R: Record>(&self, scope: Scope, selector: Selector) -> ContractResult<Vec<R>> {
        self.query_with_limit(scope, selector.with_limit(self.config.query_limit))
    }

    /// Like [`Contract::query`] but without the limit, for aggregation.
    pub(crate) fn query_unbounded<R: Record>(
        &self,
        scope: Scope,
        selector: Selector,
    ) -> ContractResult<Vec<R>> {
        self.query_with_limit(scope, selector)
    }

    fn query_with_limit<R: Record>(&self, scope: Scope, selector: Selector) -> ContractResult<Vec<R>> {
        let selector = selector.with(DOC_TYPE_FIELD, R::DOC_TYPE.as_str());
        debug!(%scope, %selector, limit = ?selector.limit, "query");
        let hits = self.ledger.query(&scope, &selector)?;
        hits.iter().map(|hit| decode(&hit.key, &hit.value)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollx_ledger::InMemoryLedger;
    use tollx_types::{samples, Agency, Charge, ChargeStatus, Tag};

    #[test]
    fn payload_doc_type_must_match() {
        let agency = samples::agency("A1").into_entity();
        let json = serde_json::to_string(&agency).unwrap();
        assert!(parse_payload::<Agency>(&json).is_ok());
        assert!(matches!(
            parse_payload::<Tag>(&json),
            Err(ContractError::Parse(_))
        ));
    }

    #[test]
    fn payload_must_be_json() {
        let err = parse_payload::<Agency>("{not json").unwrap_err();
        assert_eq!(err.kind(), "ParseError");
    }

    #[test]
    fn unknown_status_value_is_enum_error() {
        let err = parse_status::<Charge>("POSTED").unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidEnum { ref field, ref value } if field == "status" && value == "POSTED"
        ));
    }

    #[test]
    fn initial_status_enforced() {
        let mut charge = samples::charge("CHG-1", "A2", "A1");
        assert!(require_initial(&charge).is_ok());
        charge.status = Some(ChargeStatus::Posted);
        let err = require_initial(&charge).unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation failed on status: a new charge must be created as pending, got posted"
        );
        charge.status = None;
        assert_eq!(
            require_initial(&charge).unwrap_err().to_string(),
            "validation failed on status: is required"
        );
    }

    #[test]
    fn stored_record_without_status_is_corrupt() {
        let contract = Contract::new(InMemoryLedger::new());
        let mut agency = samples::agency("A1");
        agency.status = None;
        let (scope, key) = locate(&agency);
        contract.store(&scope, &key, &agency).unwrap();
        let err = contract
            .transition::<Agency>(&scope, &key, "suspended")
            .unwrap_err();
        assert!(matches!(err, ContractError::Corrupt { .. }));
        assert_eq!(
            contract.fetch::<Agency>(&scope, &key).unwrap().status,
            None
        );
    }

    #[test]
    fn failed_reference_check_writes_nothing() {
        let contract = Contract::new(InMemoryLedger::new());
        let err = contract
            .insert(samples::agency("A1"), |_| {
                Err(ContractError::NotFound { key: "X".into() })
            })
            .unwrap_err();
        assert!(matches!(err, ContractError::NotFound { .. }));
        assert_eq!(contract.ledger().shared_len(), 0);
    }

    #[test]
    fn corrupt_record_reported() {
        let contract = Contract::new(InMemoryLedger::new());
        contract.ledger().put("AGENCY_A1", b"{\"docType\":\"tag\"}").unwrap();
        let err = contract.fetch::<Agency>(&Scope::Shared, "AGENCY_A1").unwrap_err();
        assert!(matches!(err, ContractError::Corrupt { .. }));
    }
}
