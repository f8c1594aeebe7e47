//! In-memory ledger for tests and the command-line tool.
//!
//! [`InMemoryLedger`] keeps the shared store and every partition in ordered
//! maps behind `RwLock`s, so queries return records in key order. Its state
//! can be saved to and loaded from a JSON snapshot file, which lets a
//! sequence of CLI invocations behave like one long-lived ledger.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::selector::{Scope, Selector};
use crate::traits::{Ledger, QueryHit};

type Table = BTreeMap<String, Vec<u8>>;

/// An in-memory implementation of [`Ledger`].
///
/// Transaction time is the wall clock unless pinned with
/// [`InMemoryLedger::set_timestamp`].
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    shared: RwLock<Table>,
    partitions: RwLock<BTreeMap<String, Table>>,
    clock: RwLock<Option<DateTime<Utc>>>,
}

/// On-disk form of an [`InMemoryLedger`]: records are embedded as JSON so
/// the file stays readable.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    shared: BTreeMap<String, Value>,
    #[serde(default)]
    partitions: BTreeMap<String, BTreeMap<String, Value>>,
}

fn check_name(what: &'static str, name: &str) -> LedgerResult<()> {
    if name.is_empty() {
        return Err(LedgerError::EmptyName { what });
    }
    Ok(())
}

fn to_values(table: &Table) -> LedgerResult<BTreeMap<String, Value>> {
    table
        .iter()
        .map(|(key, bytes)| {
            let value = serde_json::from_slice(bytes).map_err(|e| {
                LedgerError::Serialization(format!("record {key} is not JSON: {e}"))
            })?;
            Ok((key.clone(), value))
        })
        .collect()
}

fn from_values(values: BTreeMap<String, Value>) -> LedgerResult<Table> {
    values
        .into_iter()
        .map(|(key, value)| {
            let bytes = serde_json::to_vec(&value)
                .map_err(|e| LedgerError::Serialization(e.to_string()))?;
            Ok((key, bytes))
        })
        .collect()
}

fn select(table: &Table, selector: &Selector) -> Vec<QueryHit> {
    let hits = table
        .iter()
        .filter(|(_, value)| selector.matches_bytes(value))
        .map(|(key, value)| QueryHit {
            key: key.clone(),
            value: value.clone(),
        });
    match selector.limit {
        Some(limit) => hits.take(limit).collect(),
        None => hits.collect(),
    }
}

impl InMemoryLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the transaction timestamp; `None` returns to the wall clock.
    pub fn set_timestamp(&self, at: Option<DateTime<Utc>>) {
        *self.clock.write().expect("lock poisoned") = at;
    }

    /// Number of records in the shared store.
    pub fn shared_len(&self) -> usize {
        self.shared.read().expect("lock poisoned").len()
    }

    /// Number of records in one partition.
    pub fn partition_len(&self, partition: &str) -> usize {
        self.partitions
            .read()
            .expect("lock poisoned")
            .get(partition)
            .map(|table| table.len())
            .unwrap_or(0)
    }

    /// Names of every partition holding at least one record.
    pub fn partition_names(&self) -> Vec<String> {
        self.partitions
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Load a snapshot written by [`InMemoryLedger::save`].
    pub fn load(path: &Path) -> LedgerResult<Self> {
        let raw = fs::read(path)?;
        let snapshot: Snapshot = serde_json::from_slice(&raw)
            .map_err(|e| LedgerError::Serialization(format!("{}: {e}", path.display())))?;
        let mut partitions = BTreeMap::new();
        for (name, values) in snapshot.partitions {
            partitions.insert(name, from_values(values)?);
        }
        let ledger = Self {
            shared: RwLock::new(from_values(snapshot.shared)?),
            partitions: RwLock::new(partitions),
            clock: RwLock::new(None),
        };
        debug!(
            path = %path.display(),
            shared = ledger.shared_len(),
            partitions = ledger.partition_names().len(),
            "loaded ledger snapshot"
        );
        Ok(ledger)
    }

    /// Load `path` if it exists, otherwise start empty.
    pub fn open(path: &Path) -> LedgerResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Write the full ledger state to `path` as pretty JSON.
    pub fn save(&self, path: &Path) -> LedgerResult<()> {
        let snapshot = {
            let shared = self.shared.read().expect("lock poisoned");
            let partitions = self.partitions.read().expect("lock poisoned");
            let mut rendered = BTreeMap::new();
            for (name, table) in partitions.iter() {
                rendered.insert(name.clone(), to_values(table)?);
            }
            Snapshot {
                shared: to_values(&shared)?,
                partitions: rendered,
            }
        };
        let json = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, json)?;
        debug!(path = %path.display(), "saved ledger snapshot");
        Ok(())
    }
}

impl Ledger for InMemoryLedger {
    fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        check_name("key", key)?;
        let shared = self.shared.read().expect("lock poisoned");
        Ok(shared.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> LedgerResult<()> {
        check_name("key", key)?;
        let mut shared = self.shared.write().expect("lock poisoned");
        shared.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get_scoped(&self, partition: &str, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        check_name("partition", partition)?;
        check_name("key", key)?;
        let partitions = self.partitions.read().expect("lock poisoned");
        Ok(partitions
            .get(partition)
            .and_then(|table| table.get(key))
            .cloned())
    }

    fn put_scoped(&self, partition: &str, key: &str, value: &[u8]) -> LedgerResult<()> {
        check_name("partition", partition)?;
        check_name("key", key)?;
        let mut partitions = self.partitions.write().expect("lock poisoned");
        partitions
            .entry(partition.to_string())
            .or_default()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn query(&self, scope: &Scope, selector: &Selector) -> LedgerResult<Vec<QueryHit>> {
        match scope {
            Scope::Shared => {
                let shared = self.shared.read().expect("lock poisoned");
                Ok(select(&shared, selector))
            }
            Scope::Partition(partition) => {
                check_name("partition", partition)?;
                let partitions = self.partitions.read().expect("lock poisoned");
                Ok(partitions
                    .get(partition)
                    .map(|table| select(table, selector))
                    .unwrap_or_default())
            }
        }
    }

    fn tx_timestamp(&self) -> LedgerResult<DateTime<Utc>> {
        let pinned = *self.clock.read().expect("lock poisoned");
        Ok(pinned.unwrap_or_else(Utc::now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn shared_and_partition_are_separate() {
        let ledger = InMemoryLedger::new();
        ledger.put("AGENCY_A1", b"{}").unwrap();
        ledger.put_scoped("charges_A1_A2", "CHARGE_1", b"{}").unwrap();

        assert!(ledger.get("CHARGE_1").unwrap().is_none());
        assert!(ledger.get_scoped("charges_A1_A2", "AGENCY_A1").unwrap().is_none());
        assert!(ledger.get_scoped("charges_A1_A3", "CHARGE_1").unwrap().is_none());
        assert_eq!(ledger.get("AGENCY_A1").unwrap().as_deref(), Some(&b"{}"[..]));
        assert_eq!(ledger.partition_len("charges_A1_A2"), 1);
    }

    #[test]
    fn put_replaces() {
        let ledger = InMemoryLedger::new();
        ledger.put("K", b"1").unwrap();
        ledger.put("K", b"2").unwrap();
        assert_eq!(ledger.get("K").unwrap(), Some(b"2".to_vec()));
        assert_eq!(ledger.shared_len(), 1);
    }

    #[test]
    fn empty_names_rejected() {
        let ledger = InMemoryLedger::new();
        assert!(matches!(
            ledger.put("", b"x"),
            Err(LedgerError::EmptyName { what: "key" })
        ));
        assert!(matches!(
            ledger.get_scoped("", "K"),
            Err(LedgerError::EmptyName { what: "partition" })
        ));
    }

    #[test]
    fn scope_helpers_route() {
        let ledger = InMemoryLedger::new();
        let partition = Scope::Partition("settlements_A1_A2".into());
        ledger.write(&partition, "SETTLE_S1", b"{}").unwrap();
        assert!(ledger.exists(&partition, "SETTLE_S1").unwrap());
        assert!(!ledger.exists(&Scope::Shared, "SETTLE_S1").unwrap());
    }

    #[test]
    fn query_filters_in_key_order() {
        let ledger = InMemoryLedger::new();
        let p = "charges_A1_A2";
        ledger
            .put_scoped(p, "CHARGE_B", &record(json!({"docType": "charge", "status": "posted"})))
            .unwrap();
        ledger
            .put_scoped(p, "CHARGE_A", &record(json!({"docType": "charge", "status": "posted"})))
            .unwrap();
        ledger
            .put_scoped(p, "CHARGE_C", &record(json!({"docType": "charge", "status": "pending"})))
            .unwrap();
        ledger
            .put_scoped(p, "RECON_A", &record(json!({"docType": "reconciliation"})))
            .unwrap();

        let selector = Selector::new().with("docType", "charge").with("status", "posted");
        let hits = ledger.query(&Scope::Partition(p.into()), &selector).unwrap();
        let keys: Vec<_> = hits.iter().map(|h| h.key.as_str()).collect();
        assert_eq!(keys, ["CHARGE_A", "CHARGE_B"]);

        let limited = ledger
            .query(&Scope::Partition(p.into()), &selector.with_limit(1))
            .unwrap();
        assert_eq!(limited.len(), 1);

        let none = ledger
            .query(&Scope::Partition("charges_A1_A9".into()), &Selector::new())
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn pinned_clock() {
        let ledger = InMemoryLedger::new();
        let at = DateTime::from_timestamp(1_780_000_000, 0).unwrap();
        ledger.set_timestamp(Some(at));
        assert_eq!(ledger.tx_timestamp().unwrap(), at);
        assert_eq!(ledger.tx_timestamp().unwrap(), at);
    }

    #[test]
    fn snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("ledger.json");

        let ledger = InMemoryLedger::new();
        ledger.put("AGENCY_A1", &record(json!({"docType": "agency"}))).unwrap();
        ledger
            .put_scoped("charges_A1_A2", "CHARGE_1", &record(json!({"amount": "4.75"})))
            .unwrap();
        ledger.save(&path).unwrap();

        let restored = InMemoryLedger::open(&path).unwrap();
        assert_eq!(restored.shared_len(), 1);
        assert_eq!(restored.partition_names(), vec!["charges_A1_A2".to_string()]);
        let charge = restored.get_scoped("charges_A1_A2", "CHARGE_1").unwrap().unwrap();
        let value: Value = serde_json::from_slice(&charge).unwrap();
        assert_eq!(value["amount"], "4.75");
    }

    #[test]
    fn open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = InMemoryLedger::open(&dir.path().join("absent.json")).unwrap();
        assert_eq!(ledger.shared_len(), 0);
    }

    #[test]
    fn non_json_record_cannot_be_saved() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = InMemoryLedger::new();
        ledger.put("RAW", b"\xff").unwrap();
        assert!(matches!(
            ledger.save(&dir.path().join("x.json")),
            Err(LedgerError::Serialization(_))
        ));
    }

    #[test]
    fn corrupt_snapshot_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, b"not json").unwrap();
        assert!(matches!(
            InMemoryLedger::load(&path),
            Err(LedgerError::Serialization(_))
        ));
    }
}
