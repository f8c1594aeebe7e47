//! The [`Ledger`] port the operation layer reads and writes through.

use chrono::{DateTime, Utc};

use crate::error::LedgerResult;
use crate::selector::{Scope, Selector};

/// A record returned by a query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryHit {
    pub key: String,
    pub value: Vec<u8>,
}

/// Transactional key-value store with a shared area, named partitions and
/// a secondary-index query facility.
///
/// The ledger treats values as opaque bytes except when evaluating a
/// [`Selector`], which inspects them as JSON. Implementations provide
/// per-key atomicity; callers do one read-then-write per operation and
/// never lock.
pub trait Ledger: Send + Sync {
    /// Read a key from the shared store. `Ok(None)` if absent.
    fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>>;

    /// Create or replace a key in the shared store.
    fn put(&self, key: &str, value: &[u8]) -> LedgerResult<()>;

    /// Read a key from a partition. `Ok(None)` if absent.
    fn get_scoped(&self, partition: &str, key: &str) -> LedgerResult<Option<Vec<u8>>>;

    /// Create or replace a key in a partition.
    fn put_scoped(&self, partition: &str, key: &str, value: &[u8]) -> LedgerResult<()>;

    /// All records in `scope` matching `selector`, in key order.
    fn query(&self, scope: &Scope, selector: &Selector) -> LedgerResult<Vec<QueryHit>>;

    /// Timestamp of the current transaction, identical for every call
    /// within it.
    fn tx_timestamp(&self) -> LedgerResult<DateTime<Utc>>;

    /// Read from whichever store `scope` names.
    fn read(&self, scope: &Scope, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        match scope {
            Scope::Shared => self.get(key),
            Scope::Partition(partition) => self.get_scoped(partition, key),
        }
    }

    /// Write to whichever store `scope` names.
    fn write(&self, scope: &Scope, key: &str, value: &[u8]) -> LedgerResult<()> {
        match scope {
            Scope::Shared => self.put(key, value),
            Scope::Partition(partition) => self.put_scoped(partition, key, value),
        }
    }

    fn exists(&self, scope: &Scope, key: &str) -> LedgerResult<bool> {
        Ok(self.read(scope, key)?.is_some())
    }
}
