//! Query scope and equality selectors.
//!
//! A [`Selector`] is a set of `attribute == value` constraints evaluated
//! against the top-level fields of a stored JSON record, the same shape as a
//! rich-query selector such as `{"docType": "charge", "status": "posted"}`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which store a read, write or query targets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// The store visible to every participant.
    Shared,
    /// A named partition visible only to its parties.
    Partition(String),
}

impl Scope {
    /// `Partition` for `Some(name)`, `Shared` otherwise.
    pub fn from_partition(partition: Option<String>) -> Self {
        match partition {
            Some(name) => Self::Partition(name),
            None => Self::Shared,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared => f.write_str("shared"),
            Self::Partition(name) => write!(f, "partition {name}"),
        }
    }
}

/// Equality constraints on top-level record attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    /// Attribute name to required value.
    pub fields: BTreeMap<String, String>,
    /// Maximum number of matches to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an `attribute == value` constraint.
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(attribute.into(), value.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns `true` if every constraint holds on `record`.
    ///
    /// Strings compare exactly; numbers and booleans compare by their JSON
    /// text. Missing attributes and non-object records never match a
    /// non-empty selector.
    pub fn matches(&self, record: &Value) -> bool {
        self.fields.iter().all(|(attribute, expected)| {
            match record.get(attribute) {
                Some(Value::String(actual)) => actual == expected,
                Some(actual @ (Value::Number(_) | Value::Bool(_))) => {
                    actual.to_string() == *expected
                }
                _ => false,
            }
        })
    }

    /// Decode `bytes` as JSON and test it; undecodable bytes never match.
    pub fn matches_bytes(&self, bytes: &[u8]) -> bool {
        serde_json::from_slice::<Value>(bytes)
            .map(|record| self.matches(&record))
            .unwrap_or(false)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(&self.fields).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_constraints_must_hold() {
        let record = json!({"docType": "charge", "status": "posted", "vehicleClass": 2});
        let selector = Selector::new().with("docType", "charge").with("status", "posted");
        assert!(selector.matches(&record));
        assert!(!selector.clone().with("status", "pending").matches(&record));
        assert!(Selector::new().with("vehicleClass", "2").matches(&record));
    }

    #[test]
    fn missing_attribute_does_not_match() {
        let record = json!({"docType": "tag"});
        assert!(!Selector::new().with("tagStatus", "valid").matches(&record));
        assert!(Selector::new().matches(&record));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let record = json!({"postingDisposition": "P"});
        assert!(!Selector::new().with("postingDisposition", "p").matches(&record));
    }

    #[test]
    fn garbage_bytes_never_match() {
        assert!(!Selector::new().with("docType", "charge").matches_bytes(b"\x00\x01"));
    }

    #[test]
    fn display_renders_constraints() {
        let selector = Selector::new().with("docType", "agency").with("status", "active");
        assert_eq!(
            selector.to_string(),
            r#"{"docType":"agency","status":"active"}"#
        );
        assert_eq!(Scope::Partition("charges_A1_A2".into()).to_string(), "partition charges_A1_A2");
    }
}
