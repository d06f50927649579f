//! Ordered request field map.

use autocc_core::config::Mode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field name to string value, in insertion order
///
/// Re-inserting an existing key replaces its value but keeps its position,
/// so merging layers never reorders the transmitted object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestPayload(IndexMap<String, String>);

impl RequestPayload {
    /// Create an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Caller fields for a hosted credit card check
    pub fn credit_card_check(mode: Mode) -> Self {
        Self::from_iter([
            ("mode", mode.as_str()),
            ("request", "creditcardcheck"),
            ("storecarddata", "yes"),
        ])
    }

    /// Insert or overwrite a field, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Overlay every field of `other`, later values winning
    pub fn merge(&mut self, other: &RequestPayload) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    /// Value of `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Values concatenated in ascending byte order of their keys
    ///
    /// This is the exact message the receiving API recomputes the hash over.
    pub fn canonical_string(&self) -> String {
        let mut fields: Vec<(&String, &String)> = self.0.iter().collect();
        fields.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        fields.into_iter().map(|(_, value)| value.as_str()).collect()
    }
}

impl<K, V> FromIterator<(K, V)> for RequestPayload
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Self::new();
        for (key, value) in iter {
            payload.insert(key, value);
        }
        payload
    }
}
