//! Language-tag map codec
//!
//! A `<property>Map` sibling key carries language-tagged alternatives for
//! a natural-language property. The map lives independently of the
//! property's own container; no cross-consistency between the two is
//! enforced.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Mapping from language tag to string value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LanguageMap {
    entries: HashMap<String, String>,
}

impl LanguageMap {
    pub fn new() -> Self {
        LanguageMap {
            entries: HashMap::new(),
        }
    }

    /// Decode a wire value into a language map.
    ///
    /// Only JSON objects are accepted; entries whose value is not a
    /// string are silently dropped. Non-object input yields `None`
    /// (the map stays absent).
    pub fn decode(raw: &Value) -> Option<LanguageMap> {
        let map = raw.as_object()?;
        let entries = map
            .iter()
            .filter_map(|(tag, value)| {
                value.as_str().map(|s| (tag.clone(), s.to_string()))
            })
            .collect();
        Some(LanguageMap { entries })
    }

    /// Encode back to the wire object.
    ///
    /// An empty map encodes to `{}`, which is a distinct wire state from
    /// an absent map.
    pub fn encode(&self) -> Value {
        let mut out = Map::new();
        for (tag, value) in &self.entries {
            out.insert(tag.clone(), Value::String(value.clone()));
        }
        Value::Object(out)
    }

    /// Get the value for a language tag
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.entries.get(tag).map(String::as_str)
    }

    /// Set the value for a language tag, returning the previous value
    pub fn set(&mut self, tag: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(tag.into(), value.into())
    }

    /// Remove a language tag, returning its value
    pub fn remove(&mut self, tag: &str) -> Option<String> {
        self.entries.remove(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (tag, value) pairs; order is not significant
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
