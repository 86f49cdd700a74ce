//! Record orchestration
//!
//! A [`Record`] owns one container per declared property, the language
//! maps, the discriminator token list and the extension bag. Decode walks
//! the wire object's keys and dispatches each one; encode walks the
//! declared properties in schema order and merges the extension bag back
//! in, guaranteeing the record's own type token is present.

use super::{
    type_tokens, value_kind, DecodeError, DecodeMode, DecodeResult, LanguageMap,
    PropertyContainer, CONTEXT_KEY, LANGUAGE_MAP_SUFFIX, TYPE_KEY,
};
use crate::registry::Registry;
use crate::schema::RecordSchema;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// One typed record: schema-declared slots plus forward-compatible
/// extension data.
///
/// A record exclusively owns its containers, language maps and extension
/// bag; decode either fully populates a record or fails with the first
/// structural error.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Arc<RecordSchema>,
    /// Discriminator tokens in wire order
    discriminator: Vec<String>,
    /// One container per declared property, in schema order
    containers: IndexMap<String, PropertyContainer>,
    /// Language maps keyed by the base property name
    language_maps: HashMap<String, LanguageMap>,
    /// Unrecognized wire keys, preserved verbatim in arrival order
    extensions: IndexMap<String, Value>,
}

impl Record {
    /// Create an empty record for a schema
    pub fn new(schema: Arc<RecordSchema>) -> Self {
        let containers = schema
            .properties()
            .iter()
            .map(|spec| (spec.name().to_string(), PropertyContainer::for_spec(spec)))
            .collect();
        Record {
            schema,
            discriminator: Vec::new(),
            containers,
            language_maps: HashMap::new(),
            extensions: IndexMap::new(),
        }
    }

    /// Decode a wire value into a record of the given schema
    pub fn decode(
        schema: Arc<RecordSchema>,
        raw: &Value,
        registry: &Registry,
        mode: DecodeMode,
    ) -> DecodeResult<Record> {
        let map = raw
            .as_object()
            .ok_or_else(|| DecodeError::NotAnObject(value_kind(raw)))?;
        let mut record = Record::new(schema);
        record.decode_object(map, registry, mode)?;
        Ok(record)
    }

    /// Decode a JSON string into a record of the given schema
    pub fn from_json_str(
        schema: Arc<RecordSchema>,
        input: &str,
        registry: &Registry,
        mode: DecodeMode,
    ) -> DecodeResult<Record> {
        let raw: Value = serde_json::from_str(input)?;
        Record::decode(schema, &raw, registry, mode)
    }

    /// Walk a wire object's keys and dispatch each one
    pub(crate) fn decode_object(
        &mut self,
        map: &Map<String, Value>,
        registry: &Registry,
        mode: DecodeMode,
    ) -> DecodeResult<()> {
        let schema = Arc::clone(&self.schema);
        debug!("Decoding record of type {}", schema.type_name());

        for (key, value) in map {
            if key == TYPE_KEY {
                self.discriminator = type_tokens(value);
                continue;
            }
            if key == CONTEXT_KEY {
                // Accepted on decode, never re-emitted.
                continue;
            }
            if let Some(spec) = schema.property(key) {
                if let Some(container) = self.containers.get_mut(key) {
                    container.decode(spec, value, registry, mode)?;
                }
                continue;
            }
            if let Some(spec) = schema.language_map_base(key) {
                if let Some(lang_map) = LanguageMap::decode(value) {
                    self.language_maps.insert(spec.name().to_string(), lang_map);
                }
                continue;
            }
            debug!("Preserving unrecognized key '{}'", key);
            self.extensions.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    /// Encode this record back to a wire object.
    ///
    /// Extension entries are emitted first, then the discriminator
    /// (with the record's own type token appended if missing), then every
    /// non-absent declared property in schema order. Encoding is
    /// idempotent: repeated calls never duplicate the self-type token.
    pub fn encode(&self) -> Value {
        let mut out = Map::new();

        for (key, value) in &self.extensions {
            out.insert(key.clone(), value.clone());
        }

        let own = self.schema.type_name();
        let mut tokens = self.discriminator.clone();
        if !tokens.iter().any(|t| t == own) {
            tokens.push(own.to_string());
        }
        let type_value = if tokens.len() == 1 {
            Value::String(tokens.remove(0))
        } else {
            Value::Array(tokens.into_iter().map(Value::String).collect())
        };
        out.insert(TYPE_KEY.to_string(), type_value);

        for spec in self.schema.properties() {
            if let Some(encoded) = self.containers.get(spec.name()).and_then(PropertyContainer::encode) {
                out.insert(spec.name().to_string(), encoded);
            }
            if spec.has_language_map() {
                if let Some(lang_map) = self.language_maps.get(spec.name()) {
                    out.insert(
                        format!("{}{}", spec.name(), LANGUAGE_MAP_SUFFIX),
                        lang_map.encode(),
                    );
                }
            }
        }

        Value::Object(out)
    }

    /// Encode to a JSON string
    pub fn to_json_string(&self) -> String {
        self.encode().to_string()
    }

    /// The schema this record was built from
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// The record kind's own declared type name
    pub fn type_name(&self) -> &str {
        self.schema.type_name()
    }

    /// Discriminator tokens as decoded (the own type token is only
    /// guaranteed present in encoded output)
    pub fn discriminator(&self) -> &[String] {
        &self.discriminator
    }

    /// Add a discriminator token if not already present
    pub fn add_type(&mut self, token: impl Into<String>) {
        let token = token.into();
        if !self.discriminator.contains(&token) {
            self.discriminator.push(token);
        }
    }

    /// The container for a declared property
    pub fn property(&self, name: &str) -> Option<&PropertyContainer> {
        self.containers.get(name)
    }

    /// Mutable container for a declared property
    pub fn property_mut(&mut self, name: &str) -> Option<&mut PropertyContainer> {
        self.containers.get_mut(name)
    }

    /// The language map decoded for a property, if any
    pub fn language_map(&self, name: &str) -> Option<&LanguageMap> {
        self.language_maps.get(name)
    }

    /// Mutable language map for a property, if one is present
    pub fn language_map_mut(&mut self, name: &str) -> Option<&mut LanguageMap> {
        self.language_maps.get_mut(name)
    }

    /// Attach a language map to a declared language-capable property.
    ///
    /// Returns `false` (and stores nothing) when the property is not
    /// declared language-capable.
    pub fn set_language_map(&mut self, name: &str, map: LanguageMap) -> bool {
        let declared = self
            .schema
            .property(name)
            .is_some_and(|spec| spec.has_language_map());
        if declared {
            self.language_maps.insert(name.to_string(), map);
        }
        declared
    }

    /// All preserved unrecognized keys, in arrival order
    pub fn extensions(&self) -> &IndexMap<String, Value> {
        &self.extensions
    }

    /// One preserved unrecognized value
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }

    /// Store a raw extension value under an unrecognized key
    pub fn set_extension(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.extensions.insert(key.into(), value)
    }

    /// Remove a preserved extension entry
    pub fn remove_extension(&mut self, key: &str) -> Option<Value> {
        self.extensions.shift_remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{LiteralKind, PropertySpec};
    use serde_json::json;

    fn note_schema() -> Arc<RecordSchema> {
        Arc::new(
            RecordSchema::new("Note")
                .with_property(
                    PropertySpec::non_functional("name")
                        .with_literal(LiteralKind::LangString)
                        .with_language_map(),
                )
                .with_property(
                    PropertySpec::functional("published").with_literal(LiteralKind::DateTime),
                ),
        )
    }

    #[test]
    fn test_decode_rejects_non_object() {
        let err = Record::decode(
            note_schema(),
            &json!(["not", "an", "object"]),
            &Registry::new(),
            DecodeMode::Lenient,
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject("an array")));
    }

    #[test]
    fn test_context_key_dropped() {
        let raw = json!({
            "@context": "https://www.w3.org/ns/activitystreams",
            "type": "Note",
            "name": "hi"
        });
        let record =
            Record::decode(note_schema(), &raw, &Registry::new(), DecodeMode::Lenient).unwrap();
        let encoded = record.encode();
        assert_eq!(encoded.get("@context"), None);
        assert_eq!(encoded.get("name"), Some(&json!("hi")));
    }

    #[test]
    fn test_extension_preserved() {
        let raw = json!({"type": "Note", "customField": 42});
        let record =
            Record::decode(note_schema(), &raw, &Registry::new(), DecodeMode::Lenient).unwrap();
        assert_eq!(record.extension("customField"), Some(&json!(42)));
        assert_eq!(record.encode().get("customField"), Some(&json!(42)));
    }

    #[test]
    fn test_self_type_token_appended_once() {
        let record = Record::new(note_schema());
        let encoded = record.encode();
        // No tokens decoded: exactly one token, the record's own type.
        assert_eq!(encoded.get("type"), Some(&json!("Note")));

        // Re-decoding the encoded form and encoding again stays stable.
        let again = Record::decode(
            note_schema(),
            &encoded,
            &Registry::new(),
            DecodeMode::Lenient,
        )
        .unwrap();
        assert_eq!(again.encode().get("type"), Some(&json!("Note")));
    }

    #[test]
    fn test_foreign_type_tokens_kept() {
        let raw = json!({"type": ["Document", "Note"], "name": "hi"});
        let record =
            Record::decode(note_schema(), &raw, &Registry::new(), DecodeMode::Lenient).unwrap();
        assert_eq!(record.discriminator(), ["Document", "Note"]);
        assert_eq!(record.encode().get("type"), Some(&json!(["Document", "Note"])));
    }

    #[test]
    fn test_language_map_dispatch() {
        let raw = json!({"type": "Note", "nameMap": {"en": "Hello", "fr": 7}});
        let record =
            Record::decode(note_schema(), &raw, &Registry::new(), DecodeMode::Lenient).unwrap();
        let map = record.language_map("name").unwrap();
        assert_eq!(map.get("en"), Some("Hello"));
        assert_eq!(map.get("fr"), None);
    }

    #[test]
    fn test_undeclared_map_key_goes_to_extensions() {
        // "publishedMap" is not language-capable; the key is unrecognized.
        let raw = json!({"type": "Note", "publishedMap": {"en": "x"}});
        let record =
            Record::decode(note_schema(), &raw, &Registry::new(), DecodeMode::Lenient).unwrap();
        assert!(record.language_map("published").is_none());
        assert_eq!(record.extension("publishedMap"), Some(&json!({"en": "x"})));
    }

    #[test]
    fn test_set_language_map_requires_declaration() {
        let mut record = Record::new(note_schema());
        let mut map = LanguageMap::new();
        map.set("en", "Hello");
        assert!(record.set_language_map("name", map.clone()));
        assert!(!record.set_language_map("published", map));
    }

    #[test]
    fn test_json_string_entry_points() {
        let record = Record::from_json_str(
            note_schema(),
            r#"{"type":"Note","name":"hi"}"#,
            &Registry::new(),
            DecodeMode::Lenient,
        )
        .unwrap();
        let text = record.to_json_string();
        let reparsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed.get("name"), Some(&json!("hi")));

        assert!(matches!(
            Record::from_json_str(note_schema(), "{nope", &Registry::new(), DecodeMode::Lenient),
            Err(DecodeError::Json(_))
        ));
    }
}
