//! Vocabulary schema definitions
//!
//! A [`RecordSchema`] describes one record kind: its type name and the
//! fixed set of properties it declares. Each [`PropertySpec`] carries the
//! decode-relevant facts for one property: cardinality, the ordered list
//! of capabilities a nested typed value may resolve under, the ordered
//! list of literal kinds to try, and whether a `<name>Map` language-map
//! sibling is accepted.
//!
//! Declaration order is semantic: capabilities and literal kinds are
//! tried in exactly the order they were declared.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named role a record can fulfill where referenced
/// (e.g. "Object", "Link")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Capability(String);

impl Capability {
    pub fn new(name: impl Into<String>) -> Self {
        Capability(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Capability {
    fn from(s: &str) -> Self {
        Capability(s.to_string())
    }
}

impl From<String> for Capability {
    fn from(s: String) -> Self {
        Capability(s)
    }
}

/// The closed set of literal scalar kinds a property may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralKind {
    /// Plain string
    String,
    /// Language-taggable string (the tags live in the `<name>Map` sibling)
    LangString,
    /// RFC 3339 date-time
    DateTime,
    /// Duration in `PnDTnHnMnS` wire syntax
    Duration,
    /// IEEE 754 floating point
    Float,
    /// Media-type string (e.g. `text/html; charset=utf-8`)
    MediaType,
    /// Absolute IRI used as a value in its own right
    Iri,
}

/// Whether a property holds at most one value or an ordered sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinality {
    /// At most one value; a new decode replaces the previous value
    Functional,
    /// Ordered sequence of values; insertion order is significant
    NonFunctional,
}

/// Schema entry for a single property of a record kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySpec {
    name: String,
    cardinality: Cardinality,
    capabilities: Vec<Capability>,
    literals: Vec<LiteralKind>,
    language_map: bool,
}

impl PropertySpec {
    /// Create a functional (single-valued) property
    pub fn functional(name: impl Into<String>) -> Self {
        PropertySpec {
            name: name.into(),
            cardinality: Cardinality::Functional,
            capabilities: Vec::new(),
            literals: Vec::new(),
            language_map: false,
        }
    }

    /// Create a non-functional (multi-valued) property
    pub fn non_functional(name: impl Into<String>) -> Self {
        PropertySpec {
            name: name.into(),
            cardinality: Cardinality::NonFunctional,
            capabilities: Vec::new(),
            literals: Vec::new(),
            language_map: false,
        }
    }

    /// Declare an eligible capability for nested typed values.
    ///
    /// Capabilities are tried in declaration order.
    pub fn with_capability(mut self, capability: impl Into<Capability>) -> Self {
        self.capabilities.push(capability.into());
        self
    }

    /// Declare a literal kind candidate.
    ///
    /// Literal kinds are tried in declaration order.
    pub fn with_literal(mut self, kind: LiteralKind) -> Self {
        self.literals.push(kind);
        self
    }

    /// Accept a `<name>Map` language-map sibling for this property
    pub fn with_language_map(mut self) -> Self {
        self.language_map = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn is_functional(&self) -> bool {
        self.cardinality == Cardinality::Functional
    }

    /// Eligible capabilities, in declaration order
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// Literal kind candidates, in declaration order
    pub fn literals(&self) -> &[LiteralKind] {
        &self.literals
    }

    /// Whether this property accepts a `<name>Map` sibling
    pub fn has_language_map(&self) -> bool {
        self.language_map
    }
}

/// Schema for one record kind: type name plus the declared properties,
/// in the order they are emitted on encode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSchema {
    type_name: String,
    properties: Vec<PropertySpec>,
}

impl RecordSchema {
    pub fn new(type_name: impl Into<String>) -> Self {
        RecordSchema {
            type_name: type_name.into(),
            properties: Vec::new(),
        }
    }

    /// Declare a property. Declaration order is the encode order.
    pub fn with_property(mut self, spec: PropertySpec) -> Self {
        self.properties.push(spec);
        self
    }

    /// The record kind's own type name
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Declared properties in declaration (= encode) order
    pub fn properties(&self) -> &[PropertySpec] {
        &self.properties
    }

    /// Look up a declared property by name
    pub fn property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// If `key` is the `<name>Map` sibling of a declared language-capable
    /// property, return that property's spec
    pub fn language_map_base(&self, key: &str) -> Option<&PropertySpec> {
        let base = key.strip_suffix(crate::codec::LANGUAGE_MAP_SUFFIX)?;
        self.properties
            .iter()
            .find(|p| p.name == base && p.language_map)
    }
}
