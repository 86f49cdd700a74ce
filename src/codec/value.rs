//! Tagged-union codec for a single property occurrence
//!
//! Decoding tries the declared shapes in fixed precedence: a nested typed
//! record (objects carrying a discriminator), the declared literal kinds
//! in order, an IRI reference, and finally verbatim unknown data.
//! Encoding is the structural inverse of whichever variant is held.

use super::{DecodeError, DecodeMode, DecodeResult, Record, TYPE_KEY};
use crate::literal::Literal;
use crate::registry::Registry;
use crate::schema::{Capability, PropertySpec};
use oxiri::Iri;
use serde_json::Value;
use tracing::trace;

/// One decoded occurrence of one property.
///
/// Exactly one variant is populated; mutual exclusion is the enum itself.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// A nested typed record, together with the capability it resolved under
    Typed {
        /// Capability the nested record was resolved as
        capability: Capability,
        /// The decoded nested record
        record: Box<Record>,
    },
    /// An opaque identifier standing in for a typed value not inlined
    Reference(String),
    /// A literal scalar of one declared kind
    Literal(Literal),
    /// Raw wire data that matched no declared shape, preserved verbatim
    Unknown(Value),
}

impl PropertyValue {
    /// Decode one wire value against a property's declared shapes.
    ///
    /// Precedence is fixed: discriminated objects resolve to [`Typed`]
    /// (or fail hard when the discriminator resolves nothing), undiscriminated
    /// objects are [`Unknown`], other values try the declared literal kinds in
    /// order, then IRI reference parsing, then [`Unknown`].
    ///
    /// [`Typed`]: PropertyValue::Typed
    /// [`Unknown`]: PropertyValue::Unknown
    pub fn decode(
        spec: &PropertySpec,
        raw: &Value,
        registry: &Registry,
        mode: DecodeMode,
    ) -> DecodeResult<PropertyValue> {
        if let Value::Object(map) = raw {
            let Some(type_value) = map.get(TYPE_KEY) else {
                // No discriminator: the object is opaque, even if it would
                // otherwise match a known shape.
                return Ok(PropertyValue::Unknown(raw.clone()));
            };
            let tokens = super::type_tokens(type_value);
            if tokens.is_empty() {
                // A discriminator with no string tokens names nothing.
                return Ok(PropertyValue::Unknown(raw.clone()));
            }
            for capability in spec.capabilities() {
                for token in &tokens {
                    let Some(factory) = registry.resolve(token, capability) else {
                        continue;
                    };
                    trace!("Resolved type {} as {} for '{}'", token, capability, spec.name());
                    let mut record = factory();
                    record.decode_object(map, registry, mode)?;
                    return Ok(PropertyValue::Typed {
                        capability: capability.clone(),
                        record: Box::new(record),
                    });
                }
            }
            return Err(DecodeError::UnresolvedType {
                property: spec.name().to_string(),
                tokens,
            });
        }

        for kind in spec.literals() {
            if let Some(literal) = Literal::parse(*kind, raw) {
                return Ok(PropertyValue::Literal(literal));
            }
        }

        if let Some(s) = raw.as_str() {
            if Iri::parse(s.to_string()).is_ok() {
                return Ok(PropertyValue::Reference(s.to_string()));
            }
        }

        match mode {
            DecodeMode::Lenient => Ok(PropertyValue::Unknown(raw.clone())),
            DecodeMode::Strict => Err(DecodeError::UnmatchedValue {
                property: spec.name().to_string(),
            }),
        }
    }

    /// Encode this value back to its wire form
    pub fn encode(&self) -> Value {
        match self {
            PropertyValue::Typed { record, .. } => record.encode(),
            PropertyValue::Reference(iri) => Value::String(iri.clone()),
            PropertyValue::Literal(literal) => literal.format(),
            PropertyValue::Unknown(raw) => raw.clone(),
        }
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, PropertyValue::Typed { .. })
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, PropertyValue::Reference(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, PropertyValue::Literal(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, PropertyValue::Unknown(_))
    }

    /// Get the nested record if this is a typed value
    pub fn as_typed(&self) -> Option<&Record> {
        match self {
            PropertyValue::Typed { record, .. } => Some(record),
            _ => None,
        }
    }

    /// Get the capability a typed value resolved under
    pub fn capability(&self) -> Option<&Capability> {
        match self {
            PropertyValue::Typed { capability, .. } => Some(capability),
            _ => None,
        }
    }

    /// Get the reference IRI if this is a reference
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            PropertyValue::Reference(iri) => Some(iri),
            _ => None,
        }
    }

    /// Get the literal if this is a literal scalar
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            PropertyValue::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// Get the raw wire data if nothing matched at decode time
    pub fn as_unknown(&self) -> Option<&Value> {
        match self {
            PropertyValue::Unknown(raw) => Some(raw),
            _ => None,
        }
    }
}
