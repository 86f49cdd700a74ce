//! Polyvoc — schema-bound polymorphic codec for extensible JSON vocabularies
//!
//! A vocabulary is a set of record kinds, each with optionally-present,
//! possibly multi-valued, possibly multi-typed properties. The codec's job
//! is shape dispatch: given an arbitrary wire value for a property, decide
//! whether it is a nested typed record, a reference by IRI, one of the
//! declared literal scalars, a language-tagged map, or opaque data — and
//! decode/encode it losslessly, round-tripping unrecognized data verbatim.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use polyvoc::{DecodeMode, LiteralKind, PropertySpec, Record, RecordSchema, Registry};
//! use serde_json::json;
//!
//! let note = Arc::new(
//!     RecordSchema::new("Note")
//!         .with_property(
//!             PropertySpec::non_functional("name")
//!                 .with_literal(LiteralKind::LangString)
//!                 .with_language_map(),
//!         )
//!         .with_property(
//!             PropertySpec::non_functional("attributedTo")
//!                 .with_capability("Object")
//!                 .with_capability("Link"),
//!         ),
//! );
//!
//! let mut registry = Registry::new();
//! registry.register_schema(Arc::clone(&note), ["Object"]);
//!
//! let wire = json!({
//!     "type": "Note",
//!     "name": "Hello",
//!     "attributedTo": "https://example.com/u1",
//!     "customField": 42
//! });
//! let record = Record::decode(note, &wire, &registry, DecodeMode::default()).unwrap();
//!
//! assert_eq!(record.property("attributedTo").unwrap().value().unwrap().as_reference(),
//!            Some("https://example.com/u1"));
//! assert_eq!(record.encode(), wire);
//! ```

pub mod codec;
pub mod literal;
pub mod registry;
pub mod schema;

pub use codec::{
    DecodeError, DecodeMode, DecodeResult, LanguageMap, PropertyContainer, PropertyValue, Record,
    CONTEXT_KEY, TYPE_KEY,
};
pub use literal::Literal;
pub use registry::{Factory, Registry};
pub use schema::{Capability, Cardinality, LiteralKind, PropertySpec, RecordSchema};
