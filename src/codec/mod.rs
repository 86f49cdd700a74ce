//! Polymorphic wire codec
//!
//! Implements the decode/encode pipeline for one record:
//! - [`PropertyValue`]: tagged-union codec for one occurrence of one property
//! - [`PropertyContainer`]: functional / non-functional container rules
//! - [`LanguageMap`]: the `<property>Map` sibling codec
//! - [`Record`]: whole-object orchestration plus the extension bag

mod container;
mod langmap;
mod record;
mod value;

pub use container::PropertyContainer;
pub use langmap::LanguageMap;
pub use record::Record;
pub use value::PropertyValue;

use serde_json::Value;
use thiserror::Error;

/// Reserved wire key naming a record's declared kind(s)
pub const TYPE_KEY: &str = "type";

/// Reserved wire key accepted on decode and never re-emitted
pub const CONTEXT_KEY: &str = "@context";

/// Suffix of a language-map sibling key (`name` -> `nameMap`)
pub const LANGUAGE_MAP_SUFFIX: &str = "Map";

/// Decode errors
#[derive(Error, Debug)]
pub enum DecodeError {
    /// A nested object's discriminator named types that no declared
    /// capability resolves
    #[error("Unresolved type {tokens:?} for property '{property}'")]
    UnresolvedType {
        /// Declared property whose value failed to resolve
        property: String,
        /// Discriminator tokens found on the nested object
        tokens: Vec<String>,
    },

    /// A record was handed a wire value that is not a JSON object
    #[error("Expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// Strict mode only: every declared candidate rejected the value
    #[error("No declared shape matched the value of property '{property}'")]
    UnmatchedValue {
        /// Declared property whose value matched nothing
        property: String,
    },

    /// JSON syntax error (string-level entry points only)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DecodeResult<T> = Result<T, DecodeError>;

/// How a decode treats a value that matches no declared candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Unmatched values are preserved verbatim as unknown data
    #[default]
    Lenient,
    /// Unmatched values fail the decode with
    /// [`DecodeError::UnmatchedValue`]
    Strict,
}

/// Gather discriminator tokens from a `"type"` value: a single string or
/// an ordered list of strings. Non-string entries are ignored.
pub(crate) fn type_tokens(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Short name of a JSON value's shape, for error messages
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
