//! Property containers
//!
//! A non-functional property holds an ordered sequence of values; a
//! functional property holds at most one. The container owns the
//! bare/list wire rules: on decode both a bare value and a list are
//! accepted, on encode a one-element sequence collapses back to the bare
//! form and an empty container encodes to nothing at all.
//!
//! Index-based reads follow a probe-then-read contract: check `len()` or
//! use `get()` before committing to an index. `remove_at` panics out of
//! range, like `Vec::remove`.

use super::{DecodeMode, DecodeResult, PropertyValue};
use crate::registry::Registry;
use crate::schema::PropertySpec;
use serde_json::Value;

/// Container for all occurrences of one property on one record
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyContainer {
    /// At most one value; a new decode replaces the held value
    Functional(Option<PropertyValue>),
    /// Ordered sequence of values; a decode appends in wire order
    NonFunctional(Vec<PropertyValue>),
}

impl PropertyContainer {
    /// Create the empty container matching a property's cardinality
    pub fn for_spec(spec: &PropertySpec) -> Self {
        if spec.is_functional() {
            PropertyContainer::Functional(None)
        } else {
            PropertyContainer::NonFunctional(Vec::new())
        }
    }

    /// Decode one wire value into this container.
    ///
    /// Non-functional: a list decodes element by element in order; any
    /// other shape decodes as a single element. The first failing element
    /// aborts with that element's error.
    /// Functional: decodes one value, replacing whatever was held.
    pub fn decode(
        &mut self,
        spec: &PropertySpec,
        raw: &Value,
        registry: &Registry,
        mode: DecodeMode,
    ) -> DecodeResult<()> {
        match self {
            PropertyContainer::Functional(slot) => {
                *slot = Some(PropertyValue::decode(spec, raw, registry, mode)?);
            }
            PropertyContainer::NonFunctional(seq) => match raw {
                Value::Array(items) => {
                    for item in items {
                        seq.push(PropertyValue::decode(spec, item, registry, mode)?);
                    }
                }
                other => {
                    seq.push(PropertyValue::decode(spec, other, registry, mode)?);
                }
            },
        }
        Ok(())
    }

    /// Encode this container, or `None` when the property is absent.
    ///
    /// A one-element sequence encodes bare, not as a one-element list.
    pub fn encode(&self) -> Option<Value> {
        match self {
            PropertyContainer::Functional(slot) => slot.as_ref().map(PropertyValue::encode),
            PropertyContainer::NonFunctional(seq) => match seq.len() {
                0 => None,
                1 => Some(seq[0].encode()),
                _ => Some(Value::Array(seq.iter().map(PropertyValue::encode).collect())),
            },
        }
    }

    pub fn is_functional(&self) -> bool {
        matches!(self, PropertyContainer::Functional(_))
    }

    /// Number of held values
    pub fn len(&self) -> usize {
        match self {
            PropertyContainer::Functional(slot) => usize::from(slot.is_some()),
            PropertyContainer::NonFunctional(seq) => seq.len(),
        }
    }

    /// An empty container and an absent property are the same state
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the value at `index`, if present
    pub fn get(&self, index: usize) -> Option<&PropertyValue> {
        match self {
            PropertyContainer::Functional(slot) => {
                if index == 0 {
                    slot.as_ref()
                } else {
                    None
                }
            }
            PropertyContainer::NonFunctional(seq) => seq.get(index),
        }
    }

    /// Get the single held value: the functional slot, or the first
    /// element of a sequence
    pub fn value(&self) -> Option<&PropertyValue> {
        self.get(0)
    }

    /// Iterate over the held values in order
    pub fn values(&self) -> impl Iterator<Item = &PropertyValue> {
        match self {
            PropertyContainer::Functional(slot) => slot.as_slice().iter(),
            PropertyContainer::NonFunctional(seq) => seq.iter(),
        }
    }

    /// Append a value. On a functional container this replaces the slot.
    pub fn append(&mut self, value: PropertyValue) {
        match self {
            PropertyContainer::Functional(slot) => *slot = Some(value),
            PropertyContainer::NonFunctional(seq) => seq.push(value),
        }
    }

    /// Prepend a value. On a functional container this replaces the slot.
    pub fn prepend(&mut self, value: PropertyValue) {
        match self {
            PropertyContainer::Functional(slot) => *slot = Some(value),
            PropertyContainer::NonFunctional(seq) => seq.insert(0, value),
        }
    }

    /// Replace the functional slot, or the whole sequence, with one value
    pub fn set(&mut self, value: PropertyValue) {
        match self {
            PropertyContainer::Functional(slot) => *slot = Some(value),
            PropertyContainer::NonFunctional(seq) => {
                seq.clear();
                seq.push(value);
            }
        }
    }

    /// Remove and return the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of range; probe with [`len`](Self::len)
    /// or [`get`](Self::get) first.
    pub fn remove_at(&mut self, index: usize) -> PropertyValue {
        match self {
            PropertyContainer::Functional(slot) => {
                if index != 0 || slot.is_none() {
                    panic!("remove_at index {index} out of range for functional property");
                }
                // checked above
                slot.take().unwrap()
            }
            PropertyContainer::NonFunctional(seq) => seq.remove(index),
        }
    }

    /// Drop all held values
    pub fn clear(&mut self) {
        match self {
            PropertyContainer::Functional(slot) => *slot = None,
            PropertyContainer::NonFunctional(seq) => seq.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LiteralKind;
    use serde_json::json;

    fn name_spec() -> PropertySpec {
        PropertySpec::non_functional("name").with_literal(LiteralKind::String)
    }

    #[test]
    fn test_bare_and_list_decode_to_same_sequence() {
        let registry = Registry::new();
        let spec = name_spec();

        let mut bare = PropertyContainer::for_spec(&spec);
        bare.decode(&spec, &json!("hi"), &registry, DecodeMode::Lenient).unwrap();

        let mut listed = PropertyContainer::for_spec(&spec);
        listed.decode(&spec, &json!(["hi"]), &registry, DecodeMode::Lenient).unwrap();

        assert_eq!(bare, listed);
        assert_eq!(bare.len(), 1);
    }

    #[test]
    fn test_single_element_encodes_bare() {
        let registry = Registry::new();
        let spec = name_spec();
        let mut container = PropertyContainer::for_spec(&spec);
        container.decode(&spec, &json!(["hi"]), &registry, DecodeMode::Lenient).unwrap();
        assert_eq!(container.encode(), Some(json!("hi")));
    }

    #[test]
    fn test_multi_element_preserves_order() {
        let registry = Registry::new();
        let spec = name_spec();
        let mut container = PropertyContainer::for_spec(&spec);
        container
            .decode(&spec, &json!(["a", "b", "c"]), &registry, DecodeMode::Lenient)
            .unwrap();
        assert_eq!(container.encode(), Some(json!(["a", "b", "c"])));
    }

    #[test]
    fn test_empty_encodes_absent() {
        let spec = name_spec();
        assert_eq!(PropertyContainer::for_spec(&spec).encode(), None);
    }

    #[test]
    fn test_functional_decode_replaces() {
        let registry = Registry::new();
        let spec = PropertySpec::functional("published").with_literal(LiteralKind::String);
        let mut container = PropertyContainer::for_spec(&spec);
        container.decode(&spec, &json!("first"), &registry, DecodeMode::Lenient).unwrap();
        container.decode(&spec, &json!("second"), &registry, DecodeMode::Lenient).unwrap();
        assert_eq!(container.len(), 1);
        assert_eq!(container.encode(), Some(json!("second")));
    }

    #[test]
    fn test_mutators() {
        let spec = name_spec();
        let mut container = PropertyContainer::for_spec(&spec);
        container.append(PropertyValue::Unknown(json!("b")));
        container.prepend(PropertyValue::Unknown(json!("a")));
        container.append(PropertyValue::Unknown(json!("c")));
        assert_eq!(container.len(), 3);

        let removed = container.remove_at(1);
        assert_eq!(removed, PropertyValue::Unknown(json!("b")));
        assert_eq!(container.encode(), Some(json!(["a", "c"])));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_remove_at_out_of_range_panics() {
        let spec = PropertySpec::functional("one");
        let mut container = PropertyContainer::for_spec(&spec);
        container.remove_at(0);
    }
}
