//! Type resolver registry
//!
//! Maps a (type name, capability) pair to a factory producing an empty
//! [`Record`] ready to decode. The registry is an explicit value injected
//! into every decode call — there is no global lookup table. A property
//! only resolves nested typed values through the capabilities it declares,
//! so the same type name may resolve under one capability and not another.

use crate::codec::Record;
use crate::schema::{Capability, RecordSchema};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Constructor for an empty record of a registered kind
pub type Factory = Box<dyn Fn() -> Record + Send + Sync>;

/// Discriminator-name → factory lookup, scoped per capability
#[derive(Default)]
pub struct Registry {
    factories: HashMap<String, HashMap<Capability, Factory>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            factories: HashMap::new(),
        }
    }

    /// Register a factory for a (type name, capability) pair.
    ///
    /// A later registration for the same pair replaces the earlier one.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        capability: impl Into<Capability>,
        factory: Factory,
    ) {
        self.factories
            .entry(type_name.into())
            .or_default()
            .insert(capability.into(), factory);
    }

    /// Register a schema under its own type name for each given capability
    pub fn register_schema<C>(&mut self, schema: Arc<RecordSchema>, capabilities: C)
    where
        C: IntoIterator,
        C::Item: Into<Capability>,
    {
        for capability in capabilities {
            let schema = Arc::clone(&schema);
            self.register(
                schema.type_name().to_string(),
                capability,
                Box::new(move || Record::new(Arc::clone(&schema))),
            );
        }
    }

    /// Resolve a (type name, capability) pair to its factory, if registered
    pub fn resolve(&self, type_name: &str, capability: &Capability) -> Option<&Factory> {
        self.factories.get(type_name)?.get(capability)
    }

    /// Number of registered (type name, capability) pairs
    pub fn len(&self) -> usize {
        self.factories.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self
            .factories
            .iter()
            .flat_map(|(name, caps)| {
                caps.keys().map(move |c| format!("{name}/{c}"))
            })
            .collect();
        keys.sort();
        f.debug_struct("Registry").field("factories", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PropertySpec;

    fn person_schema() -> Arc<RecordSchema> {
        Arc::new(
            RecordSchema::new("Person")
                .with_property(PropertySpec::non_functional("name")),
        )
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = Registry::new();
        registry.register_schema(person_schema(), ["Object"]);

        let cap = Capability::new("Object");
        let factory = registry.resolve("Person", &cap).unwrap();
        let record = factory();
        assert_eq!(record.type_name(), "Person");
    }

    #[test]
    fn test_capability_scoping() {
        let mut registry = Registry::new();
        registry.register_schema(person_schema(), ["Object"]);

        // Registered under "Object" only; "Link" must not resolve.
        assert!(registry.resolve("Person", &Capability::new("Link")).is_none());
        assert!(registry.resolve("Unknown", &Capability::new("Object")).is_none());
        assert_eq!(registry.len(), 1);
    }
}
