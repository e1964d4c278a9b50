//! Model registry: named, reusable schemas looked up by reference
//!
//! Copyright (c) 2025 Exemplar Team
//! Licensed under the Apache-2.0 license

use crate::schema::node::SchemaNode;
use std::collections::BTreeMap;

/// Read-only lookup of models by simple name
pub trait SchemaRegistry {
    /// Find the model registered under `name`
    fn lookup(&self, name: &str) -> Option<&SchemaNode>;
}

/// In-memory registry keyed by model name
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, SchemaNode>,
}

impl ModelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model. The node takes the model name as its declared name
    /// when it has none. Returns the previous model with that name.
    pub fn insert(&mut self, name: impl Into<String>, mut schema: SchemaNode) -> Option<SchemaNode> {
        let name = name.into();
        if schema.name.is_none() {
            schema.name = Some(name.clone());
        }
        self.models.insert(name, schema)
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.models.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Model names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.models.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Forget every memoized example so the next run synthesizes afresh
    pub fn clear_example_caches(&mut self) {
        for node in self.models.values_mut() {
            node.clear_example_cache();
        }
    }
}

impl SchemaRegistry for ModelRegistry {
    fn lookup(&self, name: &str) -> Option<&SchemaNode> {
        self.get(name)
    }
}

impl<K: Into<String>> FromIterator<(K, SchemaNode)> for ModelRegistry {
    fn from_iter<T: IntoIterator<Item = (K, SchemaNode)>>(iter: T) -> Self {
        let mut registry = Self::new();
        for (name, schema) in iter {
            registry.insert(name, schema);
        }
        registry
    }
}
