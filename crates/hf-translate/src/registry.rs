//! Append-only name tables.

use std::collections::BTreeMap;

use hf_core::Id;

/// Name → id table. Entries are never replaced: the first id registered
/// under a name wins.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    by_name: BTreeMap<String, Id>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Id> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Register `id` under `name` unless the name is taken; returns the id
    /// now registered under `name`.
    pub fn insert_if_absent(&mut self, name: impl Into<String>, id: Id) -> Id {
        *self.by_name.entry(name.into()).or_insert(id)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Id)> {
        self.by_name.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
