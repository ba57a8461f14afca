//! Model metadata supplied alongside the source graph.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Human-readable property label → value, as read from the architecture model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelProperties(BTreeMap<String, String>);

impl ModelProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.0.insert(label.into(), value.into());
    }

    /// Value stored under exactly this label.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.0.get(label).map(String::as_str)
    }

    /// Value stored under exactly this label, unless blank.
    pub fn non_empty(&self, label: &str) -> Option<&str> {
        self.get(label).filter(|v| !v.trim().is_empty())
    }

    /// Entries whose label contains `fragment`, in label order.
    pub fn containing<'a>(&'a self, fragment: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.0
            .iter()
            .filter(move |(label, _)| label.contains(fragment))
            .map(|(label, value)| (label.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ModelProperties {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
