//! Paged list responses

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::warn;

use crate::domain::describe::Tabular;
use crate::domain::entities::Links;

/// A list response: items keyed by resource label under `_embedded`, plus
/// the server-side total when the endpoint reports one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Collection<T> {
    #[serde(rename = "_links", default)]
    pub links: Links,
    #[serde(rename = "_embedded", default = "BTreeMap::new")]
    pub embedded: BTreeMap<String, Vec<T>>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            links: Links::default(),
            embedded: BTreeMap::new(),
            total: None,
        }
    }
}

impl<T: Tabular> Collection<T> {
    /// Build a collection holding `items` under the kind's label.
    pub fn of(items: Vec<T>, total: Option<u64>) -> Self {
        let mut embedded = BTreeMap::new();
        embedded.insert(T::COLLECTION.to_string(), items);
        Self {
            links: Links::default(),
            embedded,
            total,
        }
    }

    /// Items stored under this kind's label. An absent label yields an empty slice.
    pub fn items(&self) -> &[T] {
        match self.embedded.get(T::COLLECTION) {
            Some(items) => items,
            None => {
                warn!(
                    "list response has no `{}` entry (labels present: {:?})",
                    T::COLLECTION,
                    self.embedded.keys().collect::<Vec<_>>()
                );
                &[]
            }
        }
    }

    /// Server total, falling back to the number of returned items.
    pub fn total(&self) -> u64 {
        self.total
            .unwrap_or_else(|| self.embedded.get(T::COLLECTION).map_or(0, Vec::len) as u64)
    }
}
