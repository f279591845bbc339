//! Categories - read-only groupings for questions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Category identifier as stored
pub type CategoryId = i32;

/// Category record, serialized as `{id, type}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Category {
    pub fn new(id: CategoryId, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }
}

/// Mapping from category id to its display type.
///
/// Serializes as a JSON object keyed by the stringified id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMap(BTreeMap<CategoryId, String>);

impl CategoryMap {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: CategoryId) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }
}

impl FromIterator<Category> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        Self(iter.into_iter().map(|c| (c.id, c.kind)).collect())
    }
}
