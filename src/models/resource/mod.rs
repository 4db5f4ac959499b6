// Resource module
// Resources (rooms, people, ...) that own a column in resource views

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a resource as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
}

impl Resource {
    pub fn new(id: impl Into<ResourceId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// The active resources of a view, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceSet {
    resources: Vec<Resource>,
}

impl ResourceSet {
    /// Build a set from resources in display order. Later duplicates of an id
    /// are dropped.
    pub fn new(resources: impl IntoIterator<Item = Resource>) -> Self {
        let mut set = Self::default();
        for resource in resources {
            if set.contains(&resource.id) {
                log::warn!("Duplicate resource id '{}' ignored", resource.id);
                continue;
            }
            set.resources.push(resource);
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    pub fn contains(&self, id: &ResourceId) -> bool {
        self.resources.iter().any(|r| &r.id == id)
    }

    pub fn get(&self, id: &ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| &r.id == id)
    }

    /// Column position of `id`
    pub fn position(&self, id: &ResourceId) -> Option<usize> {
        self.resources.iter().position(|r| &r.id == id)
    }
}

impl FromIterator<Resource> for ResourceSet {
    fn from_iter<T: IntoIterator<Item = Resource>>(iter: T) -> Self {
        Self::new(iter)
    }
}
