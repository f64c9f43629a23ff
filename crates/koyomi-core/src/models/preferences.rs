use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// IDs the user is watching, in the order they were added.
///
/// Persisted as a bare JSON array of integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WatchingSet {
    ids: Vec<u64>,
}

impl WatchingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// Add `id`. Returns false if it was already present.
    pub fn insert(&mut self, id: u64) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove `id`. Returns false if it was not present.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&x| x != id);
        self.ids.len() != before
    }

    /// Flip membership of `id`, returning the new membership.
    pub fn toggle(&mut self, id: u64) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<'de> Deserialize<'de> for WatchingSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<u64>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

impl FromIterator<u64> for WatchingSet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// User-supplied URLs keyed by the entry ID as a string.
///
/// Persisted as a JSON object. Values are stored literally, empty strings
/// included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomLinkMap {
    links: BTreeMap<String, String>,
}

impl CustomLinkMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: u64) -> Option<&str> {
        self.links.get(&id.to_string()).map(String::as_str)
    }

    /// Like [`get`](Self::get), but treats a blank value as no link.
    pub fn usable(&self, id: u64) -> Option<&str> {
        self.get(id).filter(|url| !url.trim().is_empty())
    }

    /// Store `url` for `id`, returning the previous value.
    pub fn set(&mut self, id: u64, url: impl Into<String>) -> Option<String> {
        self.links.insert(id.to_string(), url.into())
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
