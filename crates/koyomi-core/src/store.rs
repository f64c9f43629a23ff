//! Persisted user preferences: the watching list and custom links.
//!
//! Values are stored as JSON strings in a flat key-value backend (browser
//! local storage in the app, [`MemoryStore`] in tests). Every mutation is a
//! full read-modify-write that reaches the backend before returning.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::StorageConfig;
use crate::error::KoyomiError;
use crate::models::{CustomLinkMap, WatchingSet};

/// A flat string key-value backend.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), KoyomiError>;

    fn remove(&self, key: &str) -> Result<(), KoyomiError>;
}

/// In-process backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KoyomiError> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KoyomiError> {
        self.values().remove(key);
        Ok(())
    }
}

/// Typed access to the watching list and custom links.
#[derive(Debug)]
pub struct PreferenceStore<S> {
    backend: S,
    keys: StorageConfig,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(backend: S, keys: StorageConfig) -> Self {
        Self { backend, keys }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    // ── Watching list ───────────────────────────────────────────

    pub fn watching_ids(&self) -> WatchingSet {
        self.read(&self.keys.watching_key)
    }

    pub fn is_watching(&self, id: u64) -> bool {
        self.watching_ids().contains(id)
    }

    /// Flip membership of `id` and persist. Returns the new membership.
    pub fn toggle_watching(&self, id: u64) -> Result<bool, KoyomiError> {
        let mut set = self.watching_ids();
        let now_watching = set.toggle(id);
        self.write(&self.keys.watching_key, &set)?;
        tracing::debug!(id, now_watching, "toggled watching");
        Ok(now_watching)
    }

    /// Drop `id` from the watching list. Removing an absent ID is a no-op.
    pub fn remove_watching(&self, id: u64) -> Result<(), KoyomiError> {
        let mut set = self.watching_ids();
        if set.remove(id) {
            self.write(&self.keys.watching_key, &set)?;
            tracing::debug!(id, "removed from watching");
        }
        Ok(())
    }

    // ── Custom links ────────────────────────────────────────────

    pub fn custom_links(&self) -> CustomLinkMap {
        self.read(&self.keys.links_key)
    }

    /// The stored link for `id`, exactly as saved.
    pub fn custom_link(&self, id: u64) -> Option<String> {
        self.custom_links().get(id).map(str::to_string)
    }

    /// The stored link for `id`, unless it is blank.
    pub fn usable_custom_link(&self, id: u64) -> Option<String> {
        self.custom_links().usable(id).map(str::to_string)
    }

    /// Store `url` for `id`, overwriting any previous value.
    pub fn set_custom_link(&self, id: u64, url: &str) -> Result<(), KoyomiError> {
        let mut links = self.custom_links();
        links.set(id, url);
        self.write(&self.keys.links_key, &links)?;
        tracing::debug!(id, "saved custom link");
        Ok(())
    }

    /// Forget the watching list and every custom link.
    pub fn clear(&self) -> Result<(), KoyomiError> {
        self.backend.remove(&self.keys.watching_key)?;
        self.backend.remove(&self.keys.links_key)?;
        tracing::info!("cleared stored preferences");
        Ok(())
    }

    // ── Encoding ────────────────────────────────────────────────

    /// Decode the value under `key`, falling back to the default when it is
    /// missing or does not decode.
    fn read<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let Some(raw) = self.backend.get(key) else {
            return T::default();
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable stored preference");
                T::default()
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), KoyomiError> {
        let json = serde_json::to_string(value)?;
        self.backend.set(key, &json)
    }
}
