use gloo_storage::{LocalStorage, Storage};
use koyomi_core::{KeyValueStore, KoyomiError};

/// Local-storage key holding an optional TOML config override.
pub const CONFIG_KEY: &str = "koyomiConfig";

/// `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KoyomiError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| KoyomiError::Storage(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), KoyomiError> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| KoyomiError::Storage(format!("{e:?}")))
    }
}
