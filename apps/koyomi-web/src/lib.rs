mod app;
mod components;
mod logging;
mod storage;

use koyomi_core::{CalendarConfig, KeyValueStore};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::storage::{BrowserStore, CONFIG_KEY};

#[wasm_bindgen(start)]
pub fn start() {
    let raw = BrowserStore.get(CONFIG_KEY);
    let (config, rejected) = match CalendarConfig::with_override(raw.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (CalendarConfig::default(), Some(e)),
    };

    logging::init(&config.view.log_filter);
    if let Some(e) = rejected {
        tracing::warn!(key = CONFIG_KEY, error = %e, "ignoring invalid config override");
    }

    mount_to_body(move || view! { <app::App config=config /> });
}
