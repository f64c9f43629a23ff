use chrono::{Local, Utc};
use gloo_timers::future::TimeoutFuture;
use koyomi_api::{fetch_catalog, AniListClient};
use koyomi_core::request::RequestTracker;
use koyomi_core::view::{today_in, LOADING};
use koyomi_core::{CalendarConfig, CustomLinkMap, PreferenceStore, Session, WatchingSet};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{CalendarPage, WatchingPage};
use crate::storage::BrowserStore;

/// Request intents whose newest result wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    DayDetail,
    WatchingToday,
    Weekly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

impl LoadState {
    /// Whether the initial catalog fetch has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        !matches!(self, LoadState::Loading)
    }

    fn status_line(&self) -> Option<String> {
        match self {
            LoadState::Loading => Some(LOADING.to_string()),
            LoadState::Ready => None,
            LoadState::Failed(e) => Some(format!("Failed to load airing anime: {e}")),
        }
    }
}

fn local_today() -> chrono::NaiveDate {
    today_in(Utc::now(), &Local)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Calendar,
    Watching,
}

/// Persisted preferences. Each half has a revision counter so views re-render
/// after a write.
#[derive(Clone, Copy)]
pub struct Prefs {
    store: StoredValue<PreferenceStore<BrowserStore>>,
    watching_rev: RwSignal<u64>,
    links_rev: RwSignal<u64>,
}

impl Prefs {
    fn new(config: &CalendarConfig) -> Self {
        Self {
            store: StoredValue::new(PreferenceStore::new(BrowserStore, config.storage.clone())),
            watching_rev: RwSignal::new(0),
            links_rev: RwSignal::new(0),
        }
    }

    pub fn watching(&self) -> WatchingSet {
        self.watching_rev.track();
        self.store.with_value(|s| s.watching_ids())
    }

    pub fn links(&self) -> CustomLinkMap {
        self.links_rev.track();
        self.store.with_value(|s| s.custom_links())
    }

    pub fn usable_link(&self, id: u64) -> Option<String> {
        self.store.with_value(|s| s.usable_custom_link(id))
    }

    /// The stored link as saved, for pre-filling the edit prompt.
    pub fn raw_link(&self, id: u64) -> Option<String> {
        self.store.with_value(|s| s.custom_link(id))
    }

    pub fn toggle(&self, id: u64) {
        if let Err(e) = self.store.with_value(|s| s.toggle_watching(id)) {
            tracing::error!(id, error = %e, "failed to update watching list");
        }
        self.watching_rev.update(|r| *r += 1);
    }

    pub fn remove(&self, id: u64) {
        if let Err(e) = self.store.with_value(|s| s.remove_watching(id)) {
            tracing::error!(id, error = %e, "failed to remove from watching list");
        }
        self.watching_rev.update(|r| *r += 1);
    }

    pub fn set_link(&self, id: u64, url: &str) -> bool {
        let saved = self.store.with_value(|s| s.set_custom_link(id, url));
        if let Err(e) = &saved {
            tracing::error!(id, error = %e, "failed to save custom link");
        }
        self.links_rev.update(|r| *r += 1);
        saved.is_ok()
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.with_value(|s| s.clear()) {
            tracing::error!(error = %e, "failed to clear preferences");
        }
        self.watching_rev.update(|r| *r += 1);
        self.links_rev.update(|r| *r += 1);
    }
}

/// Shared state handed to every page.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub config: StoredValue<CalendarConfig>,
    pub session: RwSignal<Session>,
    pub load: RwSignal<LoadState>,
    pub prefs: Prefs,
    pub requests: StoredValue<RequestTracker<Slot>>,
    pub page: RwSignal<Page>,
}

impl AppContext {
    fn new(config: CalendarConfig) -> Self {
        let prefs = Prefs::new(&config);
        Self {
            config: StoredValue::new(config),
            session: RwSignal::new(Session::empty(local_today())),
            load: RwSignal::new(LoadState::Loading),
            prefs,
            requests: StoredValue::new(RequestTracker::new()),
            page: RwSignal::new(Page::Calendar),
        }
    }

    pub fn client(&self) -> AniListClient {
        self.config.with_value(|c| AniListClient::new(&c.api))
    }

    pub fn days_shown(&self) -> u32 {
        self.config.with_value(|c| c.view.days_shown)
    }

    /// Clear `target`, wait out the loading delay, then publish `value`
    /// unless a newer request for `slot` started in the meantime.
    pub fn publish_after_delay<T>(&self, slot: Slot, target: RwSignal<Option<T>>, value: T)
    where
        T: Send + Sync + 'static,
    {
        let requests = self.requests.get_value();
        let ticket = requests.begin(slot);
        let delay = self.config.with_value(|c| c.view.loading_delay_ms);
        target.set(None);
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            if requests.is_current(&ticket) {
                target.set(Some(value));
            }
        });
    }
}

#[component]
pub fn App(config: CalendarConfig) -> impl IntoView {
    let ctx = AppContext::new(config);

    Effect::new(move |_| {
        let client = ctx.client();
        let min_score = ctx.config.with_value(|c| c.api.min_average_score);
        spawn_local(async move {
            match fetch_catalog(&client, min_score).await {
                Ok(entries) => {
                    ctx.session.set(Session::new(entries, local_today()));
                    ctx.load.set(LoadState::Ready);
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to fetch airing catalog");
                    ctx.load.set(LoadState::Failed(e.to_string()));
                }
            }
        });
    });

    let tab_class = move |page: Page| {
        if ctx.page.get() == page {
            "tab active"
        } else {
            "tab"
        }
    };

    view! {
        <main class="app">
            <header>
                <h1>"Koyomi"</h1>
                <nav class="tabs">
                    <button
                        class=move || tab_class(Page::Calendar)
                        on:click=move |_| ctx.page.set(Page::Calendar)
                    >
                        "Calendar"
                    </button>
                    <button
                        class=move || tab_class(Page::Watching)
                        on:click=move |_| ctx.page.set(Page::Watching)
                    >
                        "Watching"
                    </button>
                </nav>
                {move || {
                    ctx.load
                        .with(LoadState::status_line)
                        .map(|line| view! { <p class="status">{line}</p> })
                }}
            </header>

            {move || match ctx.page.get() {
                Page::Calendar => view! { <CalendarPage ctx=ctx /> }.into_any(),
                Page::Watching => view! { <WatchingPage ctx=ctx /> }.into_any(),
            }}
        </main>
    }
}
