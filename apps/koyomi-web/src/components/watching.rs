use chrono::Local;
use koyomi_api::CatalogSource;
use koyomi_core::schedule::{group_by_weekday, weekday_name, WeeklySchedule};
use koyomi_core::view::{EntryCard, LOADING, NOT_WATCHING_ANY, NO_ANIME_ON_WEEKDAY};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::card::AnimeCard;
use crate::app::{AppContext, Slot};

const LINK_PROMPT: &str = "Set a custom link for this anime:";
const LINK_SAVED: &str = "Custom link saved!";
const CLEAR_CONFIRM: &str = "Forget your watching list and all custom links?";

#[derive(Debug, Clone, PartialEq)]
enum Weekly {
    Loading,
    Empty,
    Loaded(WeeklySchedule),
    Failed(String),
}

/// The watching list laid out by weekday in local time.
#[component]
pub fn WatchingPage(ctx: AppContext) -> impl IntoView {
    let weekly = RwSignal::new(Weekly::Loading);

    Effect::new(move |_| {
        let watching = ctx.prefs.watching();
        let requests = ctx.requests.get_value();
        let ticket = requests.begin(Slot::Weekly);
        if watching.is_empty() {
            weekly.set(Weekly::Empty);
            return;
        }
        weekly.set(Weekly::Loading);
        let client = ctx.client();
        spawn_local(async move {
            let result = client.fetch_batch_by_ids(watching.ids()).await;
            if !requests.is_current(&ticket) {
                return;
            }
            match result {
                Ok(entries) => {
                    tracing::debug!(
                        requested = watching.len(),
                        found = entries.len(),
                        "watching list loaded"
                    );
                    weekly.set(Weekly::Loaded(group_by_weekday(&entries, &Local)));
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to fetch watching list");
                    weekly.set(Weekly::Failed(e.to_string()));
                }
            }
        });
    });

    let clear = move |_| {
        let confirmed = window().confirm_with_message(CLEAR_CONFIRM).unwrap_or(false);
        if confirmed {
            ctx.prefs.clear();
        }
    };

    view! {
        <section class="watching-page">
            <div class="watching-header">
                <h2>"Your Weekly Schedule"</h2>
                <button class="clear-btn" on:click=clear>"Clear list"</button>
            </div>
            {move || match weekly.get() {
                Weekly::Loading => view! { <p class="loading">{LOADING}</p> }.into_any(),
                Weekly::Empty => view! { <p class="empty">{NOT_WATCHING_ANY}</p> }.into_any(),
                Weekly::Failed(e) => {
                    view! { <p class="error">{format!("Failed to load watching list: {e}")}</p> }
                        .into_any()
                }
                Weekly::Loaded(schedule) => {
                    view! { <WeekGrid ctx=ctx schedule=schedule /> }.into_any()
                }
            }}
        </section>
    }
}

#[component]
fn WeekGrid(ctx: AppContext, schedule: WeeklySchedule) -> impl IntoView {
    let columns = schedule
        .iter()
        .map(|(day, entries)| {
            let cards: Vec<EntryCard> = entries
                .iter()
                .map(|e| EntryCard::new(e, &Local).with_watching(true))
                .collect();
            view! {
                <div class="weekday-column">
                    <h3>{weekday_name(day)}</h3>
                    {if cards.is_empty() {
                        view! { <p class="empty">{NO_ANIME_ON_WEEKDAY}</p> }.into_any()
                    } else {
                        cards
                            .into_iter()
                            .map(|card| view! { <WeeklyCard ctx=ctx card=card /> })
                            .collect_view()
                            .into_any()
                    }}
                </div>
            }
        })
        .collect_view();

    view! { <div class="weekly-calendar">{columns}</div> }
}

/// Click opens the saved link, right click edits it.
#[component]
fn WeeklyCard(ctx: AppContext, card: EntryCard) -> impl IntoView {
    let id = card.id;
    let line = card.short_release_line();

    let open_link = move |_| match ctx.prefs.usable_link(id) {
        Some(url) => {
            if let Err(e) = window().open_with_url_and_target(&url, "_blank") {
                tracing::warn!(id, error = ?e, "failed to open custom link");
            }
        }
        None => tracing::debug!(id, "no custom link set"),
    };

    let edit_link = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        let current = ctx.prefs.raw_link(id).unwrap_or_default();
        match window().prompt_with_message_and_default(LINK_PROMPT, &current) {
            Ok(Some(url)) => {
                if ctx.prefs.set_link(id, url.trim()) {
                    let _ = window().alert_with_message(LINK_SAVED);
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(id, error = ?e, "link prompt failed"),
        }
    };

    let class = move || {
        if ctx.prefs.links().usable(id).is_some() {
            "weekly-anime-card has-link"
        } else {
            "weekly-anime-card"
        }
    };

    let remove = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        ctx.prefs.remove(id);
    };

    view! {
        <div class=class on:click=open_link on:contextmenu=edit_link>
            <AnimeCard card=card line=line>
                <button class="remove-watching-btn" on:click=remove>
                    "Remove"
                </button>
            </AnimeCard>
        </div>
    }
}
