use chrono::Local;
use koyomi_core::view::{
    format_long_date, EntryCard, LOADING, NO_ANIME_ON_DAY, NO_WATCHING_ON_DAY,
};
use leptos::prelude::*;

use super::card::AnimeCard;
use crate::app::{AppContext, LoadState, Slot};

/// Cards for the selected day with a watching toggle on each.
#[component]
pub fn DayDetail(ctx: AppContext) -> impl IntoView {
    let cards = RwSignal::new(None::<Vec<EntryCard>>);

    Effect::new(move |_| {
        if !ctx.load.with(LoadState::is_settled) {
            cards.set(None);
            return;
        }
        let watching = ctx.prefs.watching();
        let built: Vec<EntryCard> = ctx.session.with(|s| {
            s.selected_entries()
                .iter()
                .map(|e| EntryCard::new(e, &Local).with_watching(watching.contains(e.id)))
                .collect()
        });
        ctx.publish_after_delay(Slot::DayDetail, cards, built);
    });

    let heading = move || {
        let date = ctx.session.with(|s| s.selected_or_today());
        format!("Anime airing on {}", format_long_date(date))
    };

    view! {
        <div class="day-detail">
            <h2>{heading}</h2>
            {move || match cards.get() {
                None => view! { <p class="loading">{LOADING}</p> }.into_any(),
                Some(cards) if cards.is_empty() => {
                    view! { <p class="empty">{NO_ANIME_ON_DAY}</p> }.into_any()
                }
                Some(cards) => {
                    cards
                        .into_iter()
                        .map(|card| {
                            let id = card.id;
                            let label = card.toggle_label();
                            let line = card.release_line();
                            view! {
                                <AnimeCard card=card line=line>
                                    <button
                                        class="toggle-watching-btn"
                                        on:click=move |_| ctx.prefs.toggle(id)
                                    >
                                        {label}
                                    </button>
                                </AnimeCard>
                            }
                        })
                        .collect_view()
                        .into_any()
                }
            }}
        </div>
    }
}

/// The selected day's entries that are on the watching list.
#[component]
pub fn WatchingToday(ctx: AppContext) -> impl IntoView {
    let cards = RwSignal::new(None::<Vec<EntryCard>>);

    Effect::new(move |_| {
        if !ctx.load.with(LoadState::is_settled) {
            cards.set(None);
            return;
        }
        let watching = ctx.prefs.watching();
        let built: Vec<EntryCard> = ctx.session.with(|s| {
            s.watching_on_selected(&watching)
                .iter()
                .map(|e| EntryCard::new(e, &Local).with_watching(true))
                .collect()
        });
        ctx.publish_after_delay(Slot::WatchingToday, cards, built);
    });

    view! {
        <div class="watching-today">
            <h2>"Watching"</h2>
            {move || match cards.get() {
                None => view! { <p class="loading">{LOADING}</p> }.into_any(),
                Some(cards) if cards.is_empty() => {
                    view! { <p class="empty">{NO_WATCHING_ON_DAY}</p> }.into_any()
                }
                Some(cards) => {
                    cards
                        .into_iter()
                        .map(|card| {
                            let line = card.short_release_line();
                            view! { <AnimeCard card=card line=line /> }
                        })
                        .collect_view()
                        .into_any()
                }
            }}
        </div>
    }
}
