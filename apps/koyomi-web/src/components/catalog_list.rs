use chrono::Local;
use koyomi_core::view::{EntryCard, NO_CATALOG};
use leptos::prelude::*;

use super::card::AnimeCard;
use crate::app::{AppContext, LoadState};

/// Every schedulable entry in catalog order.
#[component]
pub fn CatalogList(ctx: AppContext) -> impl IntoView {
    let cards = Memo::new(move |_| {
        ctx.session.with(|s| {
            s.catalog()
                .iter()
                .map(|e| EntryCard::new(e, &Local))
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div class="all-anime">
            <h2>"All Airing Anime"</h2>
            {move || {
                let cards = cards.get();
                if cards.is_empty() {
                    // Nothing to say until the fetch settles.
                    let settled = ctx.load.with(LoadState::is_settled);
                    return settled
                        .then(|| view! { <p class="empty">{NO_CATALOG}</p> })
                        .into_any();
                }
                cards
                    .into_iter()
                    .map(|card| {
                        let line = card.next_release_line();
                        view! { <AnimeCard card=card line=line /> }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}
