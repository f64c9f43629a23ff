use chrono::Local;
use koyomi_core::view::{EntryCard, NO_SEARCH_RESULTS};
use koyomi_core::CatalogEntry;
use leptos::prelude::*;

use super::card::AnimeCard;
use crate::app::AppContext;

/// Title search over the loaded catalog. Runs on the button or Enter; an
/// emptied box hides the results.
#[component]
pub fn SearchPanel(ctx: AppContext) -> impl IntoView {
    let (term, set_term) = signal(String::new());
    let results = RwSignal::new(None::<Vec<CatalogEntry>>);

    let run_search = move || {
        let term = term.get_untracked();
        let found = ctx.session.with_untracked(|s| s.search(&term));
        tracing::debug!(term = %term, hits = found.as_ref().map(Vec::len), "search");
        results.set(found);
    };

    view! {
        <div class="search">
            <input
                type="text"
                placeholder="Search airing anime..."
                prop:value=move || term.get()
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    if value.trim().is_empty() {
                        results.set(None);
                    }
                    set_term.set(value);
                }
                on:keydown=move |ev| {
                    if ev.key() == "Enter" {
                        run_search();
                    }
                }
            />
            <button on:click=move |_| run_search()>"Search"</button>
            {move || {
                results.get().map(|found| {
                    if found.is_empty() {
                        return view! { <p class="empty">{NO_SEARCH_RESULTS}</p> }.into_any();
                    }
                    found
                        .iter()
                        .map(|e| {
                            let card = EntryCard::new(e, &Local);
                            let line = card.next_release_line();
                            view! { <AnimeCard card=card line=line /> }
                        })
                        .collect_view()
                        .into_any()
                })
            }}
        </div>
    }
}
