use koyomi_core::view::EntryCard;
use leptos::prelude::*;

/// Cover, title and one line of release info, with optional actions below.
#[component]
pub fn AnimeCard(
    card: EntryCard,
    line: String,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    let alt = card.title.clone();
    view! {
        <div class="anime-card" data-id=card.id.to_string()>
            {card.cover_url.map(|src| view! { <img src=src alt=alt loading="lazy" /> })}
            <div class="anime-info">
                <h3>{card.title}</h3>
                <p>{line}</p>
                {children.map(|children| children())}
            </div>
        </div>
    }
}
