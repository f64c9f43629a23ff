use koyomi_core::schedule::date_key;
use koyomi_core::view::CalendarDay;
use leptos::prelude::*;

use super::catalog_list::CatalogList;
use super::day_detail::{DayDetail, WatchingToday};
use super::search::SearchPanel;
use crate::app::AppContext;

fn cell_class(day: &CalendarDay) -> String {
    let mut class = String::from("calendar-cell");
    if day.has_anime() {
        class.push_str(" has-anime");
    }
    if day.selected {
        class.push_str(" selected");
    }
    if day.is_today {
        class.push_str(" today");
    }
    class
}

#[component]
pub fn CalendarPage(ctx: AppContext) -> impl IntoView {
    view! {
        <section class="calendar-page">
            <CalendarStrip ctx=ctx />
            <div class="day-panels">
                <DayDetail ctx=ctx />
                <WatchingToday ctx=ctx />
            </div>
            <SearchPanel ctx=ctx />
            <CatalogList ctx=ctx />
        </section>
    }
}

/// The next few days as a clickable weekday/date grid.
#[component]
fn CalendarStrip(ctx: AppContext) -> impl IntoView {
    let days = Memo::new(move |_| ctx.session.with(|s| s.calendar(ctx.days_shown())));

    view! {
        <div class="calendar">
            <h2>{move || format!("Next {} Days (Starting Today)", ctx.days_shown())}</h2>
            <div class="calendar-row weekdays">
                {move || {
                    days.get()
                        .into_iter()
                        .map(|day| view! { <div class="calendar-weekday">{day.weekday}</div> })
                        .collect_view()
                }}
            </div>
            <div class="calendar-row dates">
                {move || {
                    days.get()
                        .into_iter()
                        .map(|day| {
                            let date = day.date;
                            view! {
                                <div
                                    class=cell_class(&day)
                                    data-date=date_key(date)
                                    title=day.tooltip()
                                    on:click=move |_| ctx.session.update(|s| s.select_date(date))
                                >
                                    {day.day_of_month}
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
