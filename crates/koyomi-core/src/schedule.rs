//! Grouping of catalog entries into calendar views.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, TimeZone, Weekday};

use crate::models::{CatalogEntry, WatchingSet};

/// Entries keyed by the UTC date of their next episode.
pub type DateBuckets = BTreeMap<NaiveDate, Vec<CatalogEntry>>;

/// Weekdays in display order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// ISO `YYYY-MM-DD` form of a bucket key.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Group entries by the UTC calendar date of their next airing.
///
/// Entries keep catalog order within a date. Entries with no scheduled
/// episode are left out.
pub fn group_by_date(entries: &[CatalogEntry]) -> DateBuckets {
    let mut buckets = DateBuckets::new();
    for entry in entries {
        if let Some(at) = entry.airing_time() {
            buckets
                .entry(at.date_naive())
                .or_default()
                .push(entry.clone());
        }
    }
    buckets
}

/// One bucket per weekday, Sunday first, each ordered by air time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: [Vec<CatalogEntry>; 7],
}

impl WeeklySchedule {
    pub fn day(&self, day: Weekday) -> &[CatalogEntry] {
        &self.days[day.num_days_from_sunday() as usize]
    }

    /// All seven days in display order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[CatalogEntry])> {
        WEEKDAYS.iter().map(|&day| (day, self.day(day)))
    }

    pub fn total(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Group entries by the weekday they air on in `tz`, sorted by air time.
pub fn group_by_weekday<Tz: TimeZone>(entries: &[CatalogEntry], tz: &Tz) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::default();
    for entry in entries {
        if let Some(at) = entry.airing_time() {
            let idx = at.with_timezone(tz).weekday().num_days_from_sunday() as usize;
            schedule.days[idx].push(entry.clone());
        }
    }
    for day in &mut schedule.days {
        day.sort_by_key(|e| e.next_airing.map(|n| n.airing_at));
    }
    schedule
}

/// Entries in the watching set, in catalog order.
pub fn filter_watching(entries: &[CatalogEntry], watching: &WatchingSet) -> Vec<CatalogEntry> {
    entries
        .iter()
        .filter(|e| watching.contains(e.id))
        .cloned()
        .collect()
}

/// Case-insensitive substring search over display titles.
///
/// Returns `None` for a blank term, meaning no search is active.
pub fn search(entries: &[CatalogEntry], term: &str) -> Option<Vec<CatalogEntry>> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    Some(
        entries
            .iter()
            .filter(|e| e.display_title().to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}
