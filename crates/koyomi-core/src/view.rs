//! Render-ready view models and display formatting.
//!
//! Nothing here touches the DOM; the web front end turns these into markup.

use std::fmt::Display;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc, Weekday};

use crate::models::CatalogEntry;
use crate::schedule::{weekday_name, DateBuckets};

pub const LOADING: &str = "Loading...";
pub const NO_ANIME_ON_DAY: &str = "No anime airing on this day.";
pub const NO_WATCHING_ON_DAY: &str = "No anime you are watching airs on this day.";
pub const NO_CATALOG: &str = "No currently airing anime found.";
pub const NO_SEARCH_RESULTS: &str = "No results found.";
pub const NOT_WATCHING_ANY: &str = "You are not watching any anime yet.";
pub const NO_ANIME_ON_WEEKDAY: &str = "No anime airing";

pub fn short_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

/// `HH:MM` in the viewer's time zone.
pub fn format_time<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    at.with_timezone(tz).format("%H:%M").to_string()
}

/// The calendar date at `now` in the viewer's time zone.
pub fn today_in<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    now.with_timezone(tz).date_naive()
}

/// e.g. `Sunday, October 18, 2026`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// One cell of the calendar strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub weekday: &'static str,
    pub day_of_month: u32,
    pub airing_count: usize,
    pub selected: bool,
    pub is_today: bool,
}

impl CalendarDay {
    pub fn has_anime(&self) -> bool {
        self.airing_count > 0
    }

    /// Hover text for days with releases.
    pub fn tooltip(&self) -> Option<String> {
        self.has_anime()
            .then(|| format!("{} anime airing", self.airing_count))
    }
}

/// `days` consecutive days starting at `today`.
///
/// The selected day is highlighted. With no selection the first cell is.
pub fn calendar_days(
    today: NaiveDate,
    selected: Option<NaiveDate>,
    by_date: &DateBuckets,
    days: u32,
) -> Vec<CalendarDay> {
    (0..days)
        .filter_map(|offset| today.checked_add_days(Days::new(u64::from(offset))))
        .map(|date| CalendarDay {
            date,
            weekday: short_weekday(date.weekday()),
            day_of_month: date.day(),
            airing_count: by_date.get(&date).map_or(0, Vec::len),
            selected: selected.map_or(date == today, |s| s == date),
            is_today: date == today,
        })
        .collect()
}

/// Everything a card needs to show one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCard {
    pub id: u64,
    pub title: String,
    pub cover_url: Option<String>,
    pub episode: Option<u32>,
    pub time: Option<String>,
    pub weekday: Option<&'static str>,
    pub watching: bool,
    pub custom_link: Option<String>,
}

impl EntryCard {
    pub fn new<Tz: TimeZone>(entry: &CatalogEntry, tz: &Tz) -> Self
    where
        Tz::Offset: Display,
    {
        let at = entry.airing_time();
        Self {
            id: entry.id,
            title: entry.display_title().to_string(),
            cover_url: entry.cover_url().map(str::to_string),
            episode: entry.next_airing.map(|n| n.episode),
            time: at.map(|at| format_time(at, tz)),
            weekday: at.map(|at| weekday_name(at.with_timezone(tz).weekday())),
            watching: false,
            custom_link: None,
        }
    }

    pub fn with_watching(mut self, watching: bool) -> Self {
        self.watching = watching;
        self
    }

    pub fn with_custom_link(mut self, link: Option<String>) -> Self {
        self.custom_link = link;
        self
    }

    fn episode_label(&self) -> String {
        self.episode.map_or_else(|| "?".into(), |ep| ep.to_string())
    }

    fn time_label(&self) -> &str {
        self.time.as_deref().unwrap_or("--:--")
    }

    /// `Episode 5 airs at 23:30`
    pub fn release_line(&self) -> String {
        format!("Episode {} airs at {}", self.episode_label(), self.time_label())
    }

    /// `Ep 5 airs at 23:30`
    pub fn short_release_line(&self) -> String {
        format!("Ep {} airs at {}", self.episode_label(), self.time_label())
    }

    /// `Next: Episode 5 airs on Sunday at 23:30`
    pub fn next_release_line(&self) -> String {
        format!(
            "Next: Episode {} airs on {} at {}",
            self.episode_label(),
            self.weekday.unwrap_or("?"),
            self.time_label()
        )
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.watching {
            "Remove from Watching"
        } else {
            "Add to Watching"
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;
    use crate::models::sample;
    use crate::schedule::group_by_date;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_seven_days_from_today() {
        let today = date(2024, 12, 29);
        let days = calendar_days(today, None, &DateBuckets::new(), 7);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, today);
        assert_eq!(days[6].date, date(2025, 1, 4));
        assert_eq!(days[3].day_of_month, 1);
        assert_eq!(days[0].weekday, "Sun");
        assert!(days[0].is_today);
        assert!(!days[1].is_today);
    }

    #[test]
    fn test_calendar_highlight_falls_back_to_today() {
        let today = date(2024, 1, 7);
        let days = calendar_days(today, None, &DateBuckets::new(), 7);
        let selected: Vec<_> = days.iter().filter(|d| d.selected).map(|d| d.date).collect();
        assert_eq!(selected, vec![today]);
    }

    #[test]
    fn test_calendar_highlights_selection() {
        let today = date(2024, 1, 7);
        let pick = date(2024, 1, 9);
        let days = calendar_days(today, Some(pick), &DateBuckets::new(), 7);
        let selected: Vec<_> = days.iter().filter(|d| d.selected).map(|d| d.date).collect();
        assert_eq!(selected, vec![pick]);
    }

    #[test]
    fn test_calendar_marks_airing_days() {
        // 2024-01-07 12:00 UTC and 2024-01-08 12:00 UTC.
        let entries = vec![
            sample(1, "A", Some(1_704_628_800)),
            sample(2, "B", Some(1_704_628_800)),
            sample(3, "C", Some(1_704_715_200)),
        ];
        let by_date = group_by_date(&entries);
        let days = calendar_days(date(2024, 1, 7), None, &by_date, 7);
        assert_eq!(days[0].airing_count, 2);
        assert_eq!(days[0].tooltip().as_deref(), Some("2 anime airing"));
        assert_eq!(days[1].airing_count, 1);
        assert!(!days[2].has_anime());
        assert_eq!(days[2].tooltip(), None);
    }

    #[test]
    fn test_calendar_starts_on_viewer_local_date() {
        // 2026-10-19 02:00 UTC is 21:00 on Sunday the 18th at UTC-5.
        let now = DateTime::from_timestamp(1792375200, 0).unwrap();
        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
        let today = today_in(now, &eastern);
        assert_eq!(today, date(2026, 10, 18));
        assert_eq!(today_in(now, &Utc), date(2026, 10, 19));

        let days = calendar_days(today, None, &DateBuckets::new(), 7);
        assert_eq!(days[0].day_of_month, 18);
        assert_eq!(days[0].weekday, "Sun");
        assert!(days[0].is_today && days[0].selected);
    }

    #[test]
    fn test_long_date() {
        assert_eq!(format_long_date(date(2026, 10, 18)), "Sunday, October 18, 2026");
        assert_eq!(format_long_date(date(2024, 1, 7)), "Sunday, January 7, 2024");
    }

    #[test]
    fn test_card_lines() {
        // 2024-01-07 14:30 UTC.
        let mut entry = sample(9, "Frieren", Some(1_704_637_800));
        entry.next_airing.as_mut().unwrap().episode = 12;
        let card = EntryCard::new(&entry, &Utc).with_watching(true);

        assert_eq!(card.release_line(), "Episode 12 airs at 14:30");
        assert_eq!(card.short_release_line(), "Ep 12 airs at 14:30");
        assert_eq!(card.next_release_line(), "Next: Episode 12 airs on Sunday at 14:30");
        assert_eq!(card.toggle_label(), "Remove from Watching");
    }

    #[test]
    fn test_card_uses_viewer_time_zone() {
        let entry = sample(9, "Frieren", Some(1_704_637_800));
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let card = EntryCard::new(&entry, &tokyo);
        assert_eq!(card.time.as_deref(), Some("23:30"));
        assert_eq!(card.weekday, Some("Sunday"));
        assert_eq!(card.toggle_label(), "Add to Watching");
    }
}
