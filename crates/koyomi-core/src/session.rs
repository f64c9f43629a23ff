use chrono::NaiveDate;

use crate::models::{CatalogEntry, WatchingSet};
use crate::schedule::{self, DateBuckets};
use crate::view::{self, CalendarDay};

/// What the calendar page knows between renders: the fetched catalog, its
/// date index, and the user's day selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    catalog: Vec<CatalogEntry>,
    by_date: DateBuckets,
    today: NaiveDate,
    selected: Option<NaiveDate>,
}

impl Session {
    /// A session with no catalog yet.
    pub fn empty(today: NaiveDate) -> Self {
        Self::new(Vec::new(), today)
    }

    pub fn new(catalog: Vec<CatalogEntry>, today: NaiveDate) -> Self {
        let by_date = schedule::group_by_date(&catalog);
        Self {
            catalog,
            by_date,
            today,
            selected: None,
        }
    }

    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected = Some(date);
    }

    pub fn selected_or_today(&self) -> NaiveDate {
        self.selected.unwrap_or(self.today)
    }

    pub fn entries_on(&self, date: NaiveDate) -> &[CatalogEntry] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_entries(&self) -> &[CatalogEntry] {
        self.entries_on(self.selected_or_today())
    }

    /// Entries on the selected day that the user is watching.
    pub fn watching_on_selected(&self, watching: &WatchingSet) -> Vec<CatalogEntry> {
        schedule::filter_watching(self.selected_entries(), watching)
    }

    pub fn calendar(&self, days: u32) -> Vec<CalendarDay> {
        view::calendar_days(self.today, self.selected, &self.by_date, days)
    }

    /// Search the fetched catalog. `None` when the term is blank.
    pub fn search(&self, term: &str) -> Option<Vec<CatalogEntry>> {
        schedule::search(&self.catalog, term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample;

    // 2024-01-07 12:00 UTC.
    const NOON: i64 = 1_704_628_800;
    const DAY: i64 = 86_400;

    fn session() -> Session {
        let catalog = vec![
            sample(1, "Naruto Shippuden", Some(NOON)),
            sample(2, "Bleach", Some(NOON + DAY)),
            sample(3, "One Piece", Some(NOON)),
        ];
        Session::new(catalog, NaiveDate::from_ymd_opt(2024, 1, 7).unwrap())
    }

    #[test]
    fn test_defaults_to_today() {
        let s = session();
        assert_eq!(s.selected(), None);
        assert_eq!(s.selected_or_today(), s.today());
        let ids: Vec<_> = s.selected_entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_select_date() {
        let mut s = session();
        let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        s.select_date(monday);
        let ids: Vec<_> = s.selected_entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2]);
        assert!(s.calendar(7)[1].selected);
        assert!(!s.calendar(7)[0].selected);
    }

    #[test]
    fn test_empty_day() {
        let mut s = session();
        s.select_date(NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
        assert!(s.selected_entries().is_empty());
    }

    #[test]
    fn test_watching_on_selected() {
        let s = session();
        let watching: WatchingSet = [3, 2].into_iter().collect();
        let ids: Vec<_> = s.watching_on_selected(&watching).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_search_uses_cached_catalog() {
        let s = session();
        let found = s.search("naruto").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[test]
    fn test_empty_session() {
        let s = Session::empty(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert!(s.catalog().is_empty());
        assert_eq!(s.calendar(7).len(), 7);
        assert!(s.calendar(7).iter().all(|d| !d.has_anime()));
    }
}
