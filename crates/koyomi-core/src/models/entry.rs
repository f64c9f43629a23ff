use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title variants as reported by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
}

impl EntryTitle {
    /// English title, falling back to Romaji.
    pub fn preferred(&self) -> &str {
        self.english
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.romaji.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("Unknown")
    }
}

/// Cover art in the sizes AniList serves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverImage {
    pub medium: Option<String>,
    pub large: Option<String>,
    pub extra_large: Option<String>,
}

impl CoverImage {
    /// Largest available image.
    pub fn best(&self) -> Option<&str> {
        self.extra_large
            .as_deref()
            .or(self.large.as_deref())
            .or(self.medium.as_deref())
    }
}

/// The next scheduled episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextAiring {
    /// Unix timestamp (seconds) of the release.
    pub airing_at: i64,
    pub episode: u32,
    pub time_until_airing: Option<i64>,
}

impl NextAiring {
    pub fn airing_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.airing_at, 0)
    }
}

/// One currently releasing title. Snapshots are never mutated after fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u64,
    pub title: EntryTitle,
    pub cover: CoverImage,
    pub next_airing: Option<NextAiring>,
    pub average_score: Option<u32>,
    pub popularity: Option<u32>,
}

impl CatalogEntry {
    pub fn display_title(&self) -> &str {
        self.title.preferred()
    }

    pub fn cover_url(&self) -> Option<&str> {
        self.cover.best()
    }

    /// Air time of the next episode, if one is scheduled.
    pub fn airing_time(&self) -> Option<DateTime<Utc>> {
        self.next_airing.as_ref().and_then(NextAiring::airing_time)
    }

    /// Whether the entry belongs in the catalog: scheduled to air at a
    /// representable time and scoring at least `min_score`.
    pub fn is_schedulable(&self, min_score: u32) -> bool {
        self.airing_time().is_some() && self.average_score.is_some_and(|s| s >= min_score)
    }
}

#[cfg(test)]
pub(crate) fn sample(id: u64, title: &str, airing_at: Option<i64>) -> CatalogEntry {
    CatalogEntry {
        id,
        title: EntryTitle {
            romaji: Some(title.to_string()),
            english: None,
        },
        cover: CoverImage::default(),
        next_airing: airing_at.map(|airing_at| NextAiring {
            airing_at,
            episode: 1,
            time_until_airing: None,
        }),
        average_score: Some(75),
        popularity: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_prefers_english() {
        let title = EntryTitle {
            romaji: Some("Sousou no Frieren".into()),
            english: Some("Frieren: Beyond Journey's End".into()),
        };
        assert_eq!(title.preferred(), "Frieren: Beyond Journey's End");
    }

    #[test]
    fn test_title_falls_back_to_romaji() {
        let title = EntryTitle {
            romaji: Some("Dandadan".into()),
            english: None,
        };
        assert_eq!(title.preferred(), "Dandadan");
        assert_eq!(EntryTitle::default().preferred(), "Unknown");
    }

    #[test]
    fn test_cover_precedence() {
        let mut cover = CoverImage {
            medium: Some("m".into()),
            large: Some("l".into()),
            extra_large: Some("xl".into()),
        };
        assert_eq!(cover.best(), Some("xl"));
        cover.extra_large = None;
        assert_eq!(cover.best(), Some("l"));
        cover.large = None;
        assert_eq!(cover.best(), Some("m"));
        cover.medium = None;
        assert_eq!(cover.best(), None);
    }

    #[test]
    fn test_schedulable() {
        let mut entry = sample(1, "A", Some(1_700_000_000));
        assert!(entry.is_schedulable(50));

        entry.average_score = Some(40);
        assert!(!entry.is_schedulable(50));

        entry.average_score = None;
        assert!(!entry.is_schedulable(50));

        let unscheduled = sample(2, "B", None);
        assert!(!unscheduled.is_schedulable(50));
    }

    #[test]
    fn test_unrepresentable_airing_time_is_not_schedulable() {
        let entry = sample(1, "A", Some(i64::MAX));
        assert!(entry.airing_time().is_none());
        assert!(!entry.is_schedulable(50));
    }

    #[test]
    fn test_airing_time() {
        let entry = sample(1, "A", Some(0));
        assert_eq!(entry.airing_time().unwrap().timestamp(), 0);
        assert!(sample(2, "B", None).airing_time().is_none());
    }
}
