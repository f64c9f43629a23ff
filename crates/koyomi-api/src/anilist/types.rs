use serde::Deserialize;

use koyomi_core::models::{CoverImage, EntryTitle, NextAiring};
use koyomi_core::CatalogEntry;

use super::error::AniListError;

// ── GraphQL response wrappers ────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

impl<T> GraphQLResponse<T> {
    /// The `data` payload, or the reported errors when it is missing.
    pub fn into_data(self) -> Result<T, AniListError> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(AniListError::GraphQl(
                self.errors.into_iter().map(|e| e.message).collect(),
            )),
        }
    }
}

// ── Listing / lookup queries ─────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PageResponse {
    #[serde(rename = "Page")]
    pub page: PageData,
}

#[derive(Debug, Deserialize)]
pub struct PageData {
    #[serde(rename = "pageInfo")]
    pub page_info: Option<PageInfo>,
    #[serde(default)]
    pub media: Vec<AniListMedia>,
}

#[derive(Debug, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "currentPage")]
    pub current_page: Option<u32>,
    #[serde(rename = "hasNextPage", default)]
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
pub struct MediaResponse {
    #[serde(rename = "Media")]
    pub media: Option<AniListMedia>,
}

#[derive(Debug, Deserialize)]
pub struct AniListMedia {
    pub id: u64,
    pub title: Option<AniListTitle>,
    #[serde(rename = "coverImage")]
    pub cover_image: Option<AniListCover>,
    #[serde(rename = "nextAiringEpisode")]
    pub next_airing_episode: Option<AiringEpisode>,
    #[serde(rename = "averageScore")]
    pub average_score: Option<u32>,
    pub popularity: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AniListTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AniListCover {
    pub medium: Option<String>,
    pub large: Option<String>,
    #[serde(rename = "extraLarge")]
    pub extra_large: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AiringEpisode {
    #[serde(rename = "airingAt")]
    pub airing_at: i64,
    #[serde(rename = "timeUntilAiring")]
    pub time_until_airing: Option<i64>,
    pub episode: u32,
}

// ── Conversions ──────────────────────────────────────────────────

impl AniListMedia {
    pub fn into_entry(self) -> CatalogEntry {
        let title = self
            .title
            .map(|t| EntryTitle {
                romaji: t.romaji,
                english: t.english,
            })
            .unwrap_or_default();
        let cover = self
            .cover_image
            .map(|c| CoverImage {
                medium: c.medium,
                large: c.large,
                extra_large: c.extra_large,
            })
            .unwrap_or_default();

        CatalogEntry {
            id: self.id,
            title,
            cover,
            next_airing: self.next_airing_episode.map(|n| NextAiring {
                airing_at: n.airing_at,
                episode: n.episode,
                time_until_airing: n.time_until_airing,
            }),
            average_score: self.average_score,
            popularity: self.popularity,
        }
    }
}

impl PageData {
    pub fn has_next(&self) -> bool {
        self.page_info.as_ref().is_some_and(|p| p.has_next_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_listing_page() {
        let json = r#"{
            "data": {
                "Page": {
                    "pageInfo": { "currentPage": 1, "hasNextPage": true },
                    "media": [
                        {
                            "id": 154587,
                            "title": {
                                "romaji": "Sousou no Frieren",
                                "english": "Frieren: Beyond Journey's End"
                            },
                            "coverImage": {
                                "medium": "https://s4.anilist.co/file/anilistcdn/media/anime/cover/small/154587.jpg",
                                "large": "https://s4.anilist.co/file/anilistcdn/media/anime/cover/medium/154587.jpg",
                                "extraLarge": "https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/154587.jpg"
                            },
                            "nextAiringEpisode": {
                                "airingAt": 1704637800,
                                "timeUntilAiring": 3600,
                                "episode": 18
                            },
                            "averageScore": 90,
                            "popularity": 250000
                        },
                        {
                            "id": 21,
                            "title": { "romaji": "ONE PIECE", "english": null },
                            "coverImage": null,
                            "nextAiringEpisode": null,
                            "averageScore": 88,
                            "popularity": 500000
                        }
                    ]
                }
            }
        }"#;

        let resp: GraphQLResponse<PageResponse> = serde_json::from_str(json).unwrap();
        let page = resp.into_data().unwrap().page;
        assert!(page.has_next());
        assert_eq!(page.page_info.as_ref().unwrap().current_page, Some(1));

        let entries: Vec<_> = page.media.into_iter().map(AniListMedia::into_entry).collect();
        assert_eq!(entries.len(), 2);

        let frieren = &entries[0];
        assert_eq!(frieren.id, 154587);
        assert_eq!(frieren.display_title(), "Frieren: Beyond Journey's End");
        assert!(frieren.cover_url().unwrap().ends_with("/large/154587.jpg"));
        let next = frieren.next_airing.unwrap();
        assert_eq!(next.airing_at, 1704637800);
        assert_eq!(next.episode, 18);
        assert_eq!(next.time_until_airing, Some(3600));
        assert_eq!(frieren.average_score, Some(90));

        let one_piece = &entries[1];
        assert_eq!(one_piece.display_title(), "ONE PIECE");
        assert!(one_piece.next_airing.is_none());
        assert!(one_piece.cover_url().is_none());
    }

    #[test]
    fn test_last_page() {
        let json = r#"{ "data": { "Page": { "pageInfo": { "hasNextPage": false }, "media": [] } } }"#;
        let resp: GraphQLResponse<PageResponse> = serde_json::from_str(json).unwrap();
        assert!(!resp.into_data().unwrap().page.has_next());
    }

    #[test]
    fn test_batch_page_without_page_info() {
        let json = r#"{ "data": { "Page": { "media": [ { "id": 1 }, { "id": 2 } ] } } }"#;
        let resp: GraphQLResponse<PageResponse> = serde_json::from_str(json).unwrap();
        let page = resp.into_data().unwrap().page;
        assert!(!page.has_next());
        assert_eq!(page.media.len(), 2);
    }

    #[test]
    fn test_missing_media() {
        let json = r#"{ "data": { "Media": null } }"#;
        let resp: GraphQLResponse<MediaResponse> = serde_json::from_str(json).unwrap();
        assert!(resp.into_data().unwrap().media.is_none());
    }

    #[test]
    fn test_graphql_errors() {
        let json = r#"{ "data": null, "errors": [ { "message": "Not Found.", "status": 404 } ] }"#;
        let resp: GraphQLResponse<MediaResponse> = serde_json::from_str(json).unwrap();
        match resp.into_data() {
            Err(AniListError::GraphQl(messages)) => assert_eq!(messages, vec!["Not Found."]),
            other => panic!("expected GraphQL error, got {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_minimal_media() {
        let json = r#"{ "id": 1, "title": { "romaji": "Test" } }"#;
        let media: AniListMedia = serde_json::from_str(json).unwrap();
        let entry = media.into_entry();
        assert_eq!(entry.id, 1);
        assert_eq!(entry.display_title(), "Test");
        assert!(entry.cover_url().is_none());
        assert!(entry.average_score.is_none());
    }
}
