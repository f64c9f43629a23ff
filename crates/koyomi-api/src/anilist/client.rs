use reqwest::Client;

use koyomi_core::config::ApiConfig;
use koyomi_core::CatalogEntry;

use super::error::AniListError;
use super::types::{AniListMedia, GraphQLResponse, MediaResponse, PageResponse};
use crate::traits::{CatalogPage, CatalogSource};

/// AniList clamps `perPage` to this value. The listing pages past it; ID
/// lookups have to be split on it.
const MAX_PER_PAGE: usize = 50;

macro_rules! media_fields {
    () => {
        r#"
            id
            title { romaji english }
            coverImage { medium large extraLarge }
            nextAiringEpisode { airingAt timeUntilAiring episode }
            averageScore
            popularity
        "#
    };
}

const RELEASING_QUERY: &str = concat!(
    r#"
query ($page: Int, $perPage: Int, $formats: [MediaFormat]) {
    Page(page: $page, perPage: $perPage) {
        pageInfo { currentPage hasNextPage }
        media(type: ANIME, status: RELEASING, sort: POPULARITY_DESC, format_in: $formats) {"#,
    media_fields!(),
    r#"}
    }
}
"#
);

const MEDIA_BY_ID_QUERY: &str = concat!(
    r#"
query ($id: Int) {
    Media(id: $id, type: ANIME) {"#,
    media_fields!(),
    r#"}
}
"#
);

const MEDIA_BATCH_QUERY: &str = concat!(
    r#"
query ($ids: [Int], $perPage: Int) {
    Page(perPage: $perPage) {
        media(id_in: $ids, type: ANIME) {"#,
    media_fields!(),
    r#"}
    }
}
"#
);

/// AniList GraphQL client for the public, unauthenticated catalog.
#[derive(Debug, Clone)]
pub struct AniListClient {
    http: Client,
    endpoint: String,
    per_page: u32,
    formats: Vec<String>,
}

impl AniListClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: &ApiConfig) -> Self {
        Self {
            http,
            endpoint: config.endpoint.clone(),
            per_page: config.per_page,
            formats: config.formats.clone(),
        }
    }

    async fn graphql_request<T: serde::de::DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, AniListError> {
        tracing::debug!(operation, "AniList GraphQL request");

        let resp = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&serde_json::json!({
                "query": query,
                "variables": variables,
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(operation, status = status_code, "AniList API error");
            return Err(AniListError::Api {
                status: status_code,
                message: body,
            });
        }

        tracing::debug!(operation, status = %status, "AniList response received");
        let body: GraphQLResponse<T> = resp
            .json()
            .await
            .map_err(|e| AniListError::Parse(e.to_string()))?;
        body.into_data()
    }

    fn listing_variables(&self, page: u32) -> serde_json::Value {
        serde_json::json!({
            "page": page,
            "perPage": self.per_page,
            "formats": self.formats,
        })
    }
}

/// ID lookups in request order, each small enough for one page.
fn batch_chunks(ids: &[u64]) -> std::slice::Chunks<'_, u64> {
    ids.chunks(MAX_PER_PAGE)
}

impl CatalogSource for AniListClient {
    type Error = AniListError;

    async fn fetch_page(&self, page: u32) -> Result<CatalogPage, AniListError> {
        let resp: PageResponse = self
            .graphql_request("Releasing", RELEASING_QUERY, self.listing_variables(page))
            .await?;
        let has_next = resp.page.has_next();
        Ok(CatalogPage {
            entries: resp
                .page
                .media
                .into_iter()
                .map(AniListMedia::into_entry)
                .collect(),
            has_next,
        })
    }

    async fn fetch_by_id(&self, id: u64) -> Result<Option<CatalogEntry>, AniListError> {
        let resp: MediaResponse = self
            .graphql_request("MediaById", MEDIA_BY_ID_QUERY, serde_json::json!({ "id": id }))
            .await?;
        Ok(resp.media.map(AniListMedia::into_entry))
    }

    async fn fetch_batch_by_ids(&self, ids: &[u64]) -> Result<Vec<CatalogEntry>, AniListError> {
        let mut entries = Vec::with_capacity(ids.len());
        for chunk in batch_chunks(ids) {
            let resp: PageResponse = self
                .graphql_request(
                    "MediaBatch",
                    MEDIA_BATCH_QUERY,
                    serde_json::json!({ "ids": chunk, "perPage": chunk.len() }),
                )
                .await?;
            entries.extend(resp.page.media.into_iter().map(AniListMedia::into_entry));
        }
        Ok(entries)
    }
}
