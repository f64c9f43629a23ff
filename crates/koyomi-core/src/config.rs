use serde::{Deserialize, Serialize};

use crate::error::KoyomiError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level calendar configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub view: ViewConfig,
}

/// Remote catalog settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    /// Requested listing page size. AniList clamps it to 50 and reports
    /// `hasNextPage` accordingly.
    pub per_page: u32,
    /// Entries scoring below this are dropped from the catalog.
    pub min_average_score: u32,
    /// AniList `MediaFormat` values to list.
    pub formats: Vec<String>,
}

/// Local storage keys for persisted preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub watching_key: String,
    pub links_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub days_shown: u32,
    pub loading_delay_ms: u32,
    pub log_filter: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://graphql.anilist.co".into(),
            per_page: 100,
            min_average_score: 50,
            formats: vec!["TV".into(), "TV_SHORT".into(), "ONA".into()],
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            watching_key: "watchingList".into(),
            links_key: "customAnimeLinks".into(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            days_shown: 7,
            loading_delay_ms: 300,
            log_filter: "koyomi=debug".into(),
        }
    }
}

impl CalendarConfig {
    /// Built-in defaults shipped in `config/default.toml`.
    pub fn builtin() -> Result<Self, KoyomiError> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, KoyomiError> {
        toml::from_str(s).map_err(|e| KoyomiError::Config(e.to_string()))
    }

    /// Resolve the effective config from an optional user override.
    ///
    /// A missing or blank override yields the built-in defaults.
    pub fn with_override(user: Option<&str>) -> Result<Self, KoyomiError> {
        match user.filter(|s| !s.trim().is_empty()) {
            Some(user) => Self::from_toml_str(user),
            None => Self::builtin(),
        }
    }
}
