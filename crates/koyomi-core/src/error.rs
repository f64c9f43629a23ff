use thiserror::Error;

#[derive(Debug, Error)]
pub enum KoyomiError {
    #[error("config error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
