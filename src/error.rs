use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Document decode failed: {0}")]
    Decode(String),

    #[error("Document has no readable text: {0}")]
    InputEmpty(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;
