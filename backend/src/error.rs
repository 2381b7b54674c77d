use thiserror::Error;

/// Errors surfaced by the chore board library
#[derive(Debug, Error)]
pub enum ChoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("assignment not found: {0}")]
    NotFound(i64),

    #[error("chat transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    InvalidStatus(#[from] shared::ChoreStatusError),

    #[error("invalid weekday key: {0}")]
    InvalidWeekday(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("job failed: {0}")]
    Job(String),
}

// Request URLs carry the bot token, so they are stripped before display
impl From<reqwest::Error> for ChoreError {
    fn from(e: reqwest::Error) -> Self {
        ChoreError::Transport(e.without_url().to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChoreError>;
