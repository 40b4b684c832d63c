use thiserror::Error;

/// Failure reported by a store client. The message is the only signal the
/// UI gets, so it is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        StoreError {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Invalid receipt file: {0}")]
    Validation(String),
    #[error("Session: {0}")]
    Session(String),
    #[error("Settings: {0}")]
    Settings(String),
    #[error("{0} lock poisoned")]
    Lock(&'static str),
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
