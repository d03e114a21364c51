use thiserror::Error;

use crate::remote::Operation;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to {operation}")]
    RequestFailed { operation: Operation },

    #[error("ticket '{0}' not found")]
    NotFound(String),

    #[error("{0} already in progress")]
    Busy(&'static str),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DeckError {
    pub fn request_failed(operation: Operation) -> Self {
        DeckError::RequestFailed { operation }
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
