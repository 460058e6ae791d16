use std::io;

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid editor options: {0}")]
    Invalid(String),
}

pub type OptionsResult<T> = Result<T, OptionsError>;
