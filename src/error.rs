use thiserror::Error;

use crate::validate::ValidationErrors;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid immunity category: {0:?}")]
    InvalidCategory(String),
    #[error("request failed validation:\n{0}")]
    Validation(ValidationErrors),
    #[error("invalid request payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
