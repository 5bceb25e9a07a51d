use thiserror::Error;

use crate::http::HttpError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[error("element #{id} is missing from the page")]
    MissingElement { id: String },
    #[error("invalid configuration: {0}")]
    Config(String),
}
