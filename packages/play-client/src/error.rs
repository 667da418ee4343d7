use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("review service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid review payload: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlayError>;
