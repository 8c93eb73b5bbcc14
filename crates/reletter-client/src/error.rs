use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("No access token available")]
    MissingCredential,

    #[error("Invalid access token: {0}")]
    InvalidCredential(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Credential problems halt the page before any network call and prompt
    /// the viewer to log in.
    pub fn is_credential(&self) -> bool {
        matches!(self, Self::MissingCredential | Self::InvalidCredential(_))
    }
}
