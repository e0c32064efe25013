//! Error type shared by the AdSense samples.

use std::path::PathBuf;

use reqwest::StatusCode;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while authenticating or talking to the AdSense API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required input was missing or malformed. Raised before any I/O.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The stored credentials were revoked or have expired.
    #[error("the stored credentials have been revoked or expired")]
    CredentialsExpired,

    /// The token endpoint answered without an access token.
    #[error("authorization failed: {0}")]
    Authorization(String),

    /// The client secrets file could not be used.
    #[error("client secrets {}: {message}", path.display())]
    Secrets { path: PathBuf, message: String },

    /// The API answered with a non-success status.
    #[error("API request failed with status {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error(transparent)]
    OAuth(#[from] yup_oauth2::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true when the user has to re-authorize the application.
    pub fn is_credentials_expired(&self) -> bool {
        matches!(self, Error::CredentialsExpired)
    }
}
