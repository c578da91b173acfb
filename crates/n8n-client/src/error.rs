//! Client error types.

use thiserror::Error;

/// Errors returned by every n8n client call.
///
/// None of these are raised past the client boundary as panics; callers
/// always receive them as values.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The backend answered 2xx but the body was not the expected JSON.
    #[error("Invalid response body (status {status}): {message}")]
    Decode { status: u16, message: String },
}

impl ClientError {
    /// Build an API error with the server's response body.
    pub fn api(status: u16, body: impl AsRef<str>) -> Self {
        ClientError::Api {
            status,
            message: format!("API Error: {} - {}", status, body.as_ref()),
        }
    }

    /// Numeric status: 0 for transport failures, otherwise the HTTP status.
    pub fn status(&self) -> u16 {
        match self {
            ClientError::Transport(_) => 0,
            ClientError::Api { status, .. } | ClientError::Decode { status, .. } => *status,
        }
    }

    /// True for failures where no response was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) if e.is_decode() => ClientError::Decode {
                status: status.as_u16(),
                message: e.to_string(),
            },
            Some(status) => ClientError::api(status.as_u16(), e.to_string()),
            None => ClientError::Transport(e.to_string()),
        }
    }
}

/// Result type alias for client calls.
pub type ApiResult<T> = Result<T, ClientError>;
