//! Transport and response errors

use std::time::Duration;

/// Failure talking to the RemoteTM server.
///
/// A server that answers with a JSON status object never produces one of
/// these, even when the status is `Error`; that is an ordinary
/// [`UploadResponse`](crate::UploadResponse).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a failure status and a body that is not a
    /// status object (a proxy error page, an auth failure).
    #[error("Server returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// A success status with a body that is not a status object.
    #[error("Unexpected response ({reason})")]
    Parse { reason: String, body: String },
}

impl ApiError {
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    pub fn unparsable(reason: impl ToString, body: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.to_string(),
            body: body.into(),
        }
    }

    /// Whether sending the same upload again may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::Network(_) | Self::Timeout(_) => true,
            Self::InvalidUrl(_) | Self::Parse { .. } => false,
        }
    }
}
