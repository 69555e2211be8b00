//! Error types

/// Errors that can occur while fetching a page of artworks.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network error: the request could not be sent or completed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx HTTP response from the API.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body, if it could be read.
        body: String,
    },

    /// The response body was not JSON or was missing expected fields.
    #[error("Malformed response: {message}")]
    Malformed {
        /// Description of what failed to parse.
        message: String,
    },

    /// The configured endpoint could not be parsed as a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Creates a new malformed-response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
