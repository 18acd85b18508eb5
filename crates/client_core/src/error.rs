use thiserror::Error;

/// Failure of a single backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was obtained (connection refused, DNS, timeout).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status code.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body did not have the expected shape.
    #[error("unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
    /// The configured base URL is not an absolute http(s) URL.
    #[error("invalid server url '{0}'")]
    InvalidServerUrl(String),
}

impl ApiError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text the backend supplied with a failed response, verbatim when it is
    /// not a JSON error object. `None` for failures without a response.
    pub fn backend_text(&self) -> Option<String> {
        match self {
            Self::Status { body, .. } => Some(shared::error::backend_error_text(body)),
            _ => None,
        }
    }
}
