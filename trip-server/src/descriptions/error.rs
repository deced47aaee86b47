//! Description API error types.

/// Errors that can occur when fetching place descriptions.
#[derive(Debug, thiserror::Error)]
pub enum DescriptionError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check DESCRIPTIONS_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The configured base URL is unusable
    #[error("invalid base URL: {0}")]
    BaseUrl(String),
}
