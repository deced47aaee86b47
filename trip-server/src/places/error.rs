//! Places API error types.

/// Errors that can occur when interacting with the places API.
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check PLACES_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The destination could not be geocoded
    #[error("destination not found: {0}")]
    DestinationNotFound(String),

    /// Mock fixture data could not be loaded
    #[error("fixture error: {message}")]
    Fixture { message: String },
}
