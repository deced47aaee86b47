//! Place description client.
//!
//! Fetches a short summary paragraph for a named place, shaped around
//! the Wikipedia REST summary endpoint. Descriptions are strictly
//! nice-to-have: a place the encyclopedia does not know is `Ok(None)`,
//! not an error.

use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;

use super::error::DescriptionError;

/// Default base URL for the description API (Wikipedia REST).
const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/api/rest_v1/page";

/// Summary response - we only need the extract text.
#[derive(Debug, Deserialize)]
struct SummaryDto {
    #[serde(default)]
    extract: Option<String>,
}

/// Configuration for the description client.
#[derive(Debug, Clone)]
pub struct DescriptionClientConfig {
    /// Optional API key sent as an x-apikey header
    pub api_key: Option<String>,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DescriptionClientConfig {
    /// Create a new config. The public endpoint needs no key.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Authenticate requests with an API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for DescriptionClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the description API.
#[derive(Debug, Clone)]
pub struct DescriptionClient {
    http: reqwest::Client,
    base: Url,
}

impl DescriptionClient {
    /// Create a new description client.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the base URL does not parse or the API key
    /// is not a valid header value.
    pub fn new(config: DescriptionClientConfig) -> Result<Self, DescriptionError> {
        let base =
            Url::parse(&config.base_url).map_err(|e| DescriptionError::BaseUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(DescriptionError::BaseUrl(config.base_url));
        }

        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|_| DescriptionError::Api {
                status: 0,
                message: "invalid API key format".to_string(),
            })?;
            headers.insert(HeaderName::from_static("x-apikey"), value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base })
    }

    /// The summary URL for a place name.
    ///
    /// Names map to article titles the Wikipedia way: trimmed, spaces
    /// replaced with underscores, everything else percent-encoded.
    fn summary_url(&self, name: &str) -> Result<Url, DescriptionError> {
        let title = name.trim().replace(' ', "_");

        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| DescriptionError::BaseUrl(self.base.to_string()))?
            .push("summary")
            .push(&title);

        Ok(url)
    }

    /// Fetch a short description for a place by name.
    ///
    /// Returns `Ok(None)` when there is no article for the name or the
    /// article has no extract; both are normal for obscure places.
    ///
    /// # Errors
    ///
    /// Returns `Err` for transport, auth and parse failures.
    pub async fn fetch(&self, name: &str) -> Result<Option<String>, DescriptionError> {
        let url = self.summary_url(name)?;

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DescriptionError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DescriptionError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let summary: SummaryDto =
            serde_json::from_str(&body).map_err(|e| DescriptionError::Json {
                message: e.to_string(),
            })?;

        Ok(normalize(summary.extract))
    }
}

/// Collapse blank extracts to `None`.
fn normalize(extract: Option<String>) -> Option<String> {
    let text = extract?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
