//! OMDb search client
//!
//! One GET per query against the OMDb search endpoint. The result keeps
//! "zero matches" and "request failed" apart:
//! - `Ok(vec![])`: OMDb answered `Response: "False"` (or sent no `Search`)
//! - `Ok(movies)`: the records under `Search`
//! - `Err(SearchError)`: transport failure, non-2xx status, or a body that
//!   isn't the JSON we expect

use crate::config::OmdbConfig;
use crate::movie::MovieSummary;
use serde::Deserialize;
use std::fmt;
use std::future::Future;

/// OMDb `type` filter; searches are always restricted to movies
pub const RESULT_TYPE: &str = "movie";

/// Errors that can occur during a search request
#[derive(Debug)]
pub enum SearchError {
    /// Could not reach the API (DNS, connect, timeout, body read)
    Network(String),
    /// API answered with a non-success status
    Status(u16),
    /// Body was not the expected JSON shape
    Malformed(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status(code) => write!(f, "HTTP error: status {}", code),
            Self::Malformed(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for SearchError {}

/// Anything that can answer a movie search
///
/// The session only talks to this trait, so tests can drive the whole
/// submit -> render flow with canned answers.
pub trait SearchClient: Send + Sync + 'static {
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<MovieSummary>, SearchError>> + Send;
}

/// OMDb search response envelope
#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    /// "True" or "False"
    #[serde(rename = "Response", default)]
    response: Option<String>,

    #[serde(rename = "Search", default)]
    search: Option<Vec<MovieSummary>>,

    /// Reason text when Response is "False" ("Movie not found!", ...)
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

/// Turn a response body into the search result
pub fn parse_search_body(body: &[u8]) -> Result<Vec<MovieSummary>, SearchError> {
    let parsed: OmdbSearchResponse =
        serde_json::from_slice(body).map_err(|e| SearchError::Malformed(e.to_string()))?;

    if parsed.response.as_deref() == Some("False") {
        tracing::debug!(
            "OMDb returned no results: {}",
            parsed.error.as_deref().unwrap_or("no reason given")
        );
        return Ok(Vec::new());
    }

    Ok(parsed.search.unwrap_or_default())
}

/// HTTP client for the OMDb search endpoint
pub struct OmdbClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Create a client from configuration
    ///
    /// A missing API key is not an error here; OMDb rejects the request and
    /// the user sees the network error message.
    pub fn new(config: &OmdbConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SearchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        if config.api_key.is_none() {
            tracing::warn!("No OMDb API key configured (set OMDB_API_KEY or [omdb] api_key)");
        }

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
        })
    }

    async fn fetch(&self, query: &str) -> Result<Vec<MovieSummary>, SearchError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("s", query),
                ("type", RESULT_TYPE),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        parse_search_body(&body)
    }
}

impl SearchClient for OmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, SearchError> {
        tracing::info!("Searching OMDb for {:?}", query);
        let result = self.fetch(query).await;
        match &result {
            Ok(movies) => tracing::info!("OMDb returned {} result(s)", movies.len()),
            Err(e) => tracing::error!("Fetch error: {}", e),
        }
        result
    }
}
