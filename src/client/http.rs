/// Query endpoint client implementation.
///
/// This module provides `QueryClient` for posting questions to the Q&A backend,
/// along with its error type and a builder for configuration.
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use super::types::{QueryRequest, QueryResponse};

/// Endpoint used when neither the builder nor the environment provides one.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/query";

/// Environment variable consulted for the endpoint URL.
const ENDPOINT_ENV: &str = "ASKDOCS_ENDPOINT";

/// Errors that can occur when querying the backend.
///
/// Every variant is a failed query from the user's point of view; the
/// variants only exist to make the diagnostic log useful.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Network-related errors (connection refused, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The configured request timeout elapsed
    #[error("Request timed out")]
    Timeout(#[source] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// Response body was not `{ "answer": string }`
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Invalid endpoint configuration
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request was abandoned before a result was produced
    #[error("Query was interrupted before a response arrived")]
    Interrupted,
}

impl QueryError {
    fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error)
        } else {
            Self::Network(error)
        }
    }
}

/// Builder for constructing `QueryClient` instances.
///
/// # Examples
///
/// ```
/// use askdocs::client::QueryClientBuilder;
///
/// let client = QueryClientBuilder::new()
///     .endpoint("http://localhost:8000/query")
///     .build()
///     .expect("Failed to create client");
/// assert_eq!(client.endpoint(), "http://localhost:8000/query");
/// ```
#[derive(Debug, Default)]
pub struct QueryClientBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl QueryClientBuilder {
    /// Creates a new `QueryClientBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the full URL of the query endpoint.
    ///
    /// # Arguments
    ///
    /// * `url` - The endpoint URL (e.g., "http://localhost:8000/query")
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Sets an overall request timeout.
    ///
    /// Without one the client waits for the backend indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the `QueryClient` with the configured settings.
    ///
    /// # Environment Variables
    ///
    /// If `endpoint()` was not called, this method will check the
    /// `ASKDOCS_ENDPOINT` environment variable. If not set, it defaults to
    /// `http://localhost:8000/query`.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidUrl` if the endpoint does not parse, or
    /// `QueryError::Network` if the underlying HTTP client cannot be created.
    pub fn build(self) -> Result<QueryClient, QueryError> {
        let endpoint = match self.endpoint {
            Some(url) => url,
            None => std::env::var(ENDPOINT_ENV).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
        };

        reqwest::Url::parse(&endpoint)
            .map_err(|e| QueryError::InvalidUrl(format!("{endpoint}: {e}")))?;

        // The blocking client defaults to a 30s timeout; an explicit None disables it.
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(self.timeout)
            .build()
            .map_err(QueryError::Network)?;

        Ok(QueryClient {
            client,
            endpoint,
            timeout: self.timeout,
        })
    }
}

/// Blocking HTTP client for the `/query` endpoint.
///
/// Issues exactly one POST per call. There is no retry and no caching.
/// It should be constructed using `QueryClientBuilder`.
#[derive(Debug, Clone)]
pub struct QueryClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    timeout: Option<Duration>,
}

/// Trait for query backend operations.
///
/// This trait enables mocking in unit tests and lets the form submit through
/// any backend implementation.
pub trait QueryClientTrait: Send + Sync {
    /// Sends `query` to the backend and returns its answer.
    ///
    /// # Errors
    ///
    /// Returns a `QueryError` for transport failures, non-2xx statuses and
    /// bodies that do not carry a string `answer`.
    fn query(&self, query: &str) -> Result<String, QueryError>;
}

impl QueryClient {
    /// Returns the endpoint URL configured for this client.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the request timeout, if one was configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn query_internal(&self, query: &str) -> Result<String, QueryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&QueryRequest { query })
            .send()
            .map_err(QueryError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(QueryError::from_transport)?;
        debug!(status = status.as_u16(), bytes = body.len(), "received query response");

        let parsed: QueryResponse =
            serde_json::from_str(&body).map_err(QueryError::Serialization)?;
        Ok(parsed.answer)
    }
}

impl QueryClientTrait for QueryClient {
    fn query(&self, query: &str) -> Result<String, QueryError> {
        self.query_internal(query)
    }
}
