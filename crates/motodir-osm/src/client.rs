//! HTTP client for the Overpass API.
//!
//! Wraps `reqwest` with the Overpass posting convention (raw query string as
//! a form-encoded body) and typed error handling. One call per country; no
//! retries here — transient failures surface to the orchestrator, which
//! records them and moves on.

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client, Url};

use crate::error::OsmError;
use crate::types::{OsmElement, OverpassResponse};

const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Client for the Overpass API interpreter endpoint.
///
/// Use [`OverpassClient::new`] for production or
/// [`OverpassClient::with_endpoint`] to point at a mock server in tests.
#[derive(Debug)]
pub struct OverpassClient {
    client: Client,
    endpoint: Url,
}

impl OverpassClient {
    /// Creates a client pointed at the public Overpass interpreter.
    ///
    /// # Errors
    ///
    /// Returns [`OsmError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, OsmError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, timeout_secs, user_agent)
    }

    /// Creates a client with a custom interpreter URL (for wiremock tests or
    /// a self-hosted Overpass instance).
    ///
    /// # Errors
    ///
    /// Returns [`OsmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`OsmError::InvalidEndpoint`] if `endpoint` is not
    /// a valid URL.
    pub fn with_endpoint(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, OsmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let endpoint = Url::parse(endpoint).map_err(|e| OsmError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, endpoint })
    }

    /// Runs one Overpass query and returns the raw elements.
    ///
    /// The query is posted as the request body with a form-encoded content
    /// type, matching what the interpreter expects. A response without an
    /// `elements` array yields an empty list.
    ///
    /// # Errors
    ///
    /// - [`OsmError::Http`] on network failure or a non-2xx status.
    /// - [`OsmError::Deserialize`] if the body is not the expected JSON.
    pub async fn fetch_elements(&self, query: &str) -> Result<Vec<OsmElement>, OsmError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(query.to_owned())
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let parsed: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| OsmError::Deserialize {
                context: self.endpoint.to_string(),
                source: e,
            })?;

        Ok(parsed.elements)
    }
}
