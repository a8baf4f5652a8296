use thiserror::Error;

/// Errors returned by the Overpass API client.
#[derive(Debug, Error)]
pub enum OsmError {
    /// Network/TLS failure or non-2xx HTTP status from Overpass.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Overpass endpoint \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },
}
