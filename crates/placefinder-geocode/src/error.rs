use thiserror::Error;

/// Errors returned by the geocoding API client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned an `{"error": {...}}` envelope with a message.
    #[error("geocoding API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A resolve request returned an empty candidate list.
    #[error("no candidates returned for lookup key {0}")]
    NoCandidates(String),
}
