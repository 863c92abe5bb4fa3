//! HTTP client for the geocoding REST service.
//!
//! Wraps `reqwest` with service-specific error handling, API key management,
//! and typed response deserialization. The service reports application-level
//! failures inside an `{"error": {...}}` envelope with HTTP 200; every
//! endpoint checks that envelope and surfaces it as [`GeocodeError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};

use placefinder_core::{ResolvedAddress, Suggestion, DEFAULT_GEOCODE_BASE_URL};

use crate::error::GeocodeError;
use crate::types::{CandidatesResponse, SuggestResponse};

/// Client for the geocoding REST service.
///
/// Manages the HTTP client, API key, and endpoint URLs. Use
/// [`GeocodeClient::new`] for production or [`GeocodeClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeocodeClient {
    client: Client,
    api_key: String,
    suggest_url: Url,
    candidates_url: Url,
}

impl GeocodeClient {
    /// Creates a new client pointed at the production geocoding service.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_GEOCODE_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("placefinder/0.1 (address-autocomplete)")
            .build()?;

        // Normalise: exactly one trailing slash so that join() appends the
        // endpoint as a new path segment rather than replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parse = |endpoint: &str| -> Result<Url, GeocodeError> {
            Url::parse(&normalised)
                .and_then(|u| u.join(endpoint))
                .map_err(|e| GeocodeError::Api(format!("invalid base URL '{base_url}': {e}")))
        };

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            suggest_url: parse("suggest")?,
            candidates_url: parse("findAddressCandidates")?,
        })
    }

    /// Fetches autocomplete suggestions for a free-text query.
    ///
    /// `bias` is a `(longitude, latitude)` hint that prioritizes nearby
    /// results; `max_suggestions` caps the result count. The returned order
    /// is the service's relevance order, preserved as-is.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Api`] if the service returns an error envelope.
    /// - [`GeocodeError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GeocodeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn suggest(
        &self,
        text: &str,
        bias: (f64, f64),
        max_suggestions: usize,
    ) -> Result<Vec<Suggestion>, GeocodeError> {
        let (lon, lat) = bias;
        let url = self.build_url(
            &self.suggest_url,
            &[
                ("text", text),
                ("location", &format!("{lon},{lat}")),
                ("maxSuggestions", &max_suggestions.to_string()),
            ],
        );
        tracing::debug!(text, max_suggestions, "dispatching suggest request");
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        let parsed: SuggestResponse =
            serde_json::from_value(body).map_err(|e| GeocodeError::Deserialize {
                context: format!("suggest(text={text})"),
                source: e,
            })?;

        Ok(parsed.suggestions)
    }

    /// Resolves a suggestion's lookup key to a full address with coordinates.
    ///
    /// Requests exactly one candidate (`maxLocations=1`) and uses the first
    /// entry of the returned list. The service reports coordinates as
    /// `(x=lon, y=lat)`; the returned [`ResolvedAddress`] carries them as
    /// named `latitude` / `longitude` fields.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::NoCandidates`] if the candidate list is empty.
    /// - [`GeocodeError::Api`] if the service returns an error envelope.
    /// - [`GeocodeError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GeocodeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn resolve(&self, suggestion: &Suggestion) -> Result<ResolvedAddress, GeocodeError> {
        let url = self.build_url(
            &self.candidates_url,
            &[
                ("magicKey", suggestion.magic_key.as_str()),
                ("maxLocations", "1"),
            ],
        );
        tracing::debug!(magic_key = %suggestion.magic_key, "dispatching resolve request");
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        let parsed: CandidatesResponse =
            serde_json::from_value(body).map_err(|e| GeocodeError::Deserialize {
                context: format!("findAddressCandidates(magicKey={})", suggestion.magic_key),
                source: e,
            })?;

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoCandidates(suggestion.magic_key.clone()))?;

        Ok(ResolvedAddress {
            address: candidate.address,
            latitude: candidate.location.y,
            longitude: candidate.location.x,
        })
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters. Every request carries `f=json` and the API token.
    fn build_url(&self, endpoint: &Url, extra: &[(&str, &str)]) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("f", "json");
            pairs.append_pair("token", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] on network failure or a non-2xx status.
    /// Returns [`GeocodeError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, GeocodeError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
            context: url.path().to_owned(),
            source: e,
        })
    }

    /// Checks for the service's error envelope and returns an error if
    /// present. The service uses HTTP 200 even for auth failures.
    fn check_api_error(body: &serde_json::Value) -> Result<(), GeocodeError> {
        if let Some(error) = body.get("error") {
            let msg = error
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(GeocodeError::Api(msg));
        }
        Ok(())
    }
}
