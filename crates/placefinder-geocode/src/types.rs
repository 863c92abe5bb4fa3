//! Geocoding API response types.
//!
//! All types model the JSON structures returned by the geocoding REST
//! service. Unlike most REST APIs, application-level failures arrive with an
//! HTTP 200 status and an `{"error": {"code", "message"}}` envelope; the
//! client checks for that envelope before deserializing into these types.

use serde::Deserialize;

use placefinder_core::Suggestion;

/// Response body of the `suggest` endpoint:
/// `{ "suggestions": [{ "text", "magicKey", ... }] }`.
#[derive(Debug, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<Suggestion>,
}

/// Response body of the `findAddressCandidates` endpoint.
#[derive(Debug, Deserialize)]
pub struct CandidatesResponse {
    pub candidates: Vec<Candidate>,
}

/// A single geocoding candidate. Only the first one is used when resolving
/// a suggestion.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub address: String,
    pub location: ServicePoint,
    #[serde(default)]
    pub score: Option<f64>,
}

/// A coordinate pair in the service's native axis order: `x` is longitude,
/// `y` is latitude.
#[derive(Debug, Deserialize)]
pub struct ServicePoint {
    pub x: f64,
    pub y: f64,
}
