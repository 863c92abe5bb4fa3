//! Typed HTTP client for the geocoding REST service.
//!
//! Two endpoints are wrapped: `suggest` (free-text autocomplete) and
//! `findAddressCandidates` (resolving a suggestion's lookup key to a full
//! address with coordinates).

mod client;
mod error;
mod types;

pub use client::GeocodeClient;
pub use error::GeocodeError;
pub use types::{Candidate, CandidatesResponse, ServicePoint, SuggestResponse};
