//! Domain types shared across the workspace.

use serde::{Deserialize, Serialize};

/// A single autocomplete suggestion returned by the geocoding service.
///
/// `magic_key` is an opaque lookup key; it is only meaningful when passed
/// back to the same service's resolve endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    #[serde(rename = "magicKey")]
    pub magic_key: String,
}

/// A suggestion resolved to a full address with coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl std::fmt::Display for ResolvedAddress {
    /// Renders latitude before longitude, regardless of the service's
    /// native `(x=lon, y=lat)` axis order.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Address: {}\nLat/Long: [{}, {}]",
            self.address, self.latitude, self.longitude
        )
    }
}

/// Live state of a suggestion session. Exactly one variant is visible at a
/// time; transitions happen only inside the session task.
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestState {
    /// No query yet, or the query was cleared to empty. The UI prompt state.
    Idle,
    /// A debounced request has been dispatched and has not completed.
    Loading,
    /// The most recent request succeeded, in service relevance order.
    Ready(Vec<Suggestion>),
    /// The most recent request failed with this message.
    Failed(String),
}

impl SuggestState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, SuggestState::Loading)
    }
}
