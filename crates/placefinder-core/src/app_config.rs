/// Application configuration, loaded once at startup.
///
/// Every constant the behavior depends on is a named field here rather than
/// module-level state: the API credential, the suggestion bias location, the
/// result cap, and the debounce interval all arrive through this struct.
#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub geocode_base_url: String,
    pub bias_longitude: f64,
    pub bias_latitude: f64,
    pub max_suggestions: usize,
    pub debounce_ms: u64,
    pub request_timeout_secs: u64,
    pub log_level: String,
    /// When set, re-rank fetched suggestions with the local fuzzy filter
    /// before display. Replaces the two historical widget variants (with and
    /// without client-side filtering) with a single toggle.
    pub refine_locally: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"[redacted]")
            .field("geocode_base_url", &self.geocode_base_url)
            .field("bias_longitude", &self.bias_longitude)
            .field("bias_latitude", &self.bias_latitude)
            .field("max_suggestions", &self.max_suggestions)
            .field("debounce_ms", &self.debounce_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .field("refine_locally", &self.refine_locally)
            .finish()
    }
}
