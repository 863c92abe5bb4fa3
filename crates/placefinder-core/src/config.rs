use crate::app_config::AppConfig;
use crate::ConfigError;

/// Default base URL of the geocoding service.
pub const DEFAULT_GEOCODE_BASE_URL: &str =
    "https://geocode-api.arcgis.com/arcgis/rest/services/World/GeocodeServer";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => match raw.as_str() {
                "1" | "true" | "yes" => Ok(true),
                "0" | "false" | "no" => Ok(false),
                other => Err(ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: format!("expected a boolean, got '{other}'"),
                }),
            },
        }
    };

    let api_key = require("ARCGIS_API_KEY")?;
    let geocode_base_url = or_default("PLACEFINDER_GEOCODE_BASE_URL", DEFAULT_GEOCODE_BASE_URL);
    let bias_longitude = parse_f64("PLACEFINDER_BIAS_LON", "-116.539247")?;
    let bias_latitude = parse_f64("PLACEFINDER_BIAS_LAT", "33.825993")?;
    let max_suggestions = parse_usize("PLACEFINDER_MAX_SUGGESTIONS", "5")?;
    let debounce_ms = parse_u64("PLACEFINDER_DEBOUNCE_MS", "300")?;
    let request_timeout_secs = parse_u64("PLACEFINDER_REQUEST_TIMEOUT_SECS", "30")?;
    let log_level = or_default("PLACEFINDER_LOG_LEVEL", "info");
    let refine_locally = parse_bool("PLACEFINDER_REFINE_LOCALLY", false)?;

    Ok(AppConfig {
        api_key,
        geocode_base_url,
        bias_longitude,
        bias_latitude,
        max_suggestions,
        debounce_ms,
        request_timeout_secs,
        log_level,
        refine_locally,
    })
}
