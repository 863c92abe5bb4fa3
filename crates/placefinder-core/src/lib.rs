//! Shared domain types and configuration for the placefinder workspace.

use thiserror::Error;

mod app_config;
mod config;
mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_GEOCODE_BASE_URL};
pub use types::{ResolvedAddress, SuggestState, Suggestion};

/// Errors produced while loading [`AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
