//! services/dashboard/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// The single API origin for all calls. The deployment historically exposed
/// two spellings of this host; the client pins one and treats the other as a
/// misconfiguration.
pub const DEFAULT_API_BASE_URL: &str = "https://zuhr-star-production.up.railway.app";

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub log_level: Level,
    /// Optional credentials for a non-interactive login at startup.
    pub student_phone: Option<String>,
    pub student_password: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "API_BASE_URL".to_string(),
                format!("'{}' is not an http(s) origin", api_base_url),
            ));
        }
        // A trailing slash would double up when endpoint paths are appended.
        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        let session_file = std::env::var("SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./persist-root.json"));

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Credentials (as optional) ---
        let student_phone = std::env::var("STUDENT_PHONE").ok();
        let student_password = std::env::var("STUDENT_PASSWORD").ok();

        Ok(Self {
            api_base_url,
            session_file,
            log_level,
            student_phone,
            student_password,
        })
    }
}
