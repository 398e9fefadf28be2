//! Application Configuration Module
//!
//! Loads settings for the minutes bot from the environment (and a `.env` file
//! when present) into a single struct handed to the rest of the program.

use minutes_core::ModelSettings;
use minutes_core::model::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT};
use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// Holds all configuration loaded from the environment.
#[derive(Debug)]
pub struct Config {
    pub openai_api_key: SecretString,
    pub base_url: String,
    pub chat_model: String,
    pub temperature: f32,
    pub request_timeout: Duration,
    pub prompts_dir: Option<PathBuf>,
    pub log_level: Level,
}

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// *   `OPENAI_API_KEY`: Secret key for the chat completions API. Required.
    /// *   `OPENAI_BASE_URL`: (Optional) API root. Defaults to `https://api.openai.com/v1`.
    /// *   `CHAT_MODEL`: (Optional) Model used for both phases. Defaults to "gpt-4o-mini".
    /// *   `CHAT_TEMPERATURE`: (Optional) Sampling temperature between 0 and 2. Defaults to 0.7.
    /// *   `REQUEST_TIMEOUT_SECS`: (Optional) Per-request timeout. Defaults to 60.
    /// *   `PROMPTS_DIR`: (Optional) Directory of `.md` prompt overrides.
    /// *   `RUST_LOG`: (Optional) The logging level. Defaults to "INFO".
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file. Ignored if not present.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingVar("OPENAI_API_KEY".to_string()))?;

        let base_url = lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let chat_model = lookup("CHAT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = match lookup("CHAT_TEMPERATURE") {
            Some(raw) => raw
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|t| (0.0..=2.0).contains(t))
                .ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "CHAT_TEMPERATURE".to_string(),
                        format!("'{raw}' is not a number between 0 and 2"),
                    )
                })?,
            None => DEFAULT_TEMPERATURE,
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "REQUEST_TIMEOUT_SECS".to_string(),
                        format!("'{raw}' is not a positive number of seconds"),
                    )
                })?,
            None => DEFAULT_TIMEOUT,
        };

        let prompts_dir = lookup("PROMPTS_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{log_level_str}' is not a valid log level"),
            )
        })?;

        Ok(Self {
            openai_api_key,
            base_url,
            chat_model,
            temperature,
            request_timeout,
            prompts_dir,
            log_level,
        })
    }

    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            base_url: self.base_url.clone(),
            model: self.chat_model.clone(),
            temperature: self.temperature,
            timeout: self.request_timeout,
        }
    }
}
