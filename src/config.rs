use std::time::Duration;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::constants::{
    DEFAULT_CORS_ORIGINS, DEFAULT_DAILY_THEMES, DEFAULT_SEARCH_TERMS, YOUTUBE_API_BASE_URL,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // YouTube Data API
    pub youtube_api_key: String,
    pub youtube_api_base_url: String,
    pub http_timeout: Duration,

    // Web Server
    pub web_host: String,
    pub web_port: u16,
    pub cors_origins: Vec<String>,

    // Round Generation
    pub search_terms: Vec<String>,
    pub daily_themes: Vec<String>,
    pub guess_max_attempts: u32,
    pub ranking_max_attempts: u32,

    // Round Store
    pub round_cache_capacity: usize,
    /// `None` disables wall-clock expiry; rounds then only leave by eviction.
    pub round_ttl: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let ttl_secs = parse_env_u64("ROUND_TTL_SECS", 0)?;

        Ok(Self {
            // YouTube Data API
            youtube_api_key: required_env("YOUTUBE_API_KEY")?,
            youtube_api_base_url: env_or_default("YOUTUBE_API_BASE_URL", YOUTUBE_API_BASE_URL),
            http_timeout: Duration::from_secs(parse_env_u64("HTTP_TIMEOUT_SECS", 10)?),

            // Web Server
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 8000)?,
            cors_origins: parse_env_list("CORS_ORIGINS", DEFAULT_CORS_ORIGINS),

            // Round Generation
            search_terms: parse_env_list("SEARCH_TERMS", DEFAULT_SEARCH_TERMS),
            daily_themes: parse_env_list("DAILY_THEMES", DEFAULT_DAILY_THEMES),
            guess_max_attempts: parse_env_u32("GUESS_MAX_ATTEMPTS", 25)?,
            ranking_max_attempts: parse_env_u32("RANKING_MAX_ATTEMPTS", 10)?,

            // Round Store
            round_cache_capacity: parse_env_usize("ROUND_CACHE_CAPACITY", 50)?,
            round_ttl: (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs)),
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.youtube_api_key.is_empty() {
            return Err(invalid("YOUTUBE_API_KEY", "cannot be empty"));
        }
        if self.http_timeout.is_zero() {
            return Err(invalid("HTTP_TIMEOUT_SECS", "must be at least 1"));
        }
        if self.round_cache_capacity == 0 {
            return Err(invalid("ROUND_CACHE_CAPACITY", "must be at least 1"));
        }
        if self.guess_max_attempts == 0 {
            return Err(invalid("GUESS_MAX_ATTEMPTS", "must be at least 1"));
        }
        if self.ranking_max_attempts == 0 {
            return Err(invalid("RANKING_MAX_ATTEMPTS", "must be at least 1"));
        }
        if self.search_terms.is_empty() {
            return Err(invalid("SEARCH_TERMS", "cannot be empty"));
        }
        if self.daily_themes.is_empty() {
            return Err(invalid("DAILY_THEMES", "cannot be empty"));
        }
        if let Some(origin) = self
            .cors_origins
            .iter()
            .find(|o| o.parse::<HeaderValue>().is_err())
        {
            return Err(invalid(
                "CORS_ORIGINS",
                &format!("'{origin}' is not a valid origin"),
            ));
        }
        Ok(())
    }
}

fn invalid(name: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        message: message.to_string(),
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parse a comma-separated list, dropping blank entries.
fn parse_env_list(name: &str, default: &[&str]) -> Vec<String> {
    match std::env::var(name) {
        Ok(val) if !val.trim().is_empty() => split_list(&val),
        _ => default.iter().map(ToString::to_string).collect(),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u32(name: &str, default: u32) -> Result<u32, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "YOUTUBE_API_KEY",
        "YOUTUBE_API_BASE_URL",
        "HTTP_TIMEOUT_SECS",
        "WEB_HOST",
        "WEB_PORT",
        "CORS_ORIGINS",
        "SEARCH_TERMS",
        "DAILY_THEMES",
        "GUESS_MAX_ATTEMPTS",
        "RANKING_MAX_ATTEMPTS",
        "ROUND_CACHE_CAPACITY",
        "ROUND_TTL_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" cats, dogs ,,pranks "), vec!["cats", "dogs", "pranks"]);
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    #[serial]
    fn test_missing_api_key() {
        clear_env();
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref name) if name == "YOUTUBE_API_KEY"));
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        std::env::set_var("YOUTUBE_API_KEY", "test-key");

        let config = Config::from_env().unwrap();
        config.validate().unwrap();

        assert_eq!(config.youtube_api_base_url, YOUTUBE_API_BASE_URL);
        assert_eq!(config.round_cache_capacity, 50);
        assert_eq!(config.ranking_max_attempts, 10);
        assert_eq!(config.web_port, 8000);
        assert!(config.round_ttl.is_none());
        assert_eq!(config.search_terms.len(), DEFAULT_SEARCH_TERMS.len());
        assert_eq!(config.cors_origins.len(), DEFAULT_CORS_ORIGINS.len());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_overrides_and_validation() {
        clear_env();
        std::env::set_var("YOUTUBE_API_KEY", "test-key");
        std::env::set_var("SEARCH_TERMS", "cats,dogs");
        std::env::set_var("ROUND_TTL_SECS", "600");
        std::env::set_var("ROUND_CACHE_CAPACITY", "0");

        let config = Config::from_env().unwrap();
        assert_eq!(config.search_terms, vec!["cats", "dogs"]);
        assert_eq!(config.round_ttl, Some(Duration::from_secs(600)));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref name, .. }) if name == "ROUND_CACHE_CAPACITY"
        ));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_zero_http_timeout_rejected() {
        clear_env();
        std::env::set_var("YOUTUBE_API_KEY", "test-key");
        std::env::set_var("HTTP_TIMEOUT_SECS", "0");

        let config = Config::from_env().unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref name, .. }) if name == "HTTP_TIMEOUT_SECS"
        ));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_bad_integer() {
        clear_env();
        std::env::set_var("YOUTUBE_API_KEY", "test-key");
        std::env::set_var("WEB_PORT", "not-a-port");

        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::ParseInt { ref name, .. }) if name == "WEB_PORT"
        ));

        clear_env();
    }
}
