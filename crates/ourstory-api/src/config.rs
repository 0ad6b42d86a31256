//! Server configuration read from the environment.

use std::net::SocketAddr;

use ourstory_generation::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

use crate::error::AppError;

/// Base URL share links use when `PUBLIC_BASE_URL` is unset.
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000/";

/// Runtime configuration for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Base URL share links are rendered under.
    pub public_base_url: String,
    /// Gemini API key; generation fails without one.
    pub gemini_api_key: Option<String>,
    /// Gemini API root.
    pub gemini_base_url: String,
    /// Gemini model name.
    pub gemini_model: String,
    /// OTLP collector endpoint; span export is off without one.
    pub otlp_endpoint: Option<String>,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value is invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let database_url = get("DATABASE_URL").ok_or_else(|| {
            AppError::Config("DATABASE_URL environment variable must be set".into())
        })?;
        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };
        let public_base_url =
            get("PUBLIC_BASE_URL").unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_owned());
        if !(public_base_url.starts_with("http://") || public_base_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "PUBLIC_BASE_URL must be an http(s) URL, got {public_base_url}"
            )));
        }

        Ok(Self {
            database_url,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port,
            public_base_url,
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            otlp_endpoint: get("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST` and `PORT` do not form a valid
    /// socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_only_database_url_is_set() {
        // Act
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/ourstory")]).unwrap();

        // Assert
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.public_base_url, DEFAULT_PUBLIC_BASE_URL);
        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.gemini_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.gemini_model, DEFAULT_MODEL);
        assert_eq!(config.otlp_endpoint, None);
    }

    #[test]
    fn test_missing_database_url_is_a_config_error() {
        let result = config_from(&[("PORT", "8080")]);

        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("DATABASE_URL")));
    }

    #[test]
    fn test_invalid_port_is_a_config_error() {
        let result = config_from(&[("DATABASE_URL", "postgres://db"), ("PORT", "eighty")]);

        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("PORT")));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("GEMINI_API_KEY", "  "),
            ("HOST", ""),
        ])
        .unwrap();

        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_public_base_url_must_be_http() {
        let result = config_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("PUBLIC_BASE_URL", "ourstory.example"),
        ]);

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_socket_addr_combines_host_and_port() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
    }
}
