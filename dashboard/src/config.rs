//! # Dashboard Configuration
//!
//! Configuration loaded from environment variables (and a `.env` file when present).
//! Everything is validated on load so a misconfigured deployment fails fast.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `DASHBOARD_API_BASE_URL` | `http://127.0.0.1:8080/api` | Partner API root |
//! | `DASHBOARD_REQUEST_TIMEOUT_SECS` | `30` | Per-request deadline |
//! | `DASHBOARD_SEARCH_DEBOUNCE_MS` | `300` | Quiet period before a search fires |
//! | `DASHBOARD_PAGE_SIZE` | `10` | Default page size for collections |
//! | `DASHBOARD_STATE_FILE` | `.dashboard/state.json` | Persisted credentials and preferences |
//!
//! The config is a plain value owned by the composition root
//! ([`crate::app::Dashboard`]); nothing reads it from a global.

use std::path::PathBuf;
use std::time::Duration;

use lib_utils::envs::{get_env_or, get_env_parse_or};
use url::Url;

use crate::core::error::{AppError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_STATE_FILE: &str = ".dashboard/state.json";

/// Access layer configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Root every endpoint path is joined onto.
    pub api_base_url: Url,

    /// Upper bound for a single request, unless the call overrides it.
    ///
    /// Valid range: 1-300 seconds.
    pub request_timeout: Duration,

    /// Debounce delay applied to search input.
    pub search_debounce: Duration,

    /// Page size collections start with.
    pub page_size: u32,

    /// File backing the persisted key/value store.
    pub state_file: PathBuf,
}

impl Config {
    /// Config with defaults for everything but the API root.
    pub fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            page_size: shared::DEFAULT_PAGE_SIZE,
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let raw_url = get_env_or("DASHBOARD_API_BASE_URL", DEFAULT_API_BASE_URL);
        let api_base_url = Url::parse(raw_url.trim()).map_err(|e| {
            AppError::Config(format!("DASHBOARD_API_BASE_URL `{raw_url}` is not a valid URL: {e}"))
        })?;

        let timeout_secs =
            get_env_parse_or("DASHBOARD_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let debounce_ms =
            get_env_parse_or("DASHBOARD_SEARCH_DEBOUNCE_MS", DEFAULT_SEARCH_DEBOUNCE_MS)?;
        let page_size = get_env_parse_or("DASHBOARD_PAGE_SIZE", shared::DEFAULT_PAGE_SIZE)?;
        let state_file = PathBuf::from(get_env_or("DASHBOARD_STATE_FILE", DEFAULT_STATE_FILE));

        let config = Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            search_debounce: Duration::from_millis(debounce_ms),
            page_size,
            state_file,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.api_base_url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "API base URL must be http(s), got `{}`",
                self.api_base_url.scheme()
            )));
        }

        if self.api_base_url.cannot_be_a_base() {
            return Err(AppError::Config("API base URL cannot be used as a base".to_string()));
        }

        let secs = self.request_timeout.as_secs_f64();
        if !(1.0..=300.0).contains(&secs) {
            return Err(AppError::Config(
                "request timeout must be between 1 and 300 seconds".to_string(),
            ));
        }

        if self.search_debounce > Duration::from_secs(5) {
            return Err(AppError::Config(
                "search debounce must not exceed 5000 ms".to_string(),
            ));
        }

        if self.page_size == 0 || self.page_size > 500 {
            return Err(AppError::Config("page size must be between 1 and 500".to_string()));
        }

        Ok(())
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }

    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = path.into();
        self
    }
}

/// Load `.env` if present; a missing file is not an error.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to load .env"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config::new(Url::parse("https://partners.example.com/api/v1").unwrap())
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = base();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_rejects_zero_page_size() {
        assert!(base().with_page_size(0).validate().is_err());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = Config::new(Url::parse("ftp://partners.example.com/").unwrap());
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_rejects_out_of_range_timeout() {
        assert!(base()
            .with_request_timeout(Duration::from_millis(10))
            .validate()
            .is_err());
        assert!(base()
            .with_request_timeout(Duration::from_secs(600))
            .validate()
            .is_err());
    }
}
