//! Explorer configuration
//!
//! Values come from built-in defaults, then `LM_*` environment variables,
//! then command-line overrides applied by the binary.

use std::env;
use std::time::Duration;
use url::Url;

use crate::error::{ExplorerError, ExplorerResult};

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;
pub const DEFAULT_TOP_K: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    /// Base URL of the scoring service
    pub service_url: String,
    /// Quiet interval before a typed input is dispatched
    pub debounce: Duration,
    /// Upper bound on a single service call
    pub request_timeout: Duration,
    /// Maximum number of entries kept in history
    pub history_capacity: usize,
    /// Suggestions kept per smoothing variant
    pub top_k: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl ExplorerConfig {
    /// Load configuration from `LM_*` environment variables, falling back to defaults
    pub fn from_env() -> ExplorerResult<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var("LM_SERVICE_URL") {
            config.service_url = url;
        }
        if let Some(ms) = parse_env::<u64>("LM_DEBOUNCE_MS")? {
            config.debounce = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_env::<u64>("LM_REQUEST_TIMEOUT_MS")? {
            config.request_timeout = Duration::from_millis(ms);
        }
        if let Some(capacity) = parse_env::<usize>("LM_HISTORY_CAPACITY")? {
            config.history_capacity = capacity;
        }
        if let Some(top_k) = parse_env::<usize>("LM_TOP_K")? {
            config.top_k = top_k;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Reject settings the coordinator cannot run with
    pub fn validate(&self) -> ExplorerResult<()> {
        let url = Url::parse(&self.service_url)
            .map_err(|e| ExplorerError::config(format!("Invalid service URL '{}': {}", self.service_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ExplorerError::config(format!(
                "Service URL must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.history_capacity == 0 {
            return Err(ExplorerError::config("History capacity must be at least 1"));
        }
        if self.top_k == 0 {
            return Err(ExplorerError::config("Top-K must be at least 1"));
        }
        if self.request_timeout.is_zero() {
            return Err(ExplorerError::config("Request timeout must be greater than zero"));
        }
        Ok(())
    }

    /// Full URL of `path` on the configured service
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.service_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> ExplorerResult<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ExplorerError::config(format!("{name} must be a non-negative integer, got '{raw}'"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ExplorerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.history_capacity, 5);
        assert_eq!(config.top_k, 5);
    }

    #[test]
    fn test_rejects_zero_capacity_and_top_k() {
        assert!(ExplorerConfig::default().with_history_capacity(0).validate().is_err());
        assert!(ExplorerConfig::default().with_top_k(0).validate().is_err());
        assert!(ExplorerConfig::default().with_request_timeout(Duration::ZERO).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(ExplorerConfig::default().with_service_url("not a url").validate().is_err());
        assert!(ExplorerConfig::default().with_service_url("ftp://host").validate().is_err());
    }

    #[test]
    fn test_endpoint_url_joins_slashes() {
        let config = ExplorerConfig::default().with_service_url("http://localhost:5000/");
        assert_eq!(config.endpoint_url("/autocorrect"), "http://localhost:5000/autocorrect");

        let config = ExplorerConfig::default().with_service_url("http://localhost:5000/api");
        assert_eq!(config.endpoint_url("/autocomplete"), "http://localhost:5000/api/autocomplete");
    }
}
