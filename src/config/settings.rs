//! Settings structures for search-client-rs configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest page size the search API accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub suggestions: SuggestionSettings,
    pub search: SearchSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (SEARCH_CLIENT_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("SEARCH_CLIENT_API_URL") {
            self.api.base_url = val;
        }
        if let Ok(val) = std::env::var("SEARCH_CLIENT_DEBOUNCE_MS") {
            if let Ok(ms) = val.parse() {
                self.suggestions.debounce_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("SEARCH_CLIENT_PAGE_SIZE") {
            if let Ok(size) = val.parse() {
                self.search.page_size = size;
            }
        }
        if let Ok(val) = std::env::var("SEARCH_CLIENT_LOG") {
            self.logging.level = val;
        }
    }

    /// Reject settings the API or controller cannot work with
    pub fn validate(&self) -> Result<()> {
        if let Err(e) = url::Url::parse(&self.api.base_url) {
            bail!("invalid api.base_url '{}': {}", self.api.base_url, e);
        }
        if self.search.page_size == 0 || self.search.page_size > MAX_PAGE_SIZE {
            bail!(
                "search.page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE,
                self.search.page_size
            );
        }
        let timeout = self.api.request_timeout;
        if !timeout.is_finite() || timeout <= 0.0 || Duration::try_from_secs_f64(timeout).is_err()
        {
            bail!(
                "api.request_timeout must be a positive number of seconds, got {}",
                timeout
            );
        }
        Ok(())
    }
}

/// Remote search API location and transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base address of the search API
    pub base_url: String,
    /// Path of the search endpoint
    pub search_path: String,
    /// Path of the suggestions endpoint
    pub suggestions_path: String,
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Custom user agent (none = crate default)
    pub user_agent: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            search_path: "/api/search".to_string(),
            suggestions_path: "/api/suggestions".to_string(),
            request_timeout: 10.0,
            user_agent: None,
        }
    }
}

/// Autocomplete behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionSettings {
    /// Shortest query (in characters) that triggers a suggestion fetch
    pub min_query_len: usize,
    /// Quiet period after the last edit before fetching, in milliseconds
    pub debounce_ms: u64,
}

impl SuggestionSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            min_query_len: 2,
            debounce_ms: 300,
        }
    }
}

/// Search and pagination behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Results per page
    pub page_size: u32,
    /// Message shown when a search request fails
    pub error_message: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            error_message: "Failed to fetch search results. Please try again.".to_string(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, "http://localhost:8080");
        assert_eq!(settings.suggestions.min_query_len, 2);
        assert_eq!(settings.suggestions.debounce(), Duration::from_millis(300));
        assert_eq!(settings.search.page_size, 10);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = Settings::from_yaml(
            "api:\n  base_url: http://search.internal:9000\nsearch:\n  page_size: 25\n",
        )
        .unwrap();

        assert_eq!(settings.api.base_url, "http://search.internal:9000");
        assert_eq!(settings.api.search_path, "/api/search");
        assert_eq!(settings.search.page_size, 25);
        assert_eq!(settings.suggestions.debounce_ms, 300);
    }

    #[test]
    fn test_validate_page_size() {
        let mut settings = Settings::default();
        settings.search.page_size = 0;
        assert!(settings.validate().is_err());

        settings.search.page_size = MAX_PAGE_SIZE + 1;
        assert!(settings.validate().is_err());

        settings.search.page_size = MAX_PAGE_SIZE;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_request_timeout() {
        for value in [".nan", ".inf", "-.inf", "0", "-1.5", "1.0e300"] {
            let yaml = format!("api:\n  request_timeout: {}\n", value);
            let settings = Settings::from_yaml(&yaml).unwrap();
            assert!(settings.validate().is_err(), "accepted {}", value);
        }

        let settings = Settings::from_yaml("api:\n  request_timeout: 0.5\n").unwrap();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_base_url() {
        let mut settings = Settings::default();
        settings.api.base_url = "not a url".to_string();
        assert!(settings.validate().is_err());
    }
}
