//! Client configuration.

/// Environment variable that overrides the backend base URL.
pub const BASE_URL_ENV: &str = "REPORT_API_BASE_URL";

/// Base URL used when [`BASE_URL_ENV`] is unset or empty.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Connection settings for [`crate::ReportApiClient`].
///
/// Resolved once at startup and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Creates a configuration for the given base URL.
    ///
    /// Trailing `/` characters are trimmed so endpoint paths can be appended
    /// directly.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Reads the base URL from [`BASE_URL_ENV`], falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the configuration through `lookup` instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(BASE_URL_ENV) {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
