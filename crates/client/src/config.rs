//! Client configuration.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_SITE_NAME: &str = "My Blog";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix every API path is resolved against.
    pub base_url: String,
    /// Applied to every request; no retries follow a timeout.
    pub timeout: Duration,
    /// Suffix of the document title, `"{route title} | {site_name}"`.
    pub site_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            site_name: DEFAULT_SITE_NAME.to_string(),
        }
    }
}

impl ClientConfig {
    /// Read configuration from the environment.
    ///
    /// Environment variables:
    /// - `BLOGFRONT_API_BASE_URL`: API prefix (default: "/api")
    /// - `BLOGFRONT_TIMEOUT_MS`: request timeout in milliseconds (default: 15000)
    /// - `BLOGFRONT_SITE_NAME`: title suffix (default: "My Blog")
    ///
    /// Browser builds have no process environment, so there the values are
    /// taken from the build environment instead.
    pub fn from_env() -> Self {
        Self::from_lookup(lookup)
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        Self {
            base_url: non_empty("BLOGFRONT_API_BASE_URL").unwrap_or(defaults.base_url),
            timeout: non_empty("BLOGFRONT_TIMEOUT_MS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),
            site_name: non_empty("BLOGFRONT_SITE_NAME").unwrap_or(defaults.site_name),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(target_arch = "wasm32")]
fn lookup(key: &str) -> Option<String> {
    let value = match key {
        "BLOGFRONT_API_BASE_URL" => option_env!("BLOGFRONT_API_BASE_URL"),
        "BLOGFRONT_TIMEOUT_MS" => option_env!("BLOGFRONT_TIMEOUT_MS"),
        "BLOGFRONT_SITE_NAME" => option_env!("BLOGFRONT_SITE_NAME"),
        _ => None,
    };
    value.map(str::to_string)
}
