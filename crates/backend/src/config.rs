//! Backend connection settings.

use std::time::Duration;

/// Where the REST backend lives and how the client talks to it.
///
/// Built by each binary's config loader from `BACKEND_URL`,
/// `BACKEND_TIMEOUT_SECS` and `CATALOG_CACHE_TTL_SECS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL, e.g. `http://localhost:8080` or `http://api.internal/api`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// How long category and product listings stay cached. Zero disables caching.
    pub cache_ttl: Duration,
}

impl BackendConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default catalog cache TTL.
    pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

    /// Config with default timeout and cache TTL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Self::DEFAULT_TIMEOUT,
            cache_ttl: Self::DEFAULT_CACHE_TTL,
        }
    }

    /// Same config with caching turned off.
    #[must_use]
    pub const fn without_cache(mut self) -> Self {
        self.cache_ttl = Duration::ZERO;
        self
    }
}
