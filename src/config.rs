//! Router configuration

use crate::error::RouterError;
use std::time::Duration;
use url::Url;

/// Settings for a [`Router`](crate::Router) and its [`Navigator`](crate::Navigator).
///
/// # Example
///
/// ```
/// use pathnav::RouterConfig;
/// use std::time::Duration;
///
/// let config = RouterConfig::new()
///     .origin("https://app.example.com")
///     .root("/home")
///     .poll_interval(Duration::from_millis(100));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Base URL relative paths are resolved against
    pub origin: String,
    /// Path used at startup when the host location has none
    pub root: Option<String>,
    /// Start with dispatch disabled
    pub silent: bool,
    /// Tick interval for hosts without native change notification
    pub poll_interval: Duration,
    /// Fall back to hash navigation when the host has no history API
    pub hash_fallback: bool,
    /// Maximum nested dispatch requests drained after one dispatch
    pub max_deferred: usize,
    /// Capacity of the parsed path cache
    pub cache_capacity: usize,
}

impl RouterConfig {
    pub const DEFAULT_ORIGIN: &'static str = "http://localhost";
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);
    pub const DEFAULT_MAX_DEFERRED: usize = 32;
    pub const DEFAULT_CACHE_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn hash_fallback(mut self, enabled: bool) -> Self {
        self.hash_fallback = enabled;
        self
    }

    pub fn max_deferred(mut self, max: usize) -> Self {
        self.max_deferred = max;
        self
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Parse the origin into the base URL used for matching
    pub fn base_url(&self) -> Result<Url, RouterError> {
        Url::parse(&self.origin).map_err(|source| RouterError::InvalidOrigin {
            origin: self.origin.clone(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), RouterError> {
        self.base_url().map(|_| ())
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            origin: Self::DEFAULT_ORIGIN.to_string(),
            root: None,
            silent: false,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            hash_fallback: false,
            max_deferred: Self::DEFAULT_MAX_DEFERRED,
            cache_capacity: Self::DEFAULT_CACHE_CAPACITY,
        }
    }
}
