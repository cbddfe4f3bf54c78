//! Client configuration and credentials.
//!
//! Credentials are injected explicitly at composition time; clients never
//! read ambient process state themselves. `from_env()` exists for the
//! embedding service's convenience and is the only place the environment
//! is consulted.

use std::time::Duration;

/// Base URL of the hosting API.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// User-Agent sent with every request (the API rejects anonymous agents).
pub const DEFAULT_USER_AGENT: &str = "skillsync";

/// Default budget for a live resync before falling back to the cache.
pub const DEFAULT_RESYNC_TIMEOUT: Duration = Duration::from_millis(5000);

/// Environment variable holding the optional API bearer token.
pub const TOKEN_ENV_VAR: &str = "SKILLSYNC_GITHUB_TOKEN";

/// Configuration shared by the hosting client and the archive fetcher.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// API base URL, without a trailing slash.
    pub api_base: String,
    /// Optional bearer token. Unauthenticated requests work but are
    /// rate-limited much more aggressively by the API.
    pub token: Option<String>,
    /// User-Agent header value.
    pub user_agent: String,
    /// Budget for a live resync before falling back to the cache.
    pub resync_timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base: GITHUB_API_BASE.to_string(),
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            resync_timeout: DEFAULT_RESYNC_TIMEOUT,
        }
    }
}

impl SourceConfig {
    /// Create a configuration with an explicit token.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    /// Create a configuration from the process environment.
    ///
    /// Reads the bearer token from `SKILLSYNC_GITHUB_TOKEN`; everything
    /// else keeps its default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty()))
    }

    /// Override the resync timeout budget.
    #[must_use]
    pub fn with_resync_timeout(mut self, budget: Duration) -> Self {
        self.resync_timeout = budget;
        self
    }

    /// Override the API base URL (self-hosted mirrors, tests).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}
