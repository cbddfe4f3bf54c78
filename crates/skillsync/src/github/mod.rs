//! GitHub hosting API integration.
//!
//! The client and the archive fetcher are stateless: each call carries its
//! own parameters and the shared [`SourceConfig`] credentials, so a single
//! instance is safe to share across concurrent requests.

pub mod archive;
pub mod client;
pub mod error;
pub mod types;

pub use archive::ArchiveFetcher;
pub use client::GitHubClient;
pub use error::GitHubError;
pub use types::{CommitInfo, OwnerInfo, RepoInfo};

use crate::config::SourceConfig;
use crate::http::HttpHeaders;

/// JSON media type for regular API reads.
pub(crate) const ACCEPT_JSON: &str = "application/vnd.github+json";

/// Media type that makes the contents endpoint return the raw file body.
pub(crate) const ACCEPT_RAW: &str = "application/vnd.github.raw+json";

/// Standard request headers: Accept, User-Agent and, when a token is
/// configured, the bearer Authorization.
pub(crate) fn request_headers(config: &SourceConfig, accept: &str) -> HttpHeaders {
    let mut headers: HttpHeaders = vec![
        ("Accept".to_string(), accept.to_string()),
        ("User-Agent".to_string(), config.user_agent.clone()),
    ];
    if let Some(token) = &config.token {
        headers.push(("Authorization".to_string(), format!("Bearer {token}")));
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_headers_include_bearer_token_when_configured() {
        let config = SourceConfig::new(Some("tok".to_string()));
        let headers = request_headers(&config, ACCEPT_JSON);

        assert!(headers.contains(&("Accept".to_string(), ACCEPT_JSON.to_string())));
        assert!(headers.contains(&("User-Agent".to_string(), "skillsync".to_string())));
        assert!(headers.contains(&("Authorization".to_string(), "Bearer tok".to_string())));
    }

    #[test]
    fn request_headers_omit_authorization_without_token() {
        let config = SourceConfig::default();
        let headers = request_headers(&config, ACCEPT_RAW);

        assert!(headers.iter().all(|(k, _)| k != "Authorization"));
    }
}
