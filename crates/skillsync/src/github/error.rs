//! Hosting API error types.

use thiserror::Error;

use crate::http::HttpError;

/// Errors from the hosting API.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Authentication required or failed.
    #[error("authentication required")]
    AuthRequired,

    /// Resource not found (repo, user, ref).
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Any other non-success response.
    #[error("GitHub API error: {status} {message}")]
    Api { status: u16, message: String },

    /// Network or connection error.
    #[error("network error: {0}")]
    Transport(String),
}

impl GitHubError {
    /// Map a non-success response status to an error for `resource`.
    pub(crate) fn from_status(status: u16, resource: &str, body: String) -> Self {
        match status {
            401 | 403 => GitHubError::AuthRequired,
            404 => GitHubError::NotFound {
                resource: resource.to_string(),
            },
            _ => GitHubError::Api {
                status,
                message: body,
            },
        }
    }
}

impl From<HttpError> for GitHubError {
    fn from(err: HttpError) -> Self {
        GitHubError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_covers_auth_and_not_found() {
        assert!(matches!(
            GitHubError::from_status(401, "/user", String::new()),
            GitHubError::AuthRequired
        ));
        assert!(matches!(
            GitHubError::from_status(403, "/user", String::new()),
            GitHubError::AuthRequired
        ));
        assert!(matches!(
            GitHubError::from_status(404, "/repos/o/r", String::new()),
            GitHubError::NotFound { .. }
        ));
        assert!(matches!(
            GitHubError::from_status(500, "/repos/o/r", "boom".to_string()),
            GitHubError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn transport_errors_convert() {
        let err: GitHubError = HttpError::Transport("connection reset".to_string()).into();
        assert!(matches!(err, GitHubError::Transport(_)));
        assert!(err.to_string().contains("connection reset"));
    }
}
