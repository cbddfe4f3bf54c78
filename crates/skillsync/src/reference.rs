//! Source-repository reference parsing.
//!
//! A skill record tracks a repository, or a sub-directory of one, through
//! its `source_url`. Parsing turns that URL into the (owner, repo, ref,
//! path) tuple every other component consumes. Pure and deterministic; a
//! record whose URL does not parse cannot be synced at all.

use thiserror::Error;
use url::Url;

/// The only hosting domain skill sources may live on.
pub const EXPECTED_HOST: &str = "github.com";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// The URL's host is not the expected code-hosting domain.
    #[error("unsupported source host: {host}")]
    InvalidHost { host: String },

    /// The URL path is missing the owner and/or repository segment.
    #[error("source url is missing owner/repo segments: {url}")]
    InvalidPath { url: String },
}

/// A parsed source-repository reference.
///
/// Constructed fresh per operation from a record's `source_url`; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReference {
    pub owner: String,
    pub repo: String,
    /// Branch, tag or commit, when the URL pins one (`/tree/<ref>` or
    /// `/blob/<ref>`). Callers fall back to the repository's default
    /// branch when absent.
    pub ref_name: Option<String>,
    /// Sub-directory path within the repository, when the URL points
    /// below the repository root.
    pub path: Option<String>,
}

impl SourceReference {
    /// Parse a source URL into a reference.
    pub fn parse(raw: &str) -> Result<Self, ReferenceError> {
        let url = Url::parse(raw).map_err(|_| ReferenceError::InvalidHost {
            host: raw.to_string(),
        })?;

        let host = normalize_host(url.host_str().unwrap_or_default());
        if host != EXPECTED_HOST {
            return Err(ReferenceError::InvalidHost { host });
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segs| segs.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        if segments.len() < 2 {
            return Err(ReferenceError::InvalidPath {
                url: raw.to_string(),
            });
        }

        let owner = segments[0].to_string();
        let repo = segments[1]
            .strip_suffix(".git")
            .unwrap_or(segments[1])
            .to_string();
        if owner.is_empty() || repo.is_empty() {
            return Err(ReferenceError::InvalidPath {
                url: raw.to_string(),
            });
        }

        // Only `/tree/<ref>/...` and `/blob/<ref>/...` pin a ref; any other
        // trailing segment (issues, pulls, ...) is ignored.
        let (ref_name, path) = match segments.get(2) {
            Some(&"tree") | Some(&"blob") => {
                let ref_name = segments.get(3).map(|s| (*s).to_string());
                let path = if segments.len() > 4 {
                    Some(segments[4..].join("/"))
                } else {
                    None
                };
                (ref_name, path)
            }
            _ => (None, None),
        };

        Ok(Self {
            owner,
            repo,
            ref_name,
            path,
        })
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('.').to_lowercase();
    host.strip_prefix("www.").unwrap_or(&host).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_repo_url() {
        let reference = SourceReference::parse("https://github.com/rust-lang/rust")
            .expect("should parse repo");

        assert_eq!(reference.owner, "rust-lang");
        assert_eq!(reference.repo, "rust");
        assert_eq!(reference.ref_name, None);
        assert_eq!(reference.path, None);
    }

    #[test]
    fn parse_rejects_other_hosts() {
        let err = SourceReference::parse("https://gitlab.com/owner/repo")
            .expect_err("gitlab should be rejected");

        assert_eq!(
            err,
            ReferenceError::InvalidHost {
                host: "gitlab.com".to_string()
            }
        );
    }

    #[test]
    fn parse_rejects_owner_only_path() {
        let err = SourceReference::parse("https://github.com/only-owner")
            .expect_err("owner-only path should be rejected");

        assert!(matches!(err, ReferenceError::InvalidPath { .. }));
    }

    #[test]
    fn parse_rejects_unparseable_url() {
        let err = SourceReference::parse("not a url").expect_err("should fail");
        assert!(matches!(err, ReferenceError::InvalidHost { .. }));
    }

    #[test]
    fn parse_strips_git_suffix() {
        let reference = SourceReference::parse("https://github.com/rust-lang/rust.git")
            .expect("should parse repo");

        assert_eq!(reference.repo, "rust");
    }

    #[test]
    fn parse_extracts_ref_and_path_from_tree_url() {
        let reference = SourceReference::parse("https://github.com/o/r/tree/main/sub/dir")
            .expect("should parse repo");

        assert_eq!(reference.owner, "o");
        assert_eq!(reference.repo, "r");
        assert_eq!(reference.ref_name.as_deref(), Some("main"));
        assert_eq!(reference.path.as_deref(), Some("sub/dir"));
    }

    #[test]
    fn parse_extracts_ref_from_blob_url() {
        let reference = SourceReference::parse("https://github.com/o/r/blob/v1.2/docs/SKILL.md")
            .expect("should parse repo");

        assert_eq!(reference.ref_name.as_deref(), Some("v1.2"));
        assert_eq!(reference.path.as_deref(), Some("docs/SKILL.md"));
    }

    #[test]
    fn parse_tree_without_path_leaves_path_absent() {
        let reference = SourceReference::parse("https://github.com/o/r/tree/main")
            .expect("should parse repo");

        assert_eq!(reference.ref_name.as_deref(), Some("main"));
        assert_eq!(reference.path, None);
    }

    #[test]
    fn parse_ignores_non_tree_trailing_segments() {
        let reference = SourceReference::parse("https://github.com/o/r/issues")
            .expect("should parse repo");

        assert_eq!(reference.owner, "o");
        assert_eq!(reference.repo, "r");
        assert_eq!(reference.ref_name, None);
        assert_eq!(reference.path, None);
    }

    #[test]
    fn parse_normalizes_www_host() {
        let reference = SourceReference::parse("https://www.github.com/o/r")
            .expect("www host should normalize");

        assert_eq!(reference.owner, "o");
    }
}
