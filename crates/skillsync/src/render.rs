//! Render-mode heuristic for fetched skill documents.
//!
//! A document that links to `./assets/x.png` or `../doc.md` cannot be
//! rendered outside its repository without those links breaking, so any
//! relative URL demotes the whole document to plain text. Only documents
//! whose links are all absolute (or that have no links at all) are
//! rendered as markdown.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Inline links and images: `[label](URL ...)`, `![alt](URL)`.
static INLINE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[^\]]*\]\(\s*([^)\s]+)").expect("inline link pattern compiles")
});

/// Reference-style definitions: `[label]: URL`.
static REFERENCE_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*\[[^\]]+\]:\s*(\S+)").expect("reference definition pattern compiles")
});

/// Raw HTML anchors and images: `<a href=...>`, `<img src=...>`.
static HTML_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<(?:a|img)\b[^>]*?(?:href|src)\s*=\s*["']([^"'>]+)["']"#)
        .expect("html link pattern compiles")
});

/// How a skill document should be rendered.
///
/// Cached on the record at fetch time; derivable purely from the document
/// text via [`RenderMode::classify`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Markdown,
    #[default]
    Plain,
}

impl RenderMode {
    /// Classify a document by scanning every link it contains.
    ///
    /// Returns [`RenderMode::Plain`] if any collected URL is relative to
    /// the source repository; [`RenderMode::Markdown`] when there are no
    /// links or all of them are absolute.
    #[must_use]
    pub fn classify(document: &str) -> Self {
        let all_absolute = collect_urls(document).iter().all(|url| is_absolute(url));
        if all_absolute {
            RenderMode::Markdown
        } else {
            RenderMode::Plain
        }
    }
}

fn collect_urls(document: &str) -> Vec<&str> {
    let mut urls = Vec::new();
    for pattern in [&*INLINE_LINK, &*REFERENCE_DEF, &*HTML_LINK] {
        for capture in pattern.captures_iter(document) {
            if let Some(url) = capture.get(1) {
                urls.push(url.as_str());
            }
        }
    }
    urls
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_markdown() {
        assert_eq!(RenderMode::classify(""), RenderMode::Markdown);
    }

    #[test]
    fn document_without_links_is_markdown() {
        let doc = "# Title\n\nSome prose, `code`, and a list:\n- one\n- two\n";
        assert_eq!(RenderMode::classify(doc), RenderMode::Markdown);
    }

    #[test]
    fn absolute_links_keep_markdown() {
        let doc = "See [docs](https://example.com/a) and [site](http://example.org/b).";
        assert_eq!(RenderMode::classify(doc), RenderMode::Markdown);
    }

    #[test]
    fn relative_inline_link_forces_plain() {
        let doc = "Read [this](./local.md) first.";
        assert_eq!(RenderMode::classify(doc), RenderMode::Plain);
    }

    #[test]
    fn relative_image_forces_plain() {
        let doc = "![diagram](../assets/diagram.png)";
        assert_eq!(RenderMode::classify(doc), RenderMode::Plain);
    }

    #[test]
    fn mixed_links_force_plain() {
        let doc = "[ok](https://example.com/a) but also [broken](assets/x.png)";
        assert_eq!(RenderMode::classify(doc), RenderMode::Plain);
    }

    #[test]
    fn relative_reference_definition_forces_plain() {
        let doc = "See [guide][g].\n\n[g]: ./guide.md\n";
        assert_eq!(RenderMode::classify(doc), RenderMode::Plain);
    }

    #[test]
    fn absolute_reference_definition_keeps_markdown() {
        let doc = "See [guide][g].\n\n[g]: https://example.com/guide\n";
        assert_eq!(RenderMode::classify(doc), RenderMode::Markdown);
    }

    #[test]
    fn relative_html_href_forces_plain() {
        let doc = r#"Intro <a href="docs/setup.md">setup</a>"#;
        assert_eq!(RenderMode::classify(doc), RenderMode::Plain);
    }

    #[test]
    fn relative_html_img_src_forces_plain() {
        let doc = r#"<img alt="logo" src='./logo.svg'>"#;
        assert_eq!(RenderMode::classify(doc), RenderMode::Plain);
    }

    #[test]
    fn absolute_html_links_keep_markdown() {
        let doc = r#"<a href="https://example.com">site</a> <img src="https://example.com/x.png">"#;
        assert_eq!(RenderMode::classify(doc), RenderMode::Markdown);
    }

    #[test]
    fn anchor_link_counts_as_relative() {
        let doc = "[jump](#section)";
        assert_eq!(RenderMode::classify(doc), RenderMode::Plain);
    }

    #[test]
    fn serializes_to_lowercase_wire_form() {
        assert_eq!(
            serde_json::to_string(&RenderMode::Markdown).expect("serialize"),
            "\"markdown\""
        );
        assert_eq!(
            serde_json::to_string(&RenderMode::Plain).expect("serialize"),
            "\"plain\""
        );
        let parsed: RenderMode = serde_json::from_str("\"plain\"").expect("deserialize");
        assert_eq!(parsed, RenderMode::Plain);
    }
}
