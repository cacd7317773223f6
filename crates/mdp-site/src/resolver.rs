//! Document URL resolution.
//!
//! Maps a page or layout fragment name to the URL of its Markdown source:
//!
//! ```text
//! {fetch_prefix}/{pages_prefix | layout_prefix}/{slug(name)}.md
//! ```
//!
//! Empty or absent segments are skipped, so no leading slash appears when
//! the fetch prefix is unset.

use crate::site::SiteConfig;
use crate::slug::slug;

/// Markdown source file extension.
const EXTENSION: &str = ".md";

/// Kind of document being resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// A page listed in the site map.
    Page,
    /// A layout fragment such as the footer.
    Layout,
}

/// Resolve the fetch URL for a document.
#[must_use]
pub fn resolve_url(kind: ContentKind, name: &str, config: &SiteConfig) -> String {
    let sub_prefix = match kind {
        ContentKind::Page => config.pages_prefix.as_str(),
        ContentKind::Layout => config.layout_prefix.as_str(),
    };
    let file = format!("{}{EXTENSION}", slug(name));

    [config.fetch_prefix.as_deref().unwrap_or(""), sub_prefix, &file]
        .into_iter()
        .map(|segment| segment.trim_end_matches('/'))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
