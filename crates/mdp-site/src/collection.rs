//! Loading every page and layout fragment of a site.
//!
//! [`load_all`] resolves and fetches all documents in parallel on the rayon
//! pool and joins them all-or-nothing: either every document converts and a
//! complete [`PageCollection`] is returned, or the call fails and nothing is
//! exposed.

use std::collections::BTreeMap;
use std::time::Instant;

use mdp_renderer::ParsedContent;
use rayon::prelude::*;
use serde::Serialize;

use crate::loader::{LoadError, MarkdownLoader};
use crate::resolver::{ContentKind, resolve_url};
use crate::site::SiteConfig;
use crate::site_map::SiteMap;

/// Layout part rendered above page content.
pub const HEADER: &str = "header";
/// Layout part rendered below page content.
pub const FOOTER: &str = "footer";

/// A loaded page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    /// Page name as listed in the site map.
    pub name: String,
    /// Converted document.
    pub content: ParsedContent,
}

/// All pages and layout fragments from one load cycle.
///
/// Page keys are exactly the site map names; layout keys are exactly the
/// configured layout part names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PageCollection {
    pages: BTreeMap<String, PageEntry>,
    layouts: BTreeMap<String, ParsedContent>,
}

impl PageCollection {
    /// Look up a page by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PageEntry> {
        self.pages.get(name)
    }

    /// Look up a layout fragment by part name.
    #[must_use]
    pub fn layout(&self, part: &str) -> Option<&ParsedContent> {
        self.layouts.get(part)
    }

    /// The footer fragment, if configured.
    #[must_use]
    pub fn footer(&self) -> Option<&ParsedContent> {
        self.layout(FOOTER)
    }

    /// The header fragment, if configured.
    #[must_use]
    pub fn header(&self) -> Option<&ParsedContent> {
        self.layout(HEADER)
    }

    /// Iterate over pages, ordered by name.
    pub fn pages(&self) -> impl Iterator<Item = &PageEntry> {
        self.pages.values()
    }

    /// Iterate over layout fragments as `(part, content)`.
    pub fn layouts(&self) -> impl Iterator<Item = (&str, &ParsedContent)> {
        self.layouts.iter().map(|(part, content)| (part.as_str(), content))
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True if no pages were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Load every site map page and every configured layout part.
///
/// Documents are fetched concurrently. Completion order is unspecified, but
/// when several documents fail the reported error is the first one in site
/// map order (pages before layout parts).
///
/// # Errors
///
/// Returns the first [`LoadError`] encountered. No partial collection is
/// returned.
pub fn load_all(
    site_map: &SiteMap,
    config: &SiteConfig,
    loader: &MarkdownLoader,
) -> Result<PageCollection, LoadError> {
    let start = Instant::now();

    let jobs: Vec<(ContentKind, &str)> = site_map
        .iter()
        .map(|name| (ContentKind::Page, name))
        .chain(
            config
                .layout_parts
                .iter()
                .map(|part| (ContentKind::Layout, part.as_str())),
        )
        .collect();

    let results: Vec<Result<ParsedContent, LoadError>> = jobs
        .par_iter()
        .map(|&(kind, name)| loader.load(&resolve_url(kind, name, config)))
        .collect();

    let mut collection = PageCollection::default();
    for (&(kind, name), result) in jobs.iter().zip(results) {
        let content = result.inspect_err(|e| {
            tracing::warn!(name, error = %e, "Site load failed");
        })?;
        match kind {
            ContentKind::Page => {
                collection.pages.insert(
                    name.to_owned(),
                    PageEntry {
                        name: name.to_owned(),
                        content,
                    },
                );
            }
            ContentKind::Layout => {
                collection.layouts.insert(name.to_owned(), content);
            }
        }
    }

    tracing::info!(
        pages = collection.pages.len(),
        layouts = collection.layouts.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Site loaded"
    );

    Ok(collection)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use mdp_fetch::{FetchErrorKind, Fetcher, MockFetcher};
    use mdp_renderer::HtmlConverter;
    use pretty_assertions::assert_eq;

    use super::*;

    fn config() -> SiteConfig {
        SiteConfig {
            title: "Docs".to_owned(),
            fetch_prefix: Some("/site".to_owned()),
            ..SiteConfig::default()
        }
    }

    fn loader(fetcher: &Arc<MockFetcher>) -> MarkdownLoader {
        MarkdownLoader::new(
            Arc::clone(fetcher) as Arc<dyn Fetcher>,
            Arc::new(HtmlConverter::new()),
        )
    }

    fn full_site() -> MockFetcher {
        MockFetcher::new()
            .with_document("/site/Content/Intro.md", "# Intro")
            .with_document("/site/Content/API_Ref.md", "# API")
            .with_document("/site/Layout/footer.md", "(c) Docs")
    }

    #[test]
    fn test_load_all_pages_and_footer() {
        let fetcher = Arc::new(full_site());
        let site_map = SiteMap::new(["Intro", "API Ref"]).unwrap();

        let collection = load_all(&site_map, &config(), &loader(&fetcher)).unwrap();

        assert_eq!(collection.len(), 2);
        assert!(collection.get("Intro").unwrap().content.html.contains("<h1>Intro</h1>"));
        assert_eq!(collection.get("API Ref").unwrap().name, "API Ref");
        assert!(collection.footer().unwrap().html.contains("(c) Docs"));
        assert_eq!(collection.header(), None);
    }

    #[test]
    fn test_requests_resolved_urls() {
        let fetcher = Arc::new(full_site());
        let site_map = SiteMap::new(["Intro", "API Ref"]).unwrap();

        load_all(&site_map, &config(), &loader(&fetcher)).unwrap();

        let mut requests = fetcher.requests();
        requests.sort();
        assert_eq!(
            requests,
            vec![
                "/site/Content/API_Ref.md",
                "/site/Content/Intro.md",
                "/site/Layout/footer.md",
            ]
        );
    }

    #[test]
    fn test_single_failure_fails_whole_load() {
        let fetcher = Arc::new(
            full_site().with_failure("/site/Content/API_Ref.md", FetchErrorKind::Timeout),
        );
        let site_map = SiteMap::new(["Intro", "API Ref"]).unwrap();

        let err = load_all(&site_map, &config(), &loader(&fetcher)).unwrap_err();

        assert_eq!(err.url(), Some("/site/Content/API_Ref.md"));
    }

    #[test]
    fn test_missing_footer_fails_load() {
        let fetcher = Arc::new(
            MockFetcher::new().with_document("/site/Content/Intro.md", "# Intro"),
        );
        let site_map = SiteMap::new(["Intro"]).unwrap();

        let err = load_all(&site_map, &config(), &loader(&fetcher)).unwrap_err();

        assert_eq!(err.url(), Some("/site/Layout/footer.md"));
    }

    #[test]
    fn test_first_failure_in_site_map_order() {
        // The later page fails fast, the earlier one fails slowly.
        let fetcher = Arc::new(
            MockFetcher::new()
                .with_status("/site/Content/A.md", 500)
                .with_delay("/site/Content/A.md", Duration::from_millis(50))
                .with_status("/site/Content/B.md", 404)
                .with_document("/site/Layout/footer.md", ""),
        );
        let site_map = SiteMap::new(["A", "B"]).unwrap();

        let err = load_all(&site_map, &config(), &loader(&fetcher)).unwrap_err();

        assert_eq!(err.url(), Some("/site/Content/A.md"));
    }

    #[test]
    fn test_header_and_custom_layout_parts() {
        let fetcher = Arc::new(
            full_site().with_document("/site/Layout/header.md", "Welcome"),
        );
        let config = SiteConfig {
            layout_parts: vec![HEADER.to_owned(), FOOTER.to_owned()],
            ..config()
        };
        let site_map = SiteMap::new(["Intro"]).unwrap();

        let collection = load_all(&site_map, &config, &loader(&fetcher)).unwrap();

        assert!(collection.header().unwrap().html.contains("Welcome"));
        assert_eq!(collection.layouts().count(), 2);
    }

    #[test]
    fn test_no_layout_parts() {
        let fetcher = Arc::new(full_site());
        let config = SiteConfig {
            layout_parts: Vec::new(),
            ..config()
        };
        let site_map = SiteMap::new(["Intro"]).unwrap();

        let collection = load_all(&site_map, &config, &loader(&fetcher)).unwrap();

        assert_eq!(collection.footer(), None);
        assert_eq!(fetcher.requests(), vec!["/site/Content/Intro.md"]);
    }

    #[test]
    fn test_empty_site_map() {
        let fetcher = Arc::new(full_site());
        let site_map = SiteMap::new(Vec::<String>::new()).unwrap();

        let collection = load_all(&site_map, &config(), &loader(&fetcher)).unwrap();

        assert!(collection.is_empty());
        assert!(collection.footer().is_some());
    }
}
