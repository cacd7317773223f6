//! Read-only view model for rendering.
//!
//! [`ViewModel`] gathers everything a template needs to render the site in
//! its current state into one serializable value.

use std::collections::BTreeMap;

use mdp_renderer::ParsedContent;
use serde::Serialize;

use crate::navigation::{CurrentPage, NavItem, Navigator};
use crate::site::{LoadState, SiteConfig};
use crate::site_map::SiteMap;

/// Snapshot of the site for rendering.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel<'a> {
    pub config: &'a SiteConfig,
    /// Loaded pages by name. Empty unless the site is ready.
    pub pages: BTreeMap<&'a str, &'a ParsedContent>,
    pub sitemap: &'a SiteMap,
    /// Selected page, if any.
    pub current: Option<&'a CurrentPage>,
    /// Content of the selected page; `None` while loading or when not found.
    pub page: Option<&'a ParsedContent>,
    pub footer: Option<&'a ParsedContent>,
    pub header: Option<&'a ParsedContent>,
    pub title: String,
    pub loading: bool,
    /// Load failure message.
    pub failed: Option<String>,
    pub menu_open: bool,
    pub nav: Vec<NavItem>,
}

impl<'a> ViewModel<'a> {
    /// Build the view model from the site state and navigation.
    #[must_use]
    pub fn new(
        config: &'a SiteConfig,
        sitemap: &'a SiteMap,
        state: &'a LoadState,
        navigator: &'a Navigator,
    ) -> Self {
        let collection = state.collection();
        let current = navigator.current();

        let pages = collection
            .map(|c| c.pages().map(|p| (p.name.as_str(), &p.content)).collect())
            .unwrap_or_default();

        let page = match (collection, current) {
            (Some(c), Some(CurrentPage::Page(name))) => c.get(name).map(|p| &p.content),
            _ => None,
        };

        Self {
            config,
            pages,
            sitemap,
            current,
            page,
            footer: collection.and_then(|c| c.footer()),
            header: collection.and_then(|c| c.header()),
            title: navigator.title(),
            loading: state.is_loading(),
            failed: state.error().map(ToString::to_string),
            menu_open: navigator.state().menu_open,
            nav: navigator.nav_items(),
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mdp_fetch::{Fetcher, MockFetcher};
    use mdp_renderer::HtmlConverter;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::navigation::NavEvent;
    use crate::site::Site;

    fn ready_site() -> (Site, Arc<SiteMap>) {
        let fetcher: Arc<dyn Fetcher> = Arc::new(
            MockFetcher::new()
                .with_document("Content/Home.md", "# Home")
                .with_document("Content/About.md", "---\nauthor: Ada\n---\n# About")
                .with_document("Layout/footer.md", "Footer"),
        );
        let config = SiteConfig {
            title: "Docs".to_owned(),
            ..SiteConfig::default()
        };
        let site = Site::new(fetcher, Arc::new(HtmlConverter::new()), config);
        let site_map = Arc::new(SiteMap::new(["Home", "About"]).unwrap());
        site.reload(&site_map);
        (site, site_map)
    }

    #[test]
    fn test_ready_view() {
        let (site, site_map) = ready_site();
        let mut navigator = Navigator::new(Arc::clone(&site_map), site.config());
        navigator.dispatch(NavEvent::Loaded);
        navigator.dispatch(NavEvent::FragmentChanged("#About".to_owned()));
        let state = site.state();

        let view = ViewModel::new(site.config(), &site_map, &state, &navigator);

        assert_eq!(view.title, "About - Docs");
        assert!(!view.loading);
        assert_eq!(view.failed, None);
        assert_eq!(view.pages.len(), 2);
        assert_eq!(view.page.unwrap().metadata["author"], "Ada");
        assert!(view.footer.unwrap().html.contains("Footer"));
        assert_eq!(view.header, None);
        assert_eq!(view.nav.len(), 1);
        assert!(view.nav[0].active);
    }

    #[test]
    fn test_loading_view() {
        let site_map = SiteMap::new(["Home"]).unwrap();
        let config = SiteConfig::default();
        let navigator = Navigator::new(Arc::new(site_map.clone()), &config);
        let state = LoadState::Loading;

        let view = ViewModel::new(&config, &site_map, &state, &navigator);

        assert!(view.loading);
        assert!(view.pages.is_empty());
        assert_eq!(view.page, None);
        assert_eq!(view.title, "md-party");
    }

    #[test]
    fn test_not_found_view_has_no_page() {
        let (site, site_map) = ready_site();
        let mut navigator = Navigator::new(Arc::clone(&site_map), site.config());
        navigator.dispatch(NavEvent::Loaded);
        navigator.dispatch(NavEvent::FragmentChanged("#nope".to_owned()));
        let state = site.state();

        let view = ViewModel::new(site.config(), &site_map, &state, &navigator);

        assert_eq!(view.current, Some(&CurrentPage::NotFound));
        assert_eq!(view.page, None);
        assert_eq!(view.title, "Not found - Docs");
    }

    #[test]
    fn test_to_json_keys() {
        let (site, site_map) = ready_site();
        let mut navigator = Navigator::new(Arc::clone(&site_map), site.config());
        navigator.dispatch(NavEvent::Loaded);
        let state = site.state();

        let json = ViewModel::new(site.config(), &site_map, &state, &navigator)
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "Home - Docs");
        assert_eq!(value["menuOpen"], false);
        assert_eq!(value["sitemap"], serde_json::json!(["Home", "About"]));
        assert_eq!(value["config"]["elementId"], "md-party-container");
        assert_eq!(value["current"]["name"], "Home");
    }
}
