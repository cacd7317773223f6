//! Site configuration and load state.
//!
//! Provides [`Site`], which owns the loading pipeline and the current
//! [`LoadState`] snapshot.
//!
//! # Thread Safety
//!
//! `Site` is designed for concurrent access:
//! - `state()` returns `Arc<LoadState>` with minimal locking (just Arc clone)
//! - `reload()` is serialized by an internal mutex, so two reloads never race
//!   two collections into place
//! - readers keep the previous snapshot until a reload completes
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use mdp_fetch::FsFetcher;
//! use mdp_renderer::HtmlConverter;
//! use mdp_site::{Site, SiteConfig, SiteMap};
//!
//! let site = Site::new(
//!     Arc::new(FsFetcher::new(PathBuf::from("site"))),
//!     Arc::new(HtmlConverter::new()),
//!     SiteConfig::default(),
//! );
//! let site_map = SiteMap::new(["Home", "About"])?;
//! let state = site.reload(&site_map);
//! ```

use std::sync::{Arc, Mutex, RwLock};

use mdp_fetch::Fetcher;
use mdp_renderer::MarkdownConverter;
use serde::{Deserialize, Serialize};

use crate::collection::{FOOTER, PageCollection, load_all};
use crate::loader::{LoadError, MarkdownLoader};
use crate::site_map::SiteMap;
use crate::theme::ThemeColors;

/// Configuration for [`Site`].
///
/// Every field has a default, so partial configurations deserialize with the
/// missing keys taken from [`SiteConfig::default`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Identifier of the element the site is rendered into.
    pub element_id: String,
    /// Site title, appended to every page title.
    pub title: String,
    /// Base location of all documents. Absent means relative URLs.
    pub fetch_prefix: Option<String>,
    /// Directory of page documents below the fetch prefix.
    pub pages_prefix: String,
    /// Directory of layout fragments below the fetch prefix.
    pub layout_prefix: String,
    /// Treat the first site map entry as the home page.
    ///
    /// The home page is left out of the navigation menu, and an empty
    /// fragment at startup redirects to it.
    pub title_as_home: bool,
    /// Theme colors.
    #[serde(flatten)]
    pub theme: ThemeColors,
    /// Layout fragments loaded with every site.
    pub layout_parts: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            element_id: "md-party-container".to_owned(),
            title: "md-party".to_owned(),
            fetch_prefix: None,
            pages_prefix: "Content".to_owned(),
            layout_prefix: "Layout".to_owned(),
            title_as_home: true,
            theme: ThemeColors::default(),
            layout_parts: vec![FOOTER.to_owned()],
        }
    }
}

/// Progress of the site load.
#[derive(Debug)]
pub enum LoadState {
    /// Documents are being fetched.
    Loading,
    /// Every document loaded.
    Ready(Arc<PageCollection>),
    /// At least one document failed; nothing was loaded.
    Failed(LoadError),
}

impl LoadState {
    /// Loaded collection, if ready.
    #[must_use]
    pub fn collection(&self) -> Option<&Arc<PageCollection>> {
        match self {
            Self::Ready(collection) => Some(collection),
            _ => None,
        }
    }

    /// Load failure, if failed.
    #[must_use]
    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// True while loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Site content loader and state holder.
///
/// # Thread Safety
///
/// This struct is designed for concurrent access without external locking:
/// - Uses internal `RwLock<Arc<LoadState>>` for the current state snapshot
/// - Uses `Mutex<()>` for serializing reload operations
pub struct Site {
    loader: MarkdownLoader,
    config: SiteConfig,
    /// Mutex for serializing reload operations.
    reload_lock: Mutex<()>,
    /// Current load state snapshot (atomically swappable).
    current_state: RwLock<Arc<LoadState>>,
}

impl Site {
    /// Create a site in the [`LoadState::Loading`] state.
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        converter: Arc<dyn MarkdownConverter>,
        config: SiteConfig,
    ) -> Self {
        Self {
            loader: MarkdownLoader::new(fetcher, converter),
            config,
            reload_lock: Mutex::new(()),
            current_state: RwLock::new(Arc::new(LoadState::Loading)),
        }
    }

    /// Site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Current load state snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn state(&self) -> Arc<LoadState> {
        Arc::clone(&self.current_state.read().unwrap())
    }

    /// Load every document of `site_map` and publish the result.
    ///
    /// Concurrent calls are serialized. Readers see the previous snapshot
    /// until the new one is complete.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn reload(&self, site_map: &SiteMap) -> Arc<LoadState> {
        let _guard = self.reload_lock.lock().unwrap();

        let state = match load_all(site_map, &self.config, &self.loader) {
            Ok(collection) => LoadState::Ready(Arc::new(collection)),
            Err(error) => LoadState::Failed(error),
        };
        let state = Arc::new(state);

        *self.current_state.write().unwrap() = Arc::clone(&state);
        state
    }

    /// Fetch and parse a site map document (a YAML list of page names).
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Fetch`] if the document cannot be fetched and
    /// [`LoadError::SiteMap`] if it is not a valid site map.
    pub fn load_site_map(&self, url: &str) -> Result<SiteMap, LoadError> {
        let document = self.loader.fetch_text(url)?;
        let site_map = SiteMap::from_yaml(&document)?;
        tracing::debug!(url, pages = site_map.len(), "Loaded site map");
        Ok(site_map)
    }
}
