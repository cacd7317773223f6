//! Page resolution, loading and navigation for mdp.
//!
//! This crate provides:
//! - [`slug`] and [`resolve_url`]: page name to document URL mapping
//! - [`SiteMap`]: the ordered, collision-free list of page names
//! - [`Site`]: parallel, all-or-nothing loading into a [`PageCollection`]
//! - [`Navigator`]: fragment-driven navigation as a pure reducer
//! - [`ViewModel`]: serializable snapshot for rendering
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use mdp_fetch::FsFetcher;
//! use mdp_renderer::HtmlConverter;
//! use mdp_site::{NavEvent, Navigator, Site, SiteConfig, SiteMap};
//!
//! let site = Site::new(
//!     Arc::new(FsFetcher::new(PathBuf::from("site"))),
//!     Arc::new(HtmlConverter::new()),
//!     SiteConfig::default(),
//! );
//! let site_map = Arc::new(SiteMap::new(["Home", "About"])?);
//! site.reload(&site_map);
//!
//! let mut navigator = Navigator::new(site_map, site.config());
//! navigator.dispatch(NavEvent::Loaded);
//! println!("{}", navigator.title());
//! # Ok(())
//! # }
//! ```

mod collection;
mod events;
mod loader;
mod navigation;
mod resolver;
mod site;
mod site_map;
mod slug;
mod theme;
mod view;

pub use collection::{FOOTER, HEADER, PageCollection, PageEntry, load_all};
pub use events::{NavigationEventSender, NavigationEvents, navigation_channel};
pub use loader::{LoadError, MarkdownLoader};
pub use navigation::{
    CurrentPage, Effect, NOT_FOUND_LABEL, NavEvent, NavItem, NavigationContext, NavigationState,
    Navigator, Phase, decode_fragment, nav_items, page_title, reduce,
};
pub use resolver::{ContentKind, resolve_url};
pub use site::{LoadState, Site, SiteConfig};
pub use site_map::{SiteMap, SiteMapError};
pub use slug::{SLUG_SEPARATOR, slug};
pub use theme::{ThemeColors, ThemeRole, ThemeTarget, apply_theme};
pub use view::ViewModel;

// Re-export converted content from mdp-renderer for convenience
pub use mdp_renderer::ParsedContent;
