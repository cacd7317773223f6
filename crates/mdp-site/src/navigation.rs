//! Fragment-driven navigation.
//!
//! Navigation is a pure reducer: [`reduce`] takes the current
//! [`NavigationState`] and a [`NavEvent`] and returns the next state plus the
//! [`Effect`]s the host should perform (set the document title, rewrite the
//! URL fragment). [`Navigator`] drives the reducer and feeds `SetFragment`
//! effects back in as fragment changes, the same way a browser reports a
//! fragment it was just told to set.
//!
//! # Lifecycle
//!
//! ```text
//! Loading ──Loaded──▶ Ready ──Reload──▶ Loading
//!    │                                    ▲
//!    └──LoadFailed──▶ Failed ──Reload─────┘
//! ```
//!
//! Fragment changes received before the site is ready are remembered and
//! applied once `Loaded` arrives. An empty fragment at that point redirects
//! to the home page when `title_as_home` is set.

use std::sync::Arc;

use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::events::NavigationEvents;
use crate::site::SiteConfig;
use crate::site_map::SiteMap;
use crate::slug::slug;

/// Label shown for fragments that match no page.
pub const NOT_FOUND_LABEL: &str = "Not found";

/// Page selected by the current fragment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "camelCase")]
pub enum CurrentPage {
    /// A site map entry.
    Page(String),
    /// No site map entry matches the fragment.
    NotFound,
}

impl CurrentPage {
    /// Page name, or [`NOT_FOUND_LABEL`].
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Page(name) => name,
            Self::NotFound => NOT_FOUND_LABEL,
        }
    }
}

/// Load phase as seen by navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "error", rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Loading,
    Ready,
    /// Load failed with the given message.
    Failed(String),
}

/// Navigation state derived from events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub phase: Phase,
    /// Last fragment received, decoded and without `#`.
    pub fragment: String,
    /// Selected page. `None` until the first navigation after load.
    pub current: Option<CurrentPage>,
    pub menu_open: bool,
}

/// Input to the navigation reducer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavEvent {
    /// The page collection is ready.
    Loaded,
    /// Loading failed.
    LoadFailed(String),
    /// A reload started.
    Reload,
    /// The URL fragment changed (raw, possibly percent-encoded, with or
    /// without a leading `#`).
    FragmentChanged(String),
    ToggleMenu,
    CloseMenu,
}

/// Output of the navigation reducer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Set the document title.
    SetTitle(String),
    /// Rewrite the URL fragment.
    SetFragment(String),
}

/// Site facts the reducer depends on.
#[derive(Clone, Copy, Debug)]
pub struct NavigationContext<'a> {
    pub site_map: &'a SiteMap,
    pub title: &'a str,
    pub title_as_home: bool,
}

/// Document title for `current`.
///
/// `"{page} - {title}"`, or just `title` when the page name equals it.
#[must_use]
pub fn page_title(current: &CurrentPage, title: &str) -> String {
    let label = current.label();
    if label == title {
        title.to_owned()
    } else {
        format!("{label} - {title}")
    }
}

/// Decode a raw URL fragment: strip one leading `#`, then percent-decode.
#[must_use]
pub fn decode_fragment(raw: &str) -> String {
    let raw = raw.strip_prefix('#').unwrap_or(raw);
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Compute the next state and effects for `event`.
#[must_use]
pub fn reduce(
    state: &NavigationState,
    event: &NavEvent,
    ctx: &NavigationContext<'_>,
) -> (NavigationState, Vec<Effect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match event {
        NavEvent::Loaded => {
            next.phase = Phase::Ready;
            if let Some(home) = home_redirect(&next, ctx) {
                next.menu_open = false;
                effects.push(Effect::SetFragment(home));
            } else {
                navigate(&mut next, &mut effects, ctx);
            }
        }
        NavEvent::LoadFailed(message) => {
            next.phase = Phase::Failed(message.clone());
            next.current = None;
        }
        NavEvent::Reload => {
            next.phase = Phase::Loading;
        }
        NavEvent::FragmentChanged(raw) => {
            next.fragment = decode_fragment(raw);
            if next.phase == Phase::Ready {
                navigate(&mut next, &mut effects, ctx);
            }
        }
        NavEvent::ToggleMenu => {
            next.menu_open = !next.menu_open;
        }
        NavEvent::CloseMenu => {
            next.menu_open = false;
        }
    }

    (next, effects)
}

/// Home page fragment to redirect to when the site becomes ready with an
/// empty fragment. Later empty fragments resolve like any other.
fn home_redirect(state: &NavigationState, ctx: &NavigationContext<'_>) -> Option<String> {
    if !state.fragment.is_empty() || !ctx.title_as_home {
        return None;
    }
    ctx.site_map.home().map(slug)
}

/// Resolve `state.fragment` against the site map.
fn navigate(state: &mut NavigationState, effects: &mut Vec<Effect>, ctx: &NavigationContext<'_>) {
    state.menu_open = false;

    let current = ctx
        .site_map
        .find_by_slug(&state.fragment)
        .map_or(CurrentPage::NotFound, |name| CurrentPage::Page(name.to_owned()));

    effects.push(Effect::SetTitle(page_title(&current, ctx.title)));
    state.current = Some(current);
}

/// Entry of the navigation menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: String,
    /// Link target, `#{slug}`.
    pub href: String,
    /// True if this entry is the current page.
    pub active: bool,
}

/// Menu entries in site map order.
///
/// The home page is left out when `title_as_home` is set, since the site
/// title already links to it.
#[must_use]
pub fn nav_items(ctx: &NavigationContext<'_>, fragment: &str) -> Vec<NavItem> {
    let skip = usize::from(ctx.title_as_home);
    ctx.site_map
        .iter()
        .skip(skip)
        .map(|name| {
            let key = slug(name);
            NavItem {
                name: name.to_owned(),
                href: format!("#{key}"),
                active: key == fragment,
            }
        })
        .collect()
}

/// Stateful driver around [`reduce`].
#[derive(Clone, Debug)]
pub struct Navigator {
    site_map: Arc<SiteMap>,
    title: String,
    title_as_home: bool,
    state: NavigationState,
}

impl Navigator {
    /// Create a navigator in the loading phase.
    #[must_use]
    pub fn new(site_map: Arc<SiteMap>, config: &SiteConfig) -> Self {
        Self {
            site_map,
            title: config.title.clone(),
            title_as_home: config.title_as_home,
            state: NavigationState::default(),
        }
    }

    fn context(&self) -> NavigationContext<'_> {
        NavigationContext {
            site_map: &self.site_map,
            title: &self.title,
            title_as_home: self.title_as_home,
        }
    }

    /// Apply `event` and return every effect it caused.
    ///
    /// `SetFragment` effects are applied immediately as fragment changes, so
    /// a home redirect yields both the new fragment and the home page title.
    pub fn dispatch(&mut self, event: NavEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        let mut pending = vec![event];

        while let Some(event) = pending.pop() {
            let (next, produced) = reduce(&self.state, &event, &self.context());
            self.state = next;
            for effect in produced {
                if let Effect::SetFragment(fragment) = &effect {
                    tracing::debug!(fragment, "Redirecting");
                    pending.push(NavEvent::FragmentChanged(fragment.clone()));
                }
                effects.push(effect);
            }
        }

        effects
    }

    /// Consume `events` until the sender side is dropped, calling
    /// `on_effect` for every effect.
    pub fn run(&mut self, events: &NavigationEvents, mut on_effect: impl FnMut(&Self, &Effect)) {
        for event in events.iter() {
            for effect in self.dispatch(event) {
                on_effect(self, &effect);
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Selected page, if any.
    #[must_use]
    pub fn current(&self) -> Option<&CurrentPage> {
        self.state.current.as_ref()
    }

    /// Title for the current page, or the site title before any navigation.
    #[must_use]
    pub fn title(&self) -> String {
        self.current().map_or_else(
            || self.title.clone(),
            |current| page_title(current, &self.title),
        )
    }

    /// Menu entries with the current fragment marked active.
    #[must_use]
    pub fn nav_items(&self) -> Vec<NavItem> {
        nav_items(&self.context(), &self.state.fragment)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::events::navigation_channel;

    fn navigator(names: &[&str], title: &str, title_as_home: bool) -> Navigator {
        let config = SiteConfig {
            title: title.to_owned(),
            title_as_home,
            ..SiteConfig::default()
        };
        Navigator::new(Arc::new(SiteMap::new(names.iter().copied()).unwrap()), &config)
    }

    fn fragment(value: &str) -> NavEvent {
        NavEvent::FragmentChanged(value.to_owned())
    }

    #[test]
    fn test_home_redirect_on_empty_fragment() {
        let mut nav = navigator(&["Home", "About"], "Docs", true);

        let effects = nav.dispatch(NavEvent::Loaded);

        assert_eq!(
            effects,
            vec![
                Effect::SetFragment("Home".to_owned()),
                Effect::SetTitle("Home - Docs".to_owned()),
            ]
        );
        assert_eq!(nav.current(), Some(&CurrentPage::Page("Home".to_owned())));
        assert_eq!(nav.state().fragment, "Home");
    }

    #[test]
    fn test_empty_fragment_after_startup_is_not_found() {
        let mut nav = navigator(&["Home", "About"], "Docs", true);
        nav.dispatch(NavEvent::Loaded);
        nav.dispatch(fragment("#About"));

        let effects = nav.dispatch(fragment("#"));

        assert_eq!(effects, vec![Effect::SetTitle("Not found - Docs".to_owned())]);
        assert_eq!(nav.current(), Some(&CurrentPage::NotFound));
        assert_eq!(nav.state().fragment, "");
    }

    #[test]
    fn test_redirect_skips_not_found_title() {
        let mut nav = navigator(&["Home"], "Docs", true);

        let effects = nav.dispatch(NavEvent::Loaded);

        assert!(!effects.contains(&Effect::SetTitle("Not found - Docs".to_owned())));
    }

    #[test]
    fn test_no_redirect_without_title_as_home() {
        let mut nav = navigator(&["Home", "About"], "Docs", false);

        let effects = nav.dispatch(NavEvent::Loaded);

        assert_eq!(effects, vec![Effect::SetTitle("Not found - Docs".to_owned())]);
        assert_eq!(nav.current(), Some(&CurrentPage::NotFound));
    }

    #[test]
    fn test_no_redirect_for_empty_site_map() {
        let mut nav = navigator(&[], "Docs", true);

        nav.dispatch(NavEvent::Loaded);

        assert_eq!(nav.current(), Some(&CurrentPage::NotFound));
    }

    #[test]
    fn test_fragment_selects_page() {
        let mut nav = navigator(&["Intro", "API Ref"], "Docs", true);
        nav.dispatch(NavEvent::Loaded);

        let effects = nav.dispatch(fragment("#API_Ref"));

        assert_eq!(effects, vec![Effect::SetTitle("API Ref - Docs".to_owned())]);
        assert_eq!(nav.current(), Some(&CurrentPage::Page("API Ref".to_owned())));
    }

    #[test]
    fn test_unknown_fragment_is_not_found() {
        let mut nav = navigator(&["Intro"], "Docs", true);
        nav.dispatch(NavEvent::Loaded);

        let effects = nav.dispatch(fragment("#does-not-exist"));

        assert_eq!(effects, vec![Effect::SetTitle("Not found - Docs".to_owned())]);
        assert_eq!(nav.current(), Some(&CurrentPage::NotFound));
    }

    #[test]
    fn test_percent_encoded_fragment() {
        let mut nav = navigator(&["Home", "Über uns"], "Docs", true);
        nav.dispatch(NavEvent::Loaded);

        nav.dispatch(fragment("#%C3%9Cber_uns"));

        assert_eq!(nav.current(), Some(&CurrentPage::Page("Über uns".to_owned())));
    }

    #[test]
    fn test_page_named_like_site_title() {
        let mut nav = navigator(&["Docs", "About"], "Docs", true);

        nav.dispatch(NavEvent::Loaded);

        assert_eq!(nav.title(), "Docs");
    }

    #[test]
    fn test_navigation_closes_menu() {
        let mut nav = navigator(&["Home", "About"], "Docs", true);
        nav.dispatch(NavEvent::Loaded);

        nav.dispatch(NavEvent::ToggleMenu);
        assert!(nav.state().menu_open);

        nav.dispatch(fragment("About"));
        assert!(!nav.state().menu_open);
    }

    #[test]
    fn test_toggle_and_close_menu() {
        let mut nav = navigator(&["Home"], "Docs", true);

        nav.dispatch(NavEvent::ToggleMenu);
        assert!(nav.state().menu_open);
        nav.dispatch(NavEvent::ToggleMenu);
        assert!(!nav.state().menu_open);
        nav.dispatch(NavEvent::ToggleMenu);
        nav.dispatch(NavEvent::CloseMenu);
        assert!(!nav.state().menu_open);
    }

    #[test]
    fn test_fragment_during_loading_applied_on_load() {
        let mut nav = navigator(&["Home", "About"], "Docs", true);

        assert!(nav.dispatch(fragment("#About")).is_empty());
        assert_eq!(nav.current(), None);

        let effects = nav.dispatch(NavEvent::Loaded);

        assert_eq!(effects, vec![Effect::SetTitle("About - Docs".to_owned())]);
    }

    #[test]
    fn test_load_failed() {
        let mut nav = navigator(&["Home"], "Docs", true);

        let effects = nav.dispatch(NavEvent::LoadFailed("boom".to_owned()));

        assert!(effects.is_empty());
        assert_eq!(nav.state().phase, Phase::Failed("boom".to_owned()));
        assert!(nav.dispatch(fragment("Home")).is_empty());
        assert_eq!(nav.title(), "Docs");
    }

    #[test]
    fn test_reload_keeps_fragment() {
        let mut nav = navigator(&["Home", "About"], "Docs", true);
        nav.dispatch(NavEvent::Loaded);
        nav.dispatch(fragment("About"));

        nav.dispatch(NavEvent::Reload);
        assert_eq!(nav.state().phase, Phase::Loading);

        let effects = nav.dispatch(NavEvent::Loaded);
        assert_eq!(effects, vec![Effect::SetTitle("About - Docs".to_owned())]);
    }

    #[test]
    fn test_reducer_is_pure() {
        let site_map = SiteMap::new(["Home"]).unwrap();
        let ctx = NavigationContext {
            site_map: &site_map,
            title: "Docs",
            title_as_home: true,
        };
        let state = NavigationState::default();

        let first = reduce(&state, &NavEvent::Loaded, &ctx);
        let second = reduce(&state, &NavEvent::Loaded, &ctx);

        assert_eq!(first, second);
        assert_eq!(state, NavigationState::default());
    }

    #[test]
    fn test_nav_items_exclude_home() {
        let mut nav = navigator(&["Home", "About", "API Ref"], "Docs", true);
        nav.dispatch(NavEvent::Loaded);
        nav.dispatch(fragment("API_Ref"));

        assert_eq!(
            nav.nav_items(),
            vec![
                NavItem {
                    name: "About".to_owned(),
                    href: "#About".to_owned(),
                    active: false,
                },
                NavItem {
                    name: "API Ref".to_owned(),
                    href: "#API_Ref".to_owned(),
                    active: true,
                },
            ]
        );
    }

    #[test]
    fn test_nav_items_include_home_without_title_as_home() {
        let nav = navigator(&["Home", "About"], "Docs", false);
        assert_eq!(nav.nav_items().len(), 2);
    }

    #[test]
    fn test_decode_fragment() {
        assert_eq!(decode_fragment("#API_Ref"), "API_Ref");
        assert_eq!(decode_fragment("API_Ref"), "API_Ref");
        assert_eq!(decode_fragment("#%C3%A4"), "ä");
        assert_eq!(decode_fragment(""), "");
    }

    #[test]
    fn test_run_consumes_stream_in_order() {
        let mut nav = navigator(&["Home", "About"], "Docs", true);
        let (tx, rx) = navigation_channel();
        tx.send(NavEvent::Loaded);
        tx.send(fragment("#About"));
        tx.send(fragment("#Home"));
        drop(tx);

        let mut titles = Vec::new();
        nav.run(&rx, |_, effect| {
            if let Effect::SetTitle(title) = effect {
                titles.push(title.clone());
            }
        });

        assert_eq!(titles, vec!["Home - Docs", "About - Docs", "Home - Docs"]);
        assert_eq!(nav.current(), Some(&CurrentPage::Page("Home".to_owned())));
    }
}
