//! Filesystem fetcher.
//!
//! Provides [`FsFetcher`] for reading documents from a local site checkout.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::fetcher::{FetchError, FetchErrorKind, Fetcher};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem fetcher.
///
/// Maps URL paths onto files below a root directory. A leading `/` refers
/// to the root itself, so `/site/Content/Intro.md` and `site/Content/Intro.md`
/// name the same file. Parent components (`..`) and absolute URLs with a
/// scheme are rejected.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use mdp_fetch::{Fetcher, FsFetcher};
///
/// let fetcher = FsFetcher::new(PathBuf::from("site"));
/// let text = fetcher.fetch("/Content/Intro.md")?;
/// ```
#[derive(Debug, Clone)]
pub struct FsFetcher {
    /// Root directory URLs are resolved against.
    root: PathBuf,
}

impl FsFetcher {
    /// Create a new filesystem fetcher rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve a URL path to a file below the root.
    fn resolve(&self, url: &str) -> Result<PathBuf, FetchError> {
        let invalid = || {
            FetchError::new(FetchErrorKind::InvalidUrl)
                .with_url(url)
                .with_backend(BACKEND)
        };

        if url.contains("://") {
            return Err(invalid());
        }

        let relative = Path::new(url.trim_start_matches('/'));
        let mut path = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid());
                }
            }
        }

        Ok(path)
    }
}

impl Fetcher for FsFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let path = self.resolve(url)?;
        tracing::debug!(url, path = %path.display(), "Reading document");

        fs::read_to_string(&path)
            .map_err(|e| FetchError::io(e, Some(url.to_owned())).with_backend(BACKEND))
    }
}
