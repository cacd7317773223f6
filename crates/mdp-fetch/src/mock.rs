//! Mock fetcher implementation for testing.
//!
//! Provides [`MockFetcher`] for unit testing without network or filesystem access.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use crate::fetcher::{FetchError, FetchErrorKind, Fetcher};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Canned response for a URL.
#[derive(Debug, Clone)]
enum Response {
    Document(String),
    Status(u16),
    Failure(FetchErrorKind),
}

/// Mock fetcher for testing.
///
/// Serves documents from memory. Use the builder methods to configure
/// responses; unknown URLs answer like an HTTP 404. Every call is recorded
/// and can be inspected with [`requests`](Self::requests).
///
/// # Example
///
/// ```ignore
/// use mdp_fetch::{Fetcher, MockFetcher};
///
/// let fetcher = MockFetcher::new()
///     .with_document("/Content/Intro.md", "# Intro")
///     .with_status("/Content/Broken.md", 500);
///
/// assert_eq!(fetcher.fetch("/Content/Intro.md").unwrap(), "# Intro");
/// assert!(fetcher.fetch("/Content/Broken.md").is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: RwLock<HashMap<String, Response>>,
    delays: RwLock<HashMap<String, Duration>>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    /// Create a new empty mock fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `text` for `url`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), Response::Document(text.into()));
        self
    }

    /// Answer `url` with a non-success HTTP status.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), Response::Status(status));
        self
    }

    /// Fail `url` with a transport-level error of the given kind.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, url: impl Into<String>, kind: FetchErrorKind) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(url.into(), Response::Failure(kind));
        self
    }

    /// Sleep for `delay` before answering `url`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_delay(self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.write().unwrap().insert(url.into(), delay);
        self
    }

    /// URLs requested so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Forget recorded requests.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }
}

impl Fetcher for MockFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_owned());

        let delay = self.delays.read().unwrap().get(url).copied();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }

        let response = self.responses.read().unwrap().get(url).cloned();
        match response {
            Some(Response::Document(text)) => Ok(text),
            Some(Response::Status(status)) => {
                Err(FetchError::from_status(url, status).with_backend(BACKEND))
            }
            Some(Response::Failure(kind)) => Err(FetchError::new(kind)
                .with_url(url)
                .with_backend(BACKEND)),
            None => Err(FetchError::from_status(url, 404).with_backend(BACKEND)),
        }
    }
}
