//! Fetcher trait and error types.
//!
//! Provides the core [`Fetcher`] trait for retrieving document text by URL,
//! along with [`FetchError`] for unified error handling across transports.
//!
//! # URL Convention
//!
//! URLs are whatever the page resolver produced:
//! - `"https://example.com/site/Content/Intro.md"` - remote document
//! - `"/site/Content/Intro.md"` - path rooted at the site root
//! - `"Content/Intro.md"` - path relative to the site root
//!
//! Transports decide which forms they accept.

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum FetchErrorKind {
    /// Document does not exist (filesystem miss or HTTP 404).
    NotFound,
    /// Permission denied (filesystem) or HTTP 401/403.
    PermissionDenied,
    /// URL cannot be handled by this transport.
    InvalidUrl,
    /// Server answered with a non-success status.
    Status,
    /// Connection-level failure (DNS, TLS, reset).
    Transport,
    /// Operation timed out.
    Timeout,
    /// Other/unknown error category.
    Other,
}

/// Fetch error with semantic kind and transport-specific source.
#[derive(Debug)]
pub struct FetchError {
    /// Semantic error category.
    pub kind: FetchErrorKind,
    /// URL being fetched (if applicable).
    pub url: Option<String>,
    /// HTTP status code, for HTTP responses.
    pub status: Option<u16>,
    /// Backend identifier (e.g., "Http", "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl FetchError {
    /// Create a new fetch error.
    #[must_use]
    pub fn new(kind: FetchErrorKind) -> Self {
        Self {
            kind,
            url: None,
            status: None,
            backend: None,
            source: None,
        }
    }

    /// Attach URL context.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach HTTP status code.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with URL.
    #[must_use]
    pub fn not_found(url: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::NotFound).with_url(url)
    }

    /// Create an error for a non-success HTTP status.
    ///
    /// 404 maps to [`FetchErrorKind::NotFound`], 401/403 to
    /// [`FetchErrorKind::PermissionDenied`], everything else to
    /// [`FetchErrorKind::Status`].
    #[must_use]
    pub fn from_status(url: impl Into<String>, status: u16) -> Self {
        let kind = match status {
            404 | 410 => FetchErrorKind::NotFound,
            401 | 403 => FetchErrorKind::PermissionDenied,
            _ => FetchErrorKind::Status,
        };
        Self::new(kind).with_url(url).with_status(status)
    }

    /// Create a fetch error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, url: Option<String>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => FetchErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => FetchErrorKind::PermissionDenied,
            std::io::ErrorKind::TimedOut => FetchErrorKind::Timeout,
            _ => FetchErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(u) = url {
            error = error.with_url(u);
        }
        error
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind 404: message (url: /foo/bar.md)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            FetchErrorKind::NotFound => "Not found",
            FetchErrorKind::PermissionDenied => "Permission denied",
            FetchErrorKind::InvalidUrl => "Invalid URL",
            FetchErrorKind::Status => "Unexpected status",
            FetchErrorKind::Transport => "Transport error",
            FetchErrorKind::Timeout => "Timeout",
            FetchErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(status) = self.status {
            write!(f, " {status}")?;
        }

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(url) = &self.url {
            write!(f, " (url: {url})")?;
        }

        Ok(())
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Retrieves raw document text by URL.
///
/// One call is one attempt: implementations never retry. Any transport
/// failure or non-success response is a [`FetchError`].
///
/// Fetchers are shared by the parallel page loader, hence `Send + Sync`.
pub trait Fetcher: Send + Sync {
    /// Fetch the document at `url` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the document is missing, the transport
    /// fails, or the response is not a success.
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<T: Fetcher + ?Sized> Fetcher for std::sync::Arc<T> {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

impl<T: Fetcher + ?Sized> Fetcher for Box<T> {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}
