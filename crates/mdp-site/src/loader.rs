//! Single-document loading.

use std::sync::Arc;

use mdp_fetch::{FetchError, Fetcher};
use mdp_renderer::{ConvertError, MarkdownConverter, ParsedContent};

use crate::site_map::SiteMapError;

/// Error returned when site content cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document could not be fetched.
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        /// Requested URL.
        url: String,
        #[source]
        source: FetchError,
    },
    /// The document header block is malformed.
    #[error("Malformed metadata header in {url}: {message}")]
    Parse {
        /// Requested URL.
        url: String,
        /// Converter message.
        message: String,
    },
    /// The site map document is invalid.
    #[error(transparent)]
    SiteMap(#[from] SiteMapError),
}

impl LoadError {
    /// URL of the failing document, if the error concerns one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Fetch { url, .. } | Self::Parse { url, .. } => Some(url),
            Self::SiteMap(_) => None,
        }
    }
}

/// Fetches a document and converts it to [`ParsedContent`].
///
/// One call is one fetch attempt; failures are returned, never retried.
#[derive(Clone)]
pub struct MarkdownLoader {
    fetcher: Arc<dyn Fetcher>,
    converter: Arc<dyn MarkdownConverter>,
}

impl MarkdownLoader {
    /// Create a loader from a transport and a converter.
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, converter: Arc<dyn MarkdownConverter>) -> Self {
        Self { fetcher, converter }
    }

    /// Fetch raw text without conversion.
    pub fn fetch_text(&self, url: &str) -> Result<String, LoadError> {
        tracing::debug!(url, "Fetching document");
        self.fetcher.fetch(url).map_err(|source| LoadError::Fetch {
            url: url.to_owned(),
            source,
        })
    }

    /// Fetch and convert the document at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Fetch`] on transport failure or a non-success
    /// status, and [`LoadError::Parse`] if the metadata header is malformed.
    pub fn load(&self, url: &str) -> Result<ParsedContent, LoadError> {
        let text = self.fetch_text(url)?;
        self.converter
            .convert(&text)
            .map_err(|ConvertError::Metadata(message)| LoadError::Parse {
                url: url.to_owned(),
                message,
            })
    }
}
