//! Ordered list of page names.
//!
//! The site map defines which pages exist, their navigation order and the
//! home page (the first entry). It is immutable once built and validated so
//! that slug lookups are unambiguous.

use std::collections::HashMap;

use serde::Serialize;

use crate::slug::slug;

/// Error returned when a site map is invalid.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SiteMapError {
    /// A page name is empty or whitespace only.
    #[error("Page name at position {0} is empty")]
    EmptyName(usize),
    /// The same page name is listed twice.
    #[error("Page `{0}` is listed more than once")]
    DuplicateName(String),
    /// Two distinct page names encode to the same slug.
    #[error("Pages `{first}` and `{second}` share the slug `{slug}`")]
    SlugCollision {
        /// Page listed first.
        first: String,
        /// Page listed later.
        second: String,
        /// Shared slug.
        slug: String,
    },
    /// The site map document is not a YAML list of strings.
    #[error("Invalid site map document: {0}")]
    Parse(String),
}

/// Ordered, validated list of page names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SiteMap {
    names: Vec<String>,
    #[serde(skip)]
    slug_index: HashMap<String, usize>,
}

impl SiteMap {
    /// Build a site map from page names in navigation order.
    ///
    /// # Errors
    ///
    /// Returns [`SiteMapError`] if a name is empty, listed twice, or shares
    /// its slug with another name.
    pub fn new<I, S>(names: I) -> Result<Self, SiteMapError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut slug_index: HashMap<String, usize> = HashMap::with_capacity(names.len());

        for (idx, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(SiteMapError::EmptyName(idx));
            }

            let key = slug(name);
            if let Some(&existing) = slug_index.get(&key) {
                let first = &names[existing];
                if first == name {
                    return Err(SiteMapError::DuplicateName(name.clone()));
                }
                return Err(SiteMapError::SlugCollision {
                    first: first.clone(),
                    second: name.clone(),
                    slug: key,
                });
            }
            slug_index.insert(key, idx);
        }

        Ok(Self { names, slug_index })
    }

    /// Parse a YAML sequence of page names.
    ///
    /// # Errors
    ///
    /// Returns [`SiteMapError::Parse`] if the document is not a list of
    /// strings, or any validation error from [`SiteMap::new`].
    pub fn from_yaml(document: &str) -> Result<Self, SiteMapError> {
        let names: Vec<String> =
            serde_yaml::from_str(document).map_err(|e| SiteMapError::Parse(e.to_string()))?;
        Self::new(names)
    }

    /// Page names in navigation order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterate over page names in navigation order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if the site map has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The home page (first entry), if any.
    #[must_use]
    pub fn home(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// Find the page whose slug equals `slug`.
    #[must_use]
    pub fn find_by_slug(&self, slug: &str) -> Option<&str> {
        self.slug_index
            .get(slug)
            .map(|&idx| self.names[idx].as_str())
    }
}
