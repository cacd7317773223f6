//! Scheme-based dispatch between transports.

use crate::fetcher::{FetchError, Fetcher};

/// Dispatches `http(s)://` URLs to one fetcher and everything else to another.
///
/// Lets a site keep its pages on disk while the site map (or a layout
/// fragment) lives on a web server, and vice versa.
pub struct RoutingFetcher {
    remote: Box<dyn Fetcher>,
    local: Box<dyn Fetcher>,
}

impl RoutingFetcher {
    /// Create a router from a remote (HTTP) and a local fetcher.
    #[must_use]
    pub fn new(remote: impl Fetcher + 'static, local: impl Fetcher + 'static) -> Self {
        Self {
            remote: Box::new(remote),
            local: Box::new(local),
        }
    }
}

impl Fetcher for RoutingFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if url.starts_with("http://") || url.starts_with("https://") {
            self.remote.fetch(url)
        } else {
            self.local.fetch(url)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct Fixed(&'static str);

    impl Fetcher for Fixed {
        fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.to_owned())
        }
    }

    #[test]
    fn test_routes_by_scheme() {
        let router = RoutingFetcher::new(Fixed("remote"), Fixed("local"));

        assert_eq!(router.fetch("https://example.com/a.md").unwrap(), "remote");
        assert_eq!(router.fetch("http://example.com/a.md").unwrap(), "remote");
        assert_eq!(router.fetch("/a.md").unwrap(), "local");
        assert_eq!(router.fetch("Content/a.md").unwrap(), "local");
    }
}
