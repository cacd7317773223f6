//! HTTP fetcher.
//!
//! Provides [`HttpFetcher`], a blocking client on a shared `ureq` agent.
//! The agent pools connections, so one fetcher should serve a whole load
//! cycle, including the parallel page fetches.

use std::time::Duration;

use ureq::Agent;

use crate::fetcher::{FetchError, FetchErrorKind, Fetcher};

/// Backend identifier for error messages.
const BACKEND: &str = "Http";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// HTTP(S) fetcher.
///
/// Any status outside `2xx` is an error; the body of a failed response is
/// not read.
#[derive(Clone)]
pub struct HttpFetcher {
    agent: Agent,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT))
    }
}

impl HttpFetcher {
    /// Create a fetcher with the specified global request timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!(url, "HTTP GET");

        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(e, url))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(FetchError::from_status(url, status).with_backend(BACKEND));
        }

        let mut body = response.into_body();
        body.read_to_string().map_err(|e| map_ureq_error(e, url))
    }
}

/// Classify a `ureq` error.
fn map_ureq_error(err: ureq::Error, url: &str) -> FetchError {
    let kind = match &err {
        ureq::Error::Timeout(_) => FetchErrorKind::Timeout,
        ureq::Error::BadUri(_) => FetchErrorKind::InvalidUrl,
        ureq::Error::StatusCode(status) => {
            return FetchError::from_status(url, *status).with_backend(BACKEND);
        }
        _ => FetchErrorKind::Transport,
    };
    FetchError::new(kind)
        .with_url(url)
        .with_backend(BACKEND)
        .with_source(err)
}
