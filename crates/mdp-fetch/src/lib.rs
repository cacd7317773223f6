//! Document fetching for the mdp page pipeline.
//!
//! This crate provides a [`Fetcher`] trait that turns a document URL into its
//! raw text, independent of where documents actually live. This enables:
//!
//! - **Unit testing** without network or filesystem access
//! - **Backend flexibility** (remote site over HTTP, local checkout on disk)
//! - **Clean separation** between page resolution and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Fetcher`] trait with a single `fetch()` method
//! - [`HttpFetcher`] for `http(s)://` URLs, backed by a pooled `ureq` agent
//! - [`FsFetcher`] mapping URL paths onto a root directory
//! - [`RoutingFetcher`] dispatching between the two by URL scheme
//! - [`MockFetcher`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use mdp_fetch::{Fetcher, FsFetcher};
//!
//! let fetcher = FsFetcher::new(PathBuf::from("site"));
//! let markdown = fetcher.fetch("/Content/Intro.md")?;
//! ```

mod fetcher;
mod fs;
mod http;
#[cfg(feature = "mock")]
mod mock;
mod routing;

pub use fetcher::{FetchError, FetchErrorKind, Fetcher};
pub use fs::FsFetcher;
pub use http::HttpFetcher;
#[cfg(feature = "mock")]
pub use mock::MockFetcher;
pub use routing::RoutingFetcher;
