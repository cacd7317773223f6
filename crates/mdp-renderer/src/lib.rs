//! Markdown to HTML conversion for mdp.
//!
//! This crate defines the [`MarkdownConverter`] contract used by the page
//! loading pipeline and ships [`HtmlConverter`], the default implementation
//! built on `pulldown-cmark`.
//!
//! A converted document is a [`ParsedContent`]: the HTML fragment plus the
//! metadata read from an optional header block at the top of the document.
//!
//! # Example
//!
//! ```
//! use mdp_renderer::{HtmlConverter, MarkdownConverter};
//!
//! let markdown = "---\nauthor: Ada\n---\n# Hello\n\n**Bold** text";
//! let content = HtmlConverter::new().convert(markdown).unwrap();
//!
//! assert!(content.html.contains("<h1>Hello</h1>"));
//! assert_eq!(content.metadata.get("author").map(String::as_str), Some("Ada"));
//! ```

mod converter;
mod front_matter;

pub use converter::{ConvertError, HtmlConverter, MarkdownConverter, ParsedContent};
