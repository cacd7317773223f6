//! Markdown converter contract and the `pulldown-cmark` implementation.

use std::collections::BTreeMap;

use pulldown_cmark::{Event, Options, Parser, html};

use crate::front_matter::{parse_header, split_front_matter};

/// Result of converting one Markdown document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedContent {
    /// Rendered HTML fragment.
    pub html: String,
    /// Metadata from the document header block (empty when absent).
    pub metadata: BTreeMap<String, String>,
}

/// Error returned when a document cannot be converted.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The metadata header block is malformed.
    #[error("{0}")]
    Metadata(String),
}

/// Converts Markdown text into [`ParsedContent`].
///
/// Implementations must be pure: the same input always yields the same
/// output. They are shared across the parallel page loader, hence
/// `Send + Sync`.
pub trait MarkdownConverter: Send + Sync {
    /// Convert a Markdown document.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Metadata`] if the header block is malformed.
    fn convert(&self, markdown: &str) -> Result<ParsedContent, ConvertError>;
}

/// Default converter producing HTML with `pulldown-cmark`.
///
/// Enabled extensions: tables, strikethrough, task lists and GFM blockquote
/// alerts. Single newlines inside a paragraph become `<br />` unless
/// [`with_simple_line_breaks(false)`](Self::with_simple_line_breaks) is set.
#[derive(Clone, Debug)]
pub struct HtmlConverter {
    gfm: bool,
    simple_line_breaks: bool,
}

impl Default for HtmlConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlConverter {
    /// Create a converter with GFM and simple line breaks enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            simple_line_breaks: true,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Render single line breaks inside paragraphs as `<br />`.
    #[must_use]
    pub fn with_simple_line_breaks(mut self, enabled: bool) -> Self {
        self.simple_line_breaks = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render a Markdown body (without header) to HTML.
    #[must_use]
    pub fn render_html(&self, markdown: &str) -> String {
        let simple_line_breaks = self.simple_line_breaks;
        let parser = Parser::new_ext(markdown, self.parser_options()).map(|event| match event {
            Event::SoftBreak if simple_line_breaks => Event::HardBreak,
            other => other,
        });

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}

impl MarkdownConverter for HtmlConverter {
    fn convert(&self, markdown: &str) -> Result<ParsedContent, ConvertError> {
        let split = split_front_matter(markdown);
        let metadata = match split.header {
            Some(header) => parse_header(header)?,
            None => BTreeMap::new(),
        };

        Ok(ParsedContent {
            html: self.render_html(split.body),
            metadata,
        })
    }
}
