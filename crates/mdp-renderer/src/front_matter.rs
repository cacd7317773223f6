//! Metadata header extraction.
//!
//! A document may start with a header block of `key: value` lines delimited
//! either by `---` lines or by `«««` / `»»»` lines:
//!
//! ```text
//! ---
//! title: Getting started
//! author: Ada
//! ---
//! # Body starts here
//! ```
//!
//! The header must be the very first line of the document. An opening
//! delimiter without a matching closing one is not a header; the text is
//! left to the Markdown parser untouched (a leading `---` is then a rule).

use std::collections::BTreeMap;

use crate::converter::ConvertError;

/// Delimiter pairs accepted around a metadata header.
const DELIMITERS: [(&str, &str); 2] = [("---", "---"), ("«««", "»»»")];

/// A document split into its raw header and body.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FrontMatter<'a> {
    /// Raw header text between the delimiters, if any.
    pub(crate) header: Option<&'a str>,
    /// Remaining Markdown body.
    pub(crate) body: &'a str,
}

/// Split a document into an optional header block and its body.
pub(crate) fn split_front_matter(document: &str) -> FrontMatter<'_> {
    let document = document.strip_prefix('\u{feff}').unwrap_or(document);

    for (open, close) in DELIMITERS {
        let Some(rest) = strip_delimiter_line(document, open) else {
            continue;
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == close {
                return FrontMatter {
                    header: Some(&rest[..offset]),
                    body: &rest[offset + line.len()..],
                };
            }
            offset += line.len();
        }
    }

    FrontMatter {
        header: None,
        body: document,
    }
}

/// Strip a delimiter line (`---\n`) from the start of `text`.
fn strip_delimiter_line<'a>(text: &'a str, delimiter: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(delimiter)?;
    let (line_rest, after) = rest.split_once('\n')?;
    line_rest.trim().is_empty().then_some(after)
}

/// Parse a header block into a flat string mapping.
///
/// Each non-blank line is `key: value`. The key ends at the first colon and
/// the value is kept verbatim after the separating spaces, so `1.10` stays
/// `1.10` and `Re: Intro` keeps its colon. Any other non-blank line is
/// malformed.
pub(crate) fn parse_header(header: &str) -> Result<BTreeMap<String, String>, ConvertError> {
    let mut metadata = BTreeMap::new();

    for (index, line) in header.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let malformed = || {
            ConvertError::Metadata(format!(
                "invalid metadata header line {}: `{line}`",
                index + 1
            ))
        };

        if line.starts_with(char::is_whitespace) {
            return Err(malformed());
        }
        let (key, value) = line.split_once(':').ok_or_else(malformed)?;
        let key = key.trim_end();
        if key.is_empty() || !(value.is_empty() || value.starts_with(' ')) {
            return Err(malformed());
        }

        metadata.insert(key.to_owned(), value.trim_start_matches(' ').to_owned());
    }

    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_dashes() {
        let doc = "---\ntitle: Intro\n---\n# Body\n";
        let split = split_front_matter(doc);
        assert_eq!(split.header, Some("title: Intro\n"));
        assert_eq!(split.body, "# Body\n");
    }

    #[test]
    fn test_split_guillemets() {
        let doc = "«««\nauthor: Ada\n»»»\nText";
        let split = split_front_matter(doc);
        assert_eq!(split.header, Some("author: Ada\n"));
        assert_eq!(split.body, "Text");
    }

    #[test]
    fn test_split_crlf() {
        let doc = "---\r\ntitle: Intro\r\n---\r\nBody";
        let split = split_front_matter(doc);
        assert_eq!(split.header, Some("title: Intro\r\n"));
        assert_eq!(split.body, "Body");
    }

    #[test]
    fn test_split_no_header() {
        let doc = "# Just a page\n\n---\n\nafter a rule";
        let split = split_front_matter(doc);
        assert_eq!(split.header, None);
        assert_eq!(split.body, doc);
    }

    #[test]
    fn test_split_unclosed_header_is_body() {
        let doc = "---\ntitle: Intro\n# Body";
        let split = split_front_matter(doc);
        assert_eq!(split.header, None);
        assert_eq!(split.body, doc);
    }

    #[test]
    fn test_split_empty_header() {
        let split = split_front_matter("---\n---\nBody");
        assert_eq!(split.header, Some(""));
        assert_eq!(split.body, "Body");
    }

    #[test]
    fn test_split_strips_bom() {
        let split = split_front_matter("\u{feff}---\na: b\n---\nBody");
        assert_eq!(split.header, Some("a: b\n"));
    }

    #[test]
    fn test_parse_header_values_verbatim() {
        let meta = parse_header("title: \"Quoted\"\ndraft: true\norder: 3\nempty:\n").unwrap();
        assert_eq!(meta.get("title").map(String::as_str), Some("\"Quoted\""));
        assert_eq!(meta.get("draft").map(String::as_str), Some("true"));
        assert_eq!(meta.get("order").map(String::as_str), Some("3"));
        assert_eq!(meta.get("empty").map(String::as_str), Some(""));
    }

    #[test]
    fn test_parse_header_value_with_colon() {
        let meta = parse_header("title: Re: Intro\nlink: https://example.com/a\n").unwrap();
        assert_eq!(meta["title"], "Re: Intro");
        assert_eq!(meta["link"], "https://example.com/a");
    }

    #[test]
    fn test_parse_header_numeric_looking_value() {
        let meta = parse_header("version: 1.10\nid: 007\n").unwrap();
        assert_eq!(meta["version"], "1.10");
        assert_eq!(meta["id"], "007");
    }

    #[test]
    fn test_parse_header_crlf_and_key_with_spaces() {
        let meta = parse_header("last updated:  2024-01-02\r\n").unwrap();
        assert_eq!(meta["last updated"], "2024-01-02");
    }

    #[test]
    fn test_parse_header_empty() {
        assert!(parse_header("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_header_line_without_colon() {
        let err = parse_header("title: Intro\njust some text").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_header_rejects_indented_lines() {
        let err = parse_header("tags:\n  - a\n  - b").unwrap_err();
        assert!(matches!(err, ConvertError::Metadata(_)));
    }

    #[test]
    fn test_parse_header_rejects_missing_key_or_separator() {
        assert!(parse_header(": value").is_err());
        assert!(parse_header("a:b").is_err());
    }
}
