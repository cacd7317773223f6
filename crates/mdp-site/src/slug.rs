//! Page name to URL slug encoding.
//!
//! A slug is the URL-safe form of a page name. It is used both as the
//! document file stem (`{slug}.md`) and as the URL fragment (`#{slug}`).
//!
//! Every maximal run of characters outside `[A-Za-z0-9äöüßÄÖÜẞ]` becomes a
//! single `_`. Only these exact letters are kept, so look-alikes such as the
//! Kelvin sign `K` or the long `ſ` are replaced. Case is preserved and edge
//! runs are not trimmed:
//!
//! | Name | Slug |
//! |---|---|
//! | `API Ref` | `API_Ref` |
//! | `Über uns` | `Über_uns` |
//! | `  FAQ?!` | `_FAQ_` |
//!
//! The encoding is not injective: `A/B` and `A-B` both become `A_B`.
//! [`SiteMap::new`](crate::SiteMap::new) rejects such collisions.

use std::sync::LazyLock;

use regex::Regex;

/// Separator substituted for disallowed character runs.
pub const SLUG_SEPARATOR: &str = "_";

static DISALLOWED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9äöüßÄÖÜẞ]+").unwrap());

/// Encode a page name as a slug.
///
/// Pure and total: every input, including the empty string, has a slug.
#[must_use]
pub fn slug(name: &str) -> String {
    DISALLOWED_RUN
        .replace_all(name, SLUG_SEPARATOR)
        .into_owned()
}
