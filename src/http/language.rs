//! Language negotiation module
//!
//! Resolves the preferred language from `Accept-Language`, falling back to
//! the configured default language.

use super::accept;

/// `Accept-Language` value meaning "any language"
pub const ACCEPT_ALL_LANGUAGES: &str = "*";

/// Ordered list of accepted language codes
///
/// The wildcard header and an absent header both yield an empty list.
pub fn accepted_languages(accept_language: Option<&str>) -> Vec<String> {
    match accept_language {
        Some(ACCEPT_ALL_LANGUAGES) | None => Vec::new(),
        header => accept::parse(header),
    }
}

/// Return the first accepted language code, or `default_language`
///
/// # Examples
/// ```
/// use action_negotiation::http::language::resolve_language;
/// assert_eq!(resolve_language(Some("da, en;q=0.6"), "en"), "da");
/// assert_eq!(resolve_language(Some("*"), "en"), "en");
/// assert_eq!(resolve_language(None, "en-US"), "en-US");
/// ```
pub fn resolve_language(accept_language: Option<&str>, default_language: &str) -> String {
    first_or_default(&accepted_languages(accept_language), default_language)
}

/// Check whether `candidate` is acceptable to the client
///
/// An empty preference list excludes nothing.
pub fn is_language_accepted(accept_language: Option<&str>, candidate: &str) -> bool {
    contains_or_empty(&accepted_languages(accept_language), candidate)
}

pub(crate) fn first_or_default(languages: &[String], default_language: &str) -> String {
    languages
        .first()
        .map_or_else(|| default_language.to_string(), Clone::clone)
}

pub(crate) fn contains_or_empty(languages: &[String], candidate: &str) -> bool {
    languages.is_empty() || languages.iter().any(|language| language == candidate)
}
