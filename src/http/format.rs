//! Response format negotiation module
//!
//! Resolution order:
//! 1. explicit override (`resolve_override`)
//! 2. configured default request format
//! 3. `Accept` header sniffing, falling back to the catch-all format

use super::accept;
use super::mime::{Format, FormatRegistry, ANY_MEDIA_TYPE, OCTET_STREAM};
use crate::error::UnknownFormatError;

/// Charset appended to every negotiated `Content-Type`
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Build a `Content-Type` header value for a MIME type
///
/// # Examples
/// ```
/// use action_negotiation::http::format::content_type;
/// assert_eq!(content_type("text/html"), "text/html; charset=utf-8");
/// ```
pub fn content_type(mime_type: &str) -> String {
    format!("{mime_type}; charset={DEFAULT_CHARSET}")
}

/// `Content-Type` header value for a resolved format
pub fn content_type_for(format: &Format, registry: &FormatRegistry) -> String {
    content_type(registry.mime_type_for(format).unwrap_or(OCTET_STREAM))
}

/// Resolve an explicitly requested format name
///
/// `None`, `""` and whitespace-only names are rejected, as are names missing
/// from the registry.
pub fn resolve_override(
    name: Option<&str>,
    registry: &FormatRegistry,
) -> Result<Format, UnknownFormatError> {
    let format = match name.map(Format::new) {
        Some(format) if !format.as_str().is_empty() => format,
        _ => return Err(UnknownFormatError::Blank),
    };

    if registry.contains(&format) {
        Ok(format)
    } else {
        Err(UnknownFormatError::Unregistered {
            name: format.as_str().to_string(),
        })
    }
}

/// Negotiate the response format without an explicit override
///
/// A configured default format wins over the `Accept` header.
pub fn negotiate(
    accept_header: Option<&str>,
    registry: &FormatRegistry,
    default_format: Option<&Format>,
) -> Format {
    let format = match default_format {
        Some(format) => format.clone(),
        None => sniff(accept_header, registry),
    };
    tracing::debug!(%format, accept = accept_header, "negotiated format");
    format
}

/// Pick the first registered type from the `Accept` header
///
/// `*/*` never displaces a specific registered type, wherever it appears in
/// the list: it only matters when nothing else matches, and then the result
/// is the catch-all format anyway.
///
/// # Examples
/// ```
/// use action_negotiation::http::format::sniff;
/// use action_negotiation::http::mime::{Format, FormatRegistry};
///
/// let registry = FormatRegistry::with_defaults();
/// let accept = Some("text/html, application/xhtml+xml, image/jxr, */*");
/// assert_eq!(sniff(accept, &registry), Format::HTML);
/// assert_eq!(sniff(Some("*/*"), &registry), Format::ALL);
/// ```
pub fn sniff(accept_header: Option<&str>, registry: &FormatRegistry) -> Format {
    accept::parse(accept_header)
        .iter()
        .filter(|token| token.as_str() != ANY_MEDIA_TYPE)
        .find_map(|token| registry.format_for(token))
        .cloned()
        .unwrap_or(Format::ALL)
}

/// Check the `Accept` header against an allow-list of formats
///
/// An empty allow-list, an absent header and `*/*` accept everything.
/// Otherwise some token must name a MIME type of an allowed format, or be a
/// `type/*` range covering one.
pub fn is_acceptable(
    accept_header: Option<&str>,
    registry: &FormatRegistry,
    allowed: &[Format],
) -> bool {
    if allowed.is_empty() {
        return true;
    }

    let tokens = accept::parse(accept_header);
    if tokens.is_empty() {
        return true;
    }

    let allowed_mime_types: Vec<&str> = allowed
        .iter()
        .flat_map(|format| registry.mime_types_for(format))
        .collect();

    tokens.iter().any(|token| {
        token == ANY_MEDIA_TYPE
            || allowed_mime_types
                .iter()
                .any(|mime| media_range_matches(token, mime))
    })
}

/// Match a media range (`text/html`, `text/*`) against a MIME type
fn media_range_matches(range: &str, mime_type: &str) -> bool {
    match range.strip_suffix("/*") {
        Some(main_type) => mime_type
            .split_once('/')
            .is_some_and(|(mime_main, _)| mime_main.eq_ignore_ascii_case(main_type)),
        None => range.eq_ignore_ascii_case(mime_type),
    }
}
