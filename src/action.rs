//! Per-request negotiation context
//!
//! An [`Action`] borrows the request headers and the shared [`Settings`],
//! memoizes what it parses, and collects the response headers that follow
//! from the negotiation.

use std::cell::OnceCell;

use chrono::{DateTime, Utc};
use hyper::header::{self, HeaderMap, HeaderName, HeaderValue};

use crate::config::Settings;
use crate::error::{Result, UnknownFormatError};
use crate::http::cache::{DirectiveSet, Directives, Entry, Expires};
use crate::http::format;
use crate::http::language;
use crate::http::mime::Format;

/// Negotiation state of a single request
///
/// Not shareable between requests: caches are filled lazily on first read.
#[derive(Debug)]
pub struct Action<'a> {
    settings: &'a Settings,
    headers: &'a HeaderMap,
    languages: OnceCell<Vec<String>>,
    format: OnceCell<Format>,
    cache_control: Option<Directives>,
    expires: Option<Expires>,
}

impl<'a> Action<'a> {
    pub fn new(settings: &'a Settings, headers: &'a HeaderMap) -> Self {
        Self {
            settings,
            headers,
            languages: OnceCell::new(),
            format: OnceCell::new(),
            cache_control: None,
            expires: None,
        }
    }

    pub const fn settings(&self) -> &'a Settings {
        self.settings
    }

    /// Request header value; repeated headers are joined with `, `
    ///
    /// Values that are not visible ASCII are ignored.
    fn header(&self, name: &HeaderName) -> Option<String> {
        let values: Vec<&str> = self
            .headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();

        if values.is_empty() {
            None
        } else {
            Some(values.join(", "))
        }
    }

    /// Accepted languages in preference order, parsed once per request
    pub fn languages(&self) -> &[String] {
        self.languages.get_or_init(|| {
            language::accepted_languages(self.header(&header::ACCEPT_LANGUAGE).as_deref())
        })
    }

    /// Preferred language, or the configured default
    pub fn language(&self) -> String {
        let language = language::first_or_default(self.languages(), self.settings.default_language());
        tracing::debug!(%language, "resolved language");
        language
    }

    /// Whether the client accepts `candidate`
    pub fn accept_language(&self, candidate: &str) -> bool {
        language::contains_or_empty(self.languages(), candidate)
    }

    /// Response format, negotiated on first read
    pub fn format(&self) -> &Format {
        self.format.get_or_init(|| {
            format::negotiate(
                self.header(&header::ACCEPT).as_deref(),
                self.settings.registry(),
                self.settings.default_request_format(),
            )
        })
    }

    /// Explicitly choose the response format
    ///
    /// On error the previously negotiated format is kept.
    pub fn set_format(&mut self, name: Option<&str>) -> Result<Format, UnknownFormatError> {
        let format = format::resolve_override(name, self.settings.registry())?;
        tracing::debug!(%format, "format set explicitly");
        self.format = OnceCell::from(format.clone());
        Ok(format)
    }

    /// `Content-Type` value for the response format
    pub fn content_type(&self) -> String {
        format::content_type_for(self.format(), self.settings.registry())
    }

    /// Whether `Accept` admits one of the configured formats
    ///
    /// Callers answer `406 Not Acceptable` when this is false.
    pub fn is_acceptable(&self) -> bool {
        format::is_acceptable(
            self.header(&header::ACCEPT).as_deref(),
            self.settings.registry(),
            self.settings.accepted_formats(),
        )
    }

    /// Declare the Cache-Control directives of the response
    ///
    /// Drops an earlier [`Action::expires`], whose `max-age` would no longer match.
    pub fn cache_control<E: Into<Entry>>(&mut self, entries: impl IntoIterator<Item = E>) {
        let directives = entries.into_iter().collect::<DirectiveSet>().finish();
        self.cache_control = Some(directives);
        self.expires = None;
    }

    /// Expire the response `seconds` from now
    ///
    /// Also replaces Cache-Control with `entries` plus `max-age=seconds`.
    pub fn expires<E: Into<Entry>>(&mut self, seconds: u64, entries: impl IntoIterator<Item = E>) {
        let expires = Expires::new(seconds, entries);
        self.cache_control = Some(expires.directives().clone());
        self.expires = Some(expires);
    }

    /// Cache-Control directives in effect: declared ones, else the configured defaults
    pub fn directives(&self) -> Directives {
        self.cache_control.clone().unwrap_or_else(|| {
            self.settings
                .cache_control()
                .iter()
                .cloned()
                .collect::<DirectiveSet>()
                .finish()
        })
    }

    pub fn response_headers(&self) -> Result<HeaderMap> {
        self.response_headers_at(Utc::now())
    }

    /// Response headers produced by the negotiation, relative to `now`
    ///
    /// `Cache-Control` is omitted when no directive applies.
    pub fn response_headers_at(&self, now: DateTime<Utc>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(&self.content_type())?);

        let cache_control = self.directives().header_value_at(now);
        if !cache_control.is_empty() {
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_str(&cache_control)?);
        }

        if let Some(expires) = &self.expires {
            headers.insert(header::EXPIRES, HeaderValue::from_str(&expires.header_value_at(now))?);
        }

        Ok(headers)
    }
}
