//! Cache-Control directives
//!
//! Directives are declared with internal names (`max_age`, `no_cache`) and
//! emitted with wire names (`max-age`, `no-cache`). Unknown names are dropped.

use chrono::{DateTime, Utc};

/// Directives that are implicitly true
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagName {
    Public,
    Private,
    NoCache,
    NoStore,
    NoTransform,
    MustRevalidate,
    ProxyRevalidate,
}

impl FlagName {
    pub fn parse(name: &str) -> Option<Self> {
        match normalize(name).as_str() {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "no_cache" => Some(Self::NoCache),
            "no_store" => Some(Self::NoStore),
            "no_transform" => Some(Self::NoTransform),
            "must_revalidate" => Some(Self::MustRevalidate),
            "proxy_revalidate" => Some(Self::ProxyRevalidate),
            _ => None,
        }
    }

    /// Name as written in the header
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::NoCache => "no-cache",
            Self::NoStore => "no-store",
            Self::NoTransform => "no-transform",
            Self::MustRevalidate => "must-revalidate",
            Self::ProxyRevalidate => "proxy-revalidate",
        }
    }
}

/// Directives that carry a number of seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueName {
    MaxAge,
    SMaxage,
    MinFresh,
    MaxStale,
}

impl ValueName {
    pub fn parse(name: &str) -> Option<Self> {
        match normalize(name).as_str() {
            "max_age" => Some(Self::MaxAge),
            "s_maxage" => Some(Self::SMaxage),
            "min_fresh" => Some(Self::MinFresh),
            "max_stale" => Some(Self::MaxStale),
            _ => None,
        }
    }

    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::MaxAge => "max-age",
            Self::SMaxage => "s-maxage",
            Self::MinFresh => "min-fresh",
            Self::MaxStale => "max-stale",
        }
    }
}

/// Accept `must-revalidate`, `:must_revalidate` and `must_revalidate` alike
fn normalize(name: &str) -> String {
    let name = name.trim();
    name.strip_prefix(':').unwrap_or(name).replace('-', "_")
}

/// Value of a valued directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveValue {
    /// Fixed number of seconds
    Seconds(u64),
    /// Absolute expiry; the remaining time is computed when the header is built
    Until(DateTime<Utc>),
}

impl DirectiveValue {
    /// Seconds this value stands for at `now`
    ///
    /// Remaining time is rounded to the nearest second and never negative.
    pub fn seconds_at(self, now: DateTime<Utc>) -> u64 {
        match self {
            Self::Seconds(seconds) => seconds,
            Self::Until(instant) => {
                let remaining_ms = (instant - now).num_milliseconds();
                u64::try_from((remaining_ms + 500).div_euclid(1000)).unwrap_or(0)
            }
        }
    }
}

impl From<u64> for DirectiveValue {
    fn from(seconds: u64) -> Self {
        Self::Seconds(seconds)
    }
}

impl From<DateTime<Utc>> for DirectiveValue {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Until(instant)
    }
}

/// A recognized Cache-Control directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Flag(FlagName),
    Value(ValueName, DirectiveValue),
}

impl Directive {
    pub fn to_header_value_at(self, now: DateTime<Utc>) -> String {
        match self {
            Self::Flag(name) => name.wire_name().to_string(),
            Self::Value(name, value) => format!("{}={}", name.wire_name(), value.seconds_at(now)),
        }
    }

    fn is_flag(self, flag: FlagName) -> bool {
        self == Self::Flag(flag)
    }
}

/// Declarative directive as written by the caller: a bare name or a name/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Flag(String),
    Value(String, DirectiveValue),
}

impl Entry {
    pub fn flag(name: impl Into<String>) -> Self {
        Self::Flag(name.into())
    }

    pub fn value(name: impl Into<String>, seconds: u64) -> Self {
        Self::Value(name.into(), DirectiveValue::Seconds(seconds))
    }

    /// Valued entry expiring at `instant`
    pub fn until(name: impl Into<String>, instant: DateTime<Utc>) -> Self {
        Self::Value(name.into(), DirectiveValue::Until(instant))
    }

    /// Classify the entry, or `None` for names outside the known sets
    ///
    /// A value given for a flag name (or the reverse) is not recognized either.
    pub fn to_directive(&self) -> Option<Directive> {
        match self {
            Self::Flag(name) => FlagName::parse(name).map(Directive::Flag),
            Self::Value(name, value) => {
                ValueName::parse(name).map(|name| Directive::Value(name, *value))
            }
        }
    }
}

impl From<&str> for Entry {
    fn from(name: &str) -> Self {
        Self::flag(name)
    }
}

impl From<(&str, u64)> for Entry {
    fn from((name, seconds): (&str, u64)) -> Self {
        Self::value(name, seconds)
    }
}

impl From<(&str, DateTime<Utc>)> for Entry {
    fn from((name, instant): (&str, DateTime<Utc>)) -> Self {
        Self::until(name, instant)
    }
}

/// Directives under construction, in insertion order
#[derive(Debug, Clone, Default)]
pub struct DirectiveSet {
    directives: Vec<Directive>,
}

impl DirectiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; unknown names are silently dropped
    pub fn push(&mut self, entry: impl Into<Entry>) {
        let entry = entry.into();
        match entry.to_directive() {
            Some(directive) => self.directives.push(directive),
            None => tracing::debug!(?entry, "dropping unknown Cache-Control directive"),
        }
    }

    pub fn insert(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Resolve conflicts and freeze the set
    ///
    /// `private` wins over `public`: every `public` flag is removed when a
    /// `private` flag is present.
    pub fn finish(mut self) -> Directives {
        if self.directives.iter().any(|d| d.is_flag(FlagName::Private)) {
            self.directives.retain(|d| !d.is_flag(FlagName::Public));
        }
        Directives(self.directives)
    }
}

impl<E: Into<Entry>> FromIterator<E> for DirectiveSet {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<E: Into<Entry>> Extend<E> for DirectiveSet {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for entry in iter {
            self.push(entry);
        }
    }
}

/// Normalized, ready to serialize directives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives(Vec<Directive>);

impl Directives {
    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Header value with instants measured against the current time
    pub fn header_value(&self) -> String {
        self.header_value_at(Utc::now())
    }

    pub fn header_value_at(&self, now: DateTime<Utc>) -> String {
        self.0
            .iter()
            .map(|directive| directive.to_header_value_at(now))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Build a Cache-Control header value from declarative entries
///
/// # Examples
/// ```
/// use action_negotiation::http::cache::{build, Entry};
/// let value = build([
///     Entry::flag("public"),
///     Entry::flag("no_cache"),
///     Entry::value("max_age", 3600),
/// ]);
/// assert_eq!(value, "public, no-cache, max-age=3600");
/// ```
pub fn build<E: Into<Entry>>(entries: impl IntoIterator<Item = E>) -> String {
    entries
        .into_iter()
        .collect::<DirectiveSet>()
        .finish()
        .header_value()
}
