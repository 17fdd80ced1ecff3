//! `Expires` header support
//!
//! An expiry also sets `max-age` so HTTP/1.1 caches agree with the date.

use chrono::{DateTime, Duration, Utc};

use super::directives::{DirectiveSet, Directives, Entry};

/// Format a timestamp as an HTTP-date (RFC 7231 IMF-fixdate)
///
/// # Examples
/// ```
/// use action_negotiation::http::cache::http_date;
/// use chrono::{TimeZone, Utc};
/// let time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
/// assert_eq!(http_date(time), "Wed, 01 May 2024 12:00:00 GMT");
/// ```
pub fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Relative expiry: `Expires` plus matching Cache-Control directives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expires {
    seconds: u64,
    directives: Directives,
}

impl Expires {
    /// Expire `seconds` from now; `max_age=seconds` is appended to `entries`
    pub fn new<E: Into<Entry>>(seconds: u64, entries: impl IntoIterator<Item = E>) -> Self {
        let mut set: DirectiveSet = entries.into_iter().collect();
        set.push(Entry::value("max_age", seconds));
        Self {
            seconds,
            directives: set.finish(),
        }
    }

    pub const fn seconds(&self) -> u64 {
        self.seconds
    }

    pub const fn directives(&self) -> &Directives {
        &self.directives
    }

    /// `Expires` header value relative to `now`
    pub fn header_value_at(&self, now: DateTime<Utc>) -> String {
        let offset = i64::try_from(self.seconds).unwrap_or(i64::MAX);
        let time = Duration::try_seconds(offset)
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        http_date(time)
    }

    pub fn header_value(&self) -> String {
        self.header_value_at(Utc::now())
    }
}
