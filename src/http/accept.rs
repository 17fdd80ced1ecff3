//! Weighted header parsing module
//!
//! Parses `Accept` and `Accept-Language` style values (RFC 7231 section 5.3)
//! into a preference list. Parsing is lenient: malformed segments are
//! skipped, never reported.

/// A header token with its quality weight
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedValue {
    /// Token without parameters, e.g. `text/html` or `en-US`
    pub token: String,
    /// Quality weight in `[0, 1]`
    pub weight: f32,
}

/// Default weight for tokens without a `q` parameter
pub const DEFAULT_WEIGHT: f32 = 1.0;

/// Parse a weighted header into tokens ordered by preference
///
/// # Examples
/// ```
/// use action_negotiation::http::accept::parse;
/// assert_eq!(parse(Some("da, en;q=0.6")), vec!["da", "en"]);
/// assert_eq!(parse(Some("en;q=0.4, fr")), vec!["fr", "en"]);
/// assert!(parse(None).is_empty());
/// ```
pub fn parse(raw_header: Option<&str>) -> Vec<String> {
    parse_weighted(raw_header)
        .into_iter()
        .map(|value| value.token)
        .collect()
}

/// Parse a weighted header, keeping the weights
///
/// Ordering is by descending weight. `Vec::sort_by` is stable, so tokens
/// with equal weight keep their left-to-right order.
pub fn parse_weighted(raw_header: Option<&str>) -> Vec<WeightedValue> {
    let Some(header) = raw_header else {
        return Vec::new();
    };

    let mut values: Vec<WeightedValue> = header.split(',').filter_map(parse_segment).collect();
    values.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    tracing::trace!(header, parsed = ?values, "parsed weighted header");
    values
}

/// Parse a single `token;param=value;q=0.5` segment
fn parse_segment(segment: &str) -> Option<WeightedValue> {
    let mut parts = segment.split(';');
    let token = parts.next()?.trim();
    if token.is_empty() {
        return None;
    }

    let weight = parts
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("q"))
        .map_or(DEFAULT_WEIGHT, |(_, value)| parse_weight(value));

    Some(WeightedValue {
        token: token.to_string(),
        weight,
    })
}

/// Parse a quality value, falling back to the default on garbage
fn parse_weight(raw: &str) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(weight) if weight.is_finite() => weight.clamp(0.0, 1.0),
        _ => DEFAULT_WEIGHT,
    }
}
