//! Reading `Retry-After` directives.

use http::header::{HeaderMap, HeaderValue, RETRY_AFTER};
use std::time::{Duration, SystemTime};

/// The delay requested by the `Retry-After` header in `headers`, if any.
///
/// See [`parse_retry_after`].
pub fn retry_after(headers: &HeaderMap, now: SystemTime) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| parse_retry_after(value, now))
}

/// Parse a `Retry-After` header value.
///
/// A value made only of ASCII digits is a number of seconds. Anything else is
/// read as an HTTP date, and the delay is the time from `now` until that
/// date; a date in the past means "retry now". Values that are neither yield
/// `None`. Surrounding whitespace is ignored.
pub fn parse_retry_after(value: &HeaderValue, now: SystemTime) -> Option<Duration> {
    let value = value.to_str().ok()?.trim();

    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        return value.parse::<u64>().ok().map(Duration::from_secs);
    }

    let date = httpdate::parse_http_date(value).ok()?;
    Some(date.duration_since(now).unwrap_or(Duration::ZERO))
}
