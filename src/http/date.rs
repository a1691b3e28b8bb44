//! HTTP date handling
//!
//! `Last-Modified` is written as an IMF-fixdate; `If-Modified-Since` is read
//! leniently (IMF-fixdate or any RFC 2822 date).

use chrono::{DateTime, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

/// Format a unix timestamp as an IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
pub fn format_http_date(secs: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|dt| dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
}

/// Parse an HTTP date into unix seconds
pub fn parse_http_date(value: &str) -> Option<i64> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.timestamp())
}

/// Unix seconds of a file timestamp; times before the epoch become 0
pub fn unix_secs(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}
