//! HTTP cache control module
//!
//! Provides `ETag` generation, conditional request matching and
//! `Cache-Control` directive validation.

use serde::Deserialize;

/// How an `ETag` is derived from file metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ETagStrength {
    /// `W/"<mtime>"`
    #[default]
    Weak,
    /// `"<mtime>-<size>"`
    Strong,
}

/// Generate an `ETag` from a modification time (unix seconds) and a size
///
/// Returns `None` when the metadata is too poor to identify the content:
/// a zero mtime, or a zero size for strong validators.
pub fn generate_etag(strength: ETagStrength, mtime: u64, size: u64) -> Option<String> {
    if mtime == 0 {
        return None;
    }
    match strength {
        ETagStrength::Weak => Some(format!("W/\"{mtime:x}\"")),
        ETagStrength::Strong if size == 0 => None,
        ETagStrength::Strong => Some(format!("\"{mtime:x}-{size:x}\"")),
    }
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Supports:
/// - Single `ETag`: `"abc123"`
/// - Multiple `ETags`: `"abc123", "def456"`
/// - Wildcard: `*`
///
/// Comparison is weak, as RFC 9110 requires for `If-None-Match`:
/// `W/"abc"` matches `"abc"`.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    let etag = strip_weak(etag);
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .map(str::trim)
            .any(|e| e == "*" || strip_weak(e) == etag)
    })
}

fn strip_weak(etag: &str) -> &str {
    etag.strip_prefix("W/").unwrap_or(etag)
}

const BARE_DIRECTIVES: &[&str] = &[
    "must-revalidate",
    "no-cache",
    "no-store",
    "no-transform",
    "public",
    "private",
    "proxy-revalidate",
];

/// Check a single `Cache-Control` response directive
///
/// Accepts the bare directives above, and `max-age=<seconds>` /
/// `s-maxage=<seconds>`.
pub fn is_valid_directive(directive: &str) -> bool {
    if BARE_DIRECTIVES.contains(&directive) {
        return true;
    }
    match directive.split_once('=') {
        Some(("max-age" | "s-maxage", seconds)) => {
            !seconds.is_empty() && seconds.bytes().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}
