//! MIME type detection module
//!
//! Maps file extensions to Content-Type values. Only extensions listed here
//! (or added through `static_files.type_map`) are served as static files.

use std::collections::HashMap;
use std::path::Path;

/// Look up the Content-Type for a known extension
///
/// # Examples
/// ```
/// use yarhs_static::http::mime::lookup;
/// assert_eq!(lookup("html"), Some("text/html; charset=utf-8"));
/// assert_eq!(lookup("MP4"), Some("video/mp4"));
/// assert_eq!(lookup("php"), None);
/// ```
pub fn lookup(extension: &str) -> Option<&'static str> {
    let content_type = match extension.to_ascii_lowercase().as_str() {
        // Text
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css",
        "csv" => "text/csv",
        "txt" | "md" => "text/plain; charset=utf-8",
        "xml" => "application/xml",

        // JavaScript/WASM
        "js" | "mjs" => "application/javascript",
        "json" | "map" => "application/json",
        "wasm" => "application/wasm",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "bmp" => "image/bmp",

        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogv" => "video/ogg",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",

        // Audio
        "mp3" => "audio/mpeg",
        "ogg" | "oga" => "audio/ogg",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "eot" => "application/vnd.ms-fontobject",

        // Documents
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        "tar" => "application/x-tar",

        _ => return None,
    };
    Some(content_type)
}

/// Resolve the Content-Type for a file name
///
/// `overrides` (lower-case extension → type) wins over the built-in table.
/// Files without an extension, or with an unknown one, yield `None`.
pub fn content_type_for<'a>(
    filename: &str,
    overrides: &'a HashMap<String, String>,
) -> Option<&'a str> {
    let extension = Path::new(filename).extension()?.to_str()?;
    overrides
        .get(&extension.to_ascii_lowercase())
        .map(String::as_str)
        .or_else(|| lookup(extension))
}
