//! Static resource response value
//!
//! Describes the outcome decided so far for a single static resource request.
//! Middleware mutates it on the way back up the queue; the server consumes it
//! by value once the queue returns.

/// Outcome of the static resource pipeline for one request
///
/// Defaults to `200`, no headers, body enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticResourceResponse {
    status: u16,
    headers: Vec<(String, String)>,
    send_content: bool,
    failure: bool,
    content_length: Option<u64>,
}

impl StaticResourceResponse {
    /// Terminal response: `200`, no headers, body enabled
    pub const fn new() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            send_content: true,
            failure: false,
            content_length: None,
        }
    }

    /// Response with the given status and no body
    ///
    /// Used by middleware that short-circuits the queue (405, 416, ...).
    pub const fn with_status(status: u16) -> Self {
        let mut response = Self::new();
        response.status = status;
        response.send_content = false;
        response
    }

    /// Response telling the caller the resource is not servable as a static file
    pub const fn failure() -> Self {
        let mut response = Self::new();
        response.failure = true;
        response
    }

    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Set the status code; range validity is up to the middleware
    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    /// Set a header
    ///
    /// An existing header with the same name (ASCII case-insensitive) is
    /// overwritten in place, so insertion order is kept and names stay unique.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.headers.push((name, value)),
        }
    }

    /// Look up a header value by name (ASCII case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    /// Headers in insertion order
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Headers-only response (304, 405, HEAD, OPTIONS)
    pub fn disable_content(&mut self) {
        self.send_content = false;
    }

    pub const fn should_send_content(&self) -> bool {
        self.send_content
    }

    pub fn mark_as_failure(&mut self) {
        self.failure = true;
    }

    pub const fn is_failure(&self) -> bool {
        self.failure
    }

    /// Override the `Content-Length` the server would otherwise take from the file
    pub fn set_content_length(&mut self, length: u64) {
        self.content_length = Some(length);
    }

    pub const fn content_length(&self) -> Option<u64> {
        self.content_length
    }
}

impl Default for StaticResourceResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let response = StaticResourceResponse::default();
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers().count(), 0);
        assert!(response.should_send_content());
        assert!(!response.is_failure());
        assert_eq!(response.content_length(), None);
    }

    #[test]
    fn test_add_header_overwrites_in_place() {
        let mut response = StaticResourceResponse::new();
        response.add_header("Content-Type", "text/plain");
        response.add_header("ETag", "\"abc\"");
        response.add_header("content-type", "text/css");

        let headers: Vec<_> = response.headers().collect();
        assert_eq!(
            headers,
            vec![("Content-Type", "text/css"), ("ETag", "\"abc\"")]
        );
        assert_eq!(response.header("CONTENT-TYPE"), Some("text/css"));
    }

    #[test]
    fn test_with_status_has_no_body() {
        let response = StaticResourceResponse::with_status(405);
        assert_eq!(response.status(), 405);
        assert!(!response.should_send_content());
    }

    #[test]
    fn test_set_status_is_not_validated() {
        let mut response = StaticResourceResponse::new();
        response.set_status(999);
        assert_eq!(response.status(), 999);
    }

    #[test]
    fn test_failure() {
        assert!(StaticResourceResponse::failure().is_failure());

        let mut response = StaticResourceResponse::new();
        response.mark_as_failure();
        assert!(response.is_failure());
    }
}
