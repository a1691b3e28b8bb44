use std::collections::HashMap;

use super::{Middleware, MiddlewareResult};
use crate::http::mime;
use crate::static_resource::{Next, Request, StaticResourceResponse};

/// Only lets through files with a known Content-Type
///
/// Unknown extensions short-circuit with a failure response so the file is
/// never served; known ones get their `Content-Type` header.
#[derive(Debug, Default, Clone)]
pub struct ContentTypeFilterMiddleware {
    type_map: HashMap<String, String>,
}

impl ContentTypeFilterMiddleware {
    /// `type_map` adds to (and overrides) the built-in extension table
    pub fn new(type_map: HashMap<String, String>) -> Self {
        let type_map = type_map
            .into_iter()
            .map(|(ext, content_type)| (ext.trim_start_matches('.').to_ascii_lowercase(), content_type))
            .collect();
        Self { type_map }
    }
}

impl Middleware for ContentTypeFilterMiddleware {
    fn process(&self, request: &Request, filename: &str, next: Next<'_>) -> MiddlewareResult {
        let Some(content_type) = mime::content_type_for(filename, &self.type_map) else {
            tracing::debug!(filename, "no content type for file, not serving it");
            return Ok(StaticResourceResponse::failure());
        };

        let mut response = next.run(request, filename)?;
        response.add_header("Content-Type", content_type);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::static_resource::{from_fn, MiddlewareQueue};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_known_type_sets_header() {
        let queue = MiddlewareQueue::new(vec![Box::new(ContentTypeFilterMiddleware::default())]);
        let response = queue.handle(&Request::new(()), "public/app.js").unwrap();

        assert!(!response.is_failure());
        assert_eq!(response.header("Content-Type"), Some("application/javascript"));
    }

    #[test]
    fn test_unknown_type_fails_without_delegating() {
        let reached = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&reached);
        let queue = MiddlewareQueue::new(vec![
            Box::new(ContentTypeFilterMiddleware::default()),
            Box::new(from_fn(move |req, filename, next| {
                flag.store(true, Ordering::SeqCst);
                next.run(req, filename)
            })),
        ]);

        let response = queue.handle(&Request::new(()), "public/index.php").unwrap();

        assert!(response.is_failure());
        assert!(!response.has_header("Content-Type"));
        assert!(!reached.load(Ordering::SeqCst));
    }

    #[test]
    fn test_configured_types() {
        let mut type_map = HashMap::new();
        type_map.insert(".PHP".to_string(), "text/plain".to_string());
        let queue = MiddlewareQueue::new(vec![Box::new(ContentTypeFilterMiddleware::new(type_map))]);

        let response = queue.handle(&Request::new(()), "public/index.php").unwrap();

        assert!(!response.is_failure());
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
    }
}
