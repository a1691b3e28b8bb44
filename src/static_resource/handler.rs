//! Static resource handler
//!
//! Glue between a request and the middleware queue: locate the file, run the
//! queue, and tell the caller whether there is a static resource to send.

use std::path::PathBuf;

use super::middleware::{
    CacheControlMiddleware, ContentTypeFilterMiddleware, ETagMiddleware, HeadMiddleware,
    LastModifiedMiddleware, MethodNotAllowedMiddleware, Middleware, OptionsMiddleware,
};
use super::{FileLocator, MiddlewareQueue, Request, StaticResourceResponse};
use crate::config::StaticFilesConfig;
use crate::error::{Error, MiddlewareError};

/// A file the pipeline decided to answer for
#[derive(Debug)]
pub struct StaticResource {
    pub filename: PathBuf,
    pub response: StaticResourceResponse,
}

/// Locates static files and runs them through the middleware queue
#[derive(Debug)]
pub struct StaticResourceHandler {
    locator: FileLocator,
    queue: MiddlewareQueue,
}

impl StaticResourceHandler {
    pub const fn new(locator: FileLocator, queue: MiddlewareQueue) -> Self {
        Self { locator, queue }
    }

    /// Handler with the default queue for the given configuration
    pub fn from_config(config: &StaticFilesConfig) -> Result<Self, Error> {
        let locator = FileLocator::new(&config.document_roots)?;
        Ok(Self::new(locator, default_queue(config)?))
    }

    pub const fn queue(&self) -> &MiddlewareQueue {
        &self.queue
    }

    /// Decide the response for a request
    ///
    /// `Ok(None)` means this is not a static resource: no file matched the
    /// path, or the queue marked the response as a failure.
    pub fn handle(&self, request: &Request) -> Result<Option<StaticResource>, MiddlewareError> {
        let Some(filename) = self.locator.find_file(request.uri().path()) else {
            return Ok(None);
        };
        let Some(name) = filename.to_str() else {
            tracing::debug!(path = %filename.display(), "skipping non UTF-8 file name");
            return Ok(None);
        };

        let response = self.queue.handle(request, name)?;
        if response.is_failure() {
            return Ok(None);
        }
        Ok(Some(StaticResource { filename, response }))
    }
}

/// The standard queue, outermost first
///
/// Content-type filtering runs first so unknown files are refused before
/// anything else; method checks follow; cache validators run innermost so
/// their 304 is seen by every outer middleware.
pub fn default_queue(config: &StaticFilesConfig) -> Result<MiddlewareQueue, Error> {
    let middleware: Vec<Box<dyn Middleware>> = vec![
        Box::new(ContentTypeFilterMiddleware::new(config.type_map.clone())),
        Box::new(MethodNotAllowedMiddleware),
        Box::new(OptionsMiddleware),
        Box::new(HeadMiddleware),
        Box::new(CacheControlMiddleware::new(&config.cache_control)?),
        Box::new(LastModifiedMiddleware::new(&config.last_modified.patterns)?),
        Box::new(ETagMiddleware::new(
            &config.etag.patterns,
            config.etag.validation,
        )?),
    ];
    Ok(MiddlewareQueue::new(middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CacheControlRule, ETagConfig, LastModifiedConfig};
    use crate::http::cache::ETagStrength;
    use hyper::Method;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn config(root: &TempDir) -> StaticFilesConfig {
        StaticFilesConfig {
            document_roots: vec![root.path().to_str().unwrap().to_string()],
            type_map: HashMap::new(),
            cache_control: vec![CacheControlRule {
                pattern: r"\.css$".to_string(),
                directives: vec!["public".to_string(), "max-age=60".to_string()],
            }],
            etag: ETagConfig {
                patterns: vec![".*".to_string()],
                validation: ETagStrength::Weak,
            },
            last_modified: LastModifiedConfig {
                patterns: vec![".*".to_string()],
            },
        }
    }

    fn site() -> TempDir {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("site.css"), "body {}").unwrap();
        fs::write(root.path().join("index.php"), "<?php").unwrap();
        root
    }

    fn request(method: Method, path: &str) -> Request {
        Request::builder().method(method).uri(path).body(()).unwrap()
    }

    #[test]
    fn test_default_queue_order() {
        let root = site();
        let handler = StaticResourceHandler::from_config(&config(&root)).unwrap();
        assert_eq!(handler.queue().len(), 7);
    }

    #[test]
    fn test_serves_known_file() {
        let root = site();
        let handler = StaticResourceHandler::from_config(&config(&root)).unwrap();

        let resource = handler
            .handle(&request(Method::GET, "/site.css"))
            .unwrap()
            .unwrap();

        assert_eq!(resource.filename.file_name().unwrap(), "site.css");
        let response = resource.response;
        assert_eq!(response.status(), 200);
        assert!(response.should_send_content());
        assert_eq!(response.header("Content-Type"), Some("text/css"));
        assert_eq!(response.header("Cache-Control"), Some("public, max-age=60"));
        assert!(response.has_header("ETag"));
        assert!(response.has_header("Last-Modified"));
    }

    #[test]
    fn test_missing_and_unknown_files_are_not_static() {
        let root = site();
        let handler = StaticResourceHandler::from_config(&config(&root)).unwrap();

        assert!(handler.handle(&request(Method::GET, "/nope.css")).unwrap().is_none());
        assert!(handler.handle(&request(Method::GET, "/index.php")).unwrap().is_none());
    }

    #[test]
    fn test_conditional_request_on_head() {
        let root = site();
        let handler = StaticResourceHandler::from_config(&config(&root)).unwrap();

        let first = handler
            .handle(&request(Method::GET, "/site.css"))
            .unwrap()
            .unwrap();
        let etag = first.response.header("ETag").unwrap().to_string();

        let conditional = Request::builder()
            .method(Method::HEAD)
            .uri("/site.css")
            .header("If-None-Match", etag)
            .body(())
            .unwrap();
        let resource = handler.handle(&conditional).unwrap().unwrap();

        assert_eq!(resource.response.status(), 304);
        assert!(!resource.response.should_send_content());
    }

    #[test]
    fn test_post_is_rejected() {
        let root = site();
        let handler = StaticResourceHandler::from_config(&config(&root)).unwrap();

        let resource = handler
            .handle(&request(Method::POST, "/site.css"))
            .unwrap()
            .unwrap();

        assert_eq!(resource.response.status(), 405);
        assert_eq!(resource.response.header("Allow"), Some("GET, HEAD, OPTIONS"));
        // Outer middleware still decorates the short-circuited response
        assert_eq!(resource.response.header("Content-Type"), Some("text/css"));
    }

    #[test]
    fn test_invalid_pattern_fails_construction() {
        let root = site();
        let mut config = config(&root);
        config.etag.patterns = vec!["(".to_string()];
        assert!(matches!(
            StaticResourceHandler::from_config(&config),
            Err(Error::InvalidConfig(_))
        ));
    }
}
