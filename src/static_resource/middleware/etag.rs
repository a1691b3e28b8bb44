use regex::Regex;

use super::{
    compile_patterns, file_stamp, is_conditional_method, request_header, request_path, Middleware,
    MiddlewareResult,
};
use crate::error::Error;
use crate::http::cache::{self, ETagStrength};
use crate::static_resource::{Next, Request};

/// Adds an `ETag` derived from file metadata and answers matching
/// conditional requests with 304
#[derive(Debug, Clone)]
pub struct ETagMiddleware {
    patterns: Vec<Regex>,
    strength: ETagStrength,
}

impl ETagMiddleware {
    pub fn new(patterns: &[String], strength: ETagStrength) -> Result<Self, Error> {
        Ok(Self {
            patterns: compile_patterns("etag", patterns)?,
            strength,
        })
    }
}

impl Middleware for ETagMiddleware {
    fn process(&self, request: &Request, filename: &str, next: Next<'_>) -> MiddlewareResult {
        let mut response = next.run(request, filename)?;

        let path = request_path(request);
        if !self.patterns.iter().any(|regex| regex.is_match(path)) {
            return Ok(response);
        }

        let Some(etag) = file_stamp(filename)?
            .and_then(|(mtime, size)| cache::generate_etag(self.strength, mtime, size))
        else {
            return Ok(response);
        };

        if !is_conditional_method(request) {
            response.add_header("ETag", etag);
            return Ok(response);
        }

        let if_match = request_header(request, "if-match");
        let if_none_match = request_header(request, "if-none-match");
        let not_modified =
            if_match.is_some_and(|v| v.trim() == etag) || cache::check_etag_match(if_none_match, &etag);

        response.add_header("ETag", etag);
        if not_modified {
            response.set_status(304);
            response.disable_content();
        }
        Ok(response)
    }
}
