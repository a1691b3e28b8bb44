use regex::Regex;

use super::{
    compile_patterns, file_stamp, is_conditional_method, request_header, request_path, Middleware,
    MiddlewareResult,
};
use crate::error::Error;
use crate::http::date;
use crate::static_resource::{Next, Request};

/// Adds `Last-Modified` and answers `If-Modified-Since` with 304 when the
/// file has not changed since
#[derive(Debug, Clone)]
pub struct LastModifiedMiddleware {
    patterns: Vec<Regex>,
}

impl LastModifiedMiddleware {
    pub fn new(patterns: &[String]) -> Result<Self, Error> {
        Ok(Self {
            patterns: compile_patterns("last_modified", patterns)?,
        })
    }
}

impl Middleware for LastModifiedMiddleware {
    fn process(&self, request: &Request, filename: &str, next: Next<'_>) -> MiddlewareResult {
        let mut response = next.run(request, filename)?;

        let path = request_path(request);
        if !self.patterns.iter().any(|regex| regex.is_match(path)) {
            return Ok(response);
        }

        let Some((mtime, _)) = file_stamp(filename)? else {
            return Ok(response);
        };
        let mtime = i64::try_from(mtime).unwrap_or(i64::MAX);
        let Some(last_modified) = date::format_http_date(mtime) else {
            return Ok(response);
        };
        response.add_header("Last-Modified", last_modified);

        if !is_conditional_method(request) {
            return Ok(response);
        }

        let since = request_header(request, "if-modified-since").and_then(date::parse_http_date);
        if since.is_some_and(|since| since >= mtime) {
            response.set_status(304);
            response.disable_content();
        }
        Ok(response)
    }
}
