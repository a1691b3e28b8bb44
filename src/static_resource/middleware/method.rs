//! Request method handling
//!
//! Static files answer GET, HEAD and OPTIONS only.

use hyper::Method;

use super::{Middleware, MiddlewareResult};
use crate::static_resource::{Next, Request, StaticResourceResponse};

const ALLOW: &str = "GET, HEAD, OPTIONS";

/// Short-circuits with 405 for any method other than GET, HEAD, OPTIONS
#[derive(Debug, Default, Clone, Copy)]
pub struct MethodNotAllowedMiddleware;

impl Middleware for MethodNotAllowedMiddleware {
    fn process(&self, request: &Request, filename: &str, next: Next<'_>) -> MiddlewareResult {
        match *request.method() {
            Method::GET | Method::HEAD | Method::OPTIONS => next.run(request, filename),
            _ => {
                let mut response = StaticResourceResponse::with_status(405);
                response.add_header("Allow", ALLOW);
                Ok(response)
            }
        }
    }
}

/// Answers OPTIONS with the allowed methods and no body
#[derive(Debug, Default, Clone, Copy)]
pub struct OptionsMiddleware;

impl Middleware for OptionsMiddleware {
    fn process(&self, request: &Request, filename: &str, next: Next<'_>) -> MiddlewareResult {
        let mut response = next.run(request, filename)?;
        if request.method() == Method::OPTIONS {
            response.add_header("Allow", ALLOW);
            response.disable_content();
        }
        Ok(response)
    }
}

/// Drops the body for HEAD requests, keeping every header
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadMiddleware;

impl Middleware for HeadMiddleware {
    fn process(&self, request: &Request, filename: &str, next: Next<'_>) -> MiddlewareResult {
        let mut response = next.run(request, filename)?;
        if request.method() == Method::HEAD {
            response.disable_content();
        }
        Ok(response)
    }
}
