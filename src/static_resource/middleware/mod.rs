//! Static resource middleware
//!
//! A middleware receives the request, the resolved file name and a [`Next`]
//! continuation for the rest of the queue. It can answer on its own
//! (short-circuit), call `next` and decorate what comes back, or return the
//! result of `next` untouched.
//!
//! ```
//! use yarhs_static::static_resource::{from_fn, MiddlewareQueue, Request};
//!
//! let queue = MiddlewareQueue::new(vec![Box::new(from_fn(|request, filename, next| {
//!     let mut response = next.run(request, filename)?;
//!     response.add_header("X-Served-By", "yarhs");
//!     Ok(response)
//! }))]);
//!
//! let request = Request::new(());
//! let response = queue.handle(&request, "public/index.html").unwrap();
//! assert_eq!(response.header("X-Served-By"), Some("yarhs"));
//! ```

mod cache_control;
mod content_type;
mod etag;
mod last_modified;
mod method;

pub use cache_control::CacheControlMiddleware;
pub use content_type::ContentTypeFilterMiddleware;
pub use etag::ETagMiddleware;
pub use last_modified::LastModifiedMiddleware;
pub use method::{HeadMiddleware, MethodNotAllowedMiddleware, OptionsMiddleware};

use std::io;

use hyper::Method;
use regex::Regex;

use super::queue::Next;
use super::response::StaticResourceResponse;
use super::Request;
use crate::error::{Error, MiddlewareError};
use crate::http::date;

/// Result of running a middleware or the rest of the queue
pub type MiddlewareResult = Result<StaticResourceResponse, MiddlewareError>;

/// A single step of the static resource pipeline
///
/// Implementations are shared by every request the server handles, so they
/// must be `Send + Sync` and keep no per-request state on `self`.
pub trait Middleware: Send + Sync {
    fn process(&self, request: &Request, filename: &str, next: Next<'_>) -> MiddlewareResult;
}

impl<M: Middleware + ?Sized> Middleware for Box<M> {
    fn process(&self, request: &Request, filename: &str, next: Next<'_>) -> MiddlewareResult {
        (**self).process(request, filename, next)
    }
}

/// Middleware backed by a closure, see [`from_fn`]
pub struct FnMiddleware<F>(F);

/// Turn a closure into a [`Middleware`]
pub const fn from_fn<F>(f: F) -> FnMiddleware<F>
where
    F: Fn(&Request, &str, Next<'_>) -> MiddlewareResult + Send + Sync,
{
    FnMiddleware(f)
}

impl<F> Middleware for FnMiddleware<F>
where
    F: Fn(&Request, &str, Next<'_>) -> MiddlewareResult + Send + Sync,
{
    fn process(&self, request: &Request, filename: &str, next: Next<'_>) -> MiddlewareResult {
        (self.0)(request, filename, next)
    }
}

/// Request path used to match cache rules
fn request_path(request: &Request) -> &str {
    request.uri().path()
}

/// Header value as a string, ignoring non-visible-ASCII values
fn request_header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers().get(name).and_then(|v| v.to_str().ok())
}

/// Compile the path patterns of a cache middleware
fn compile_patterns(section: &str, patterns: &[String]) -> Result<Vec<Regex>, Error> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern)
                .map_err(|e| Error::InvalidConfig(format!("{section} pattern '{pattern}': {e}")))
        })
        .collect()
}

/// Whether a 304 may answer this request
///
/// Only GET and HEAD are conditional; other methods keep the status the
/// inner middleware chose.
fn is_conditional_method(request: &Request) -> bool {
    request.method() == Method::GET || request.method() == Method::HEAD
}

/// Modification time (unix seconds) and size of a file
///
/// `Ok(None)` when the file has gone missing since it was located; cache
/// validators are then skipped. Any other stat failure is a fault.
fn file_stamp(filename: &str) -> Result<Option<(u64, u64)>, MiddlewareError> {
    match std::fs::metadata(filename) {
        Ok(meta) => {
            let mtime = meta.modified().map_or(0, date::unix_secs);
            Ok(Some((mtime, meta.len())))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(filename, "file vanished before validators ran");
            Ok(None)
        }
        Err(e) => Err(MiddlewareError::io(filename, e)),
    }
}
