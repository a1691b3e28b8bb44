//! Middleware queue
//!
//! Threads a request and file name through a fixed, ordered list of
//! middleware. Each middleware gets a [`Next`] bound to the position right
//! after itself; nothing about the current position is stored on the queue,
//! so one queue serves any number of concurrent or nested calls.

use std::fmt;

use super::middleware::{Middleware, MiddlewareResult};
use super::response::StaticResourceResponse;
use super::Request;

/// Fixed, ordered static resource pipeline
///
/// Built once at startup and shared across requests.
pub struct MiddlewareQueue {
    middleware: Vec<Box<dyn Middleware>>,
}

impl MiddlewareQueue {
    pub fn new(middleware: Vec<Box<dyn Middleware>>) -> Self {
        Self { middleware }
    }

    /// Run the whole queue from the first middleware
    ///
    /// An empty queue, or one whose last middleware delegates, yields the
    /// terminal response: `200`, no headers, body enabled.
    pub fn handle(&self, request: &Request, filename: &str) -> MiddlewareResult {
        Next::new(&self.middleware).run(request, filename)
    }

    pub fn len(&self) -> usize {
        self.middleware.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middleware.is_empty()
    }
}

impl fmt::Debug for MiddlewareQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareQueue")
            .field("len", &self.middleware.len())
            .finish()
    }
}

/// Continuation over the middleware that have not run yet
///
/// `Next` is `Copy`: calling [`run`](Next::run) twice on the same value runs
/// the remaining middleware twice, each time from the same position.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    remaining: &'a [Box<dyn Middleware>],
}

impl<'a> Next<'a> {
    fn new(remaining: &'a [Box<dyn Middleware>]) -> Self {
        Self { remaining }
    }

    /// Run the rest of the queue
    ///
    /// Errors from any middleware are returned as is.
    pub fn run(self, request: &Request, filename: &str) -> MiddlewareResult {
        match self.remaining.split_first() {
            Some((current, rest)) => current.process(request, filename, Next::new(rest)),
            None => Ok(StaticResourceResponse::new()),
        }
    }

    /// Number of middleware this continuation would still run
    pub const fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("remaining", &self.remaining.len())
            .finish()
    }
}
