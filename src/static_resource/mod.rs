//! Static resource pipeline
//!
//! Decides how the server answers a request for a file on disk: serve it,
//! answer 304, reject the method, add cache headers. The decision is made by
//! a [`MiddlewareQueue`] built once at startup; the server then writes the
//! returned [`StaticResourceResponse`] to the client.

mod handler;
mod locator;
pub mod middleware;
mod queue;
mod response;

pub use handler::{default_queue, StaticResource, StaticResourceHandler};
pub use locator::FileLocator;
pub use middleware::{from_fn, FnMiddleware, Middleware, MiddlewareResult};
pub use queue::{MiddlewareQueue, Next};
pub use response::StaticResourceResponse;

/// Request as seen by the pipeline
///
/// Only the request line and headers matter here; the body never does.
pub type Request = hyper::Request<()>;
