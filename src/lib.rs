//! # yarhs-static
//!
//! Static file serving for the YARHS server, built around a middleware
//! pipeline. For every request that resolves to a file under one of the
//! document roots, a fixed [`MiddlewareQueue`](static_resource::MiddlewareQueue)
//! decides the answer: serve the content, reply 304, reject the method, add
//! cache headers. The [`server`] module writes that decision to the client.
//!
//! ```
//! use yarhs_static::static_resource::middleware::HeadMiddleware;
//! use yarhs_static::static_resource::{from_fn, MiddlewareQueue, Request, StaticResourceResponse};
//!
//! let queue = MiddlewareQueue::new(vec![
//!     Box::new(HeadMiddleware),
//!     Box::new(from_fn(|request, filename, next| {
//!         if filename.ends_with(".bak") {
//!             return Ok(StaticResourceResponse::with_status(403));
//!         }
//!         next.run(request, filename)
//!     })),
//! ]);
//!
//! let request = Request::new(());
//! assert_eq!(queue.handle(&request, "site.css").unwrap().status(), 200);
//! assert_eq!(queue.handle(&request, "site.css.bak").unwrap().status(), 403);
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod server;
pub mod static_resource;

pub use error::{Error, MiddlewareError};
