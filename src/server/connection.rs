// Connection handling module
// Serves a single TCP connection and runs each request through the static pipeline

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use http_body_util::Full;
use hyper::body::{Body, Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Response};
use hyper_util::rt::TokioIo;
use tokio::sync::watch;
use tokio::task::JoinSet;

use super::respond;
use crate::config::Config;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::static_resource::{Request, StaticResourceHandler};

/// Per-connection settings taken from the configuration
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub keep_alive: bool,
    pub timeout: Duration,
    pub max_connections: Option<usize>,
    pub access_log: bool,
}

impl From<&Config> for ConnectionSettings {
    fn from(config: &Config) -> Self {
        let performance = &config.performance;
        Self {
            keep_alive: performance.keep_alive_timeout > 0,
            timeout: Duration::from_secs(std::cmp::max(
                performance.read_timeout,
                performance.write_timeout,
            )),
            max_connections: performance
                .max_connections
                .map(|max| usize::try_from(max).unwrap_or(usize::MAX)),
            access_log: config.logging.access_log,
        }
    }
}

/// Accept a connection, enforcing the connection limit
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `handler` - Shared static resource handler
/// * `settings` - Connection settings
/// * `conn_counter` - Active connection counter
/// * `shutdown` - Flips to `true` when the server stops
/// * `tasks` - Connection tasks, drained on shutdown
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    handler: &Arc<StaticResourceHandler>,
    settings: &Arc<ConnectionSettings>,
    conn_counter: &Arc<AtomicUsize>,
    shutdown: &watch::Receiver<bool>,
    tasks: &mut JoinSet<()>,
) {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = settings.max_connections {
        if prev_count >= max_conn {
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
            ));
            drop(stream);
            return;
        }
    }

    logger::log_connection_accepted(&peer_addr);

    tasks.spawn(handle_connection(
        stream,
        peer_addr,
        Arc::clone(handler),
        Arc::clone(settings),
        Arc::clone(conn_counter),
        shutdown.clone(),
    ));
}

/// Serve one connection until the client closes it, the timeout expires or
/// the server shuts down
///
/// On shutdown the connection finishes the request in flight and closes;
/// an idle keep-alive connection closes right away.
async fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    handler: Arc<StaticResourceHandler>,
    settings: Arc<ConnectionSettings>,
    conn_counter: Arc<AtomicUsize>,
    mut shutdown: watch::Receiver<bool>,
) {
    let io = TokioIo::new(stream);

    let mut builder = http1::Builder::new();
    builder.keep_alive(settings.keep_alive);

    let access_log = settings.access_log;
    let conn = builder.serve_connection(
        io,
        service_fn(move |req| {
            let handler = Arc::clone(&handler);
            async move { handle_request(req, handler, peer_addr, access_log).await }
        }),
    );

    let mut conn = std::pin::pin!(conn);
    let mut draining = false;
    let served = tokio::time::timeout(settings.timeout, async {
        loop {
            tokio::select! {
                result = conn.as_mut() => break result,
                _ = shutdown.changed(), if !draining => {
                    draining = true;
                    conn.as_mut().graceful_shutdown();
                }
            }
        }
    });

    match served.await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => logger::log_connection_error(&err),
        Err(_) => {
            logger::log_warning(&format!(
                "Connection from {peer_addr} timed out after {} seconds",
                settings.timeout.as_secs()
            ));
        }
    }

    conn_counter.fetch_sub(1, Ordering::SeqCst);
}

/// Run one request through the static pipeline and answer it
///
/// The pipeline stats files synchronously, so it runs on the blocking pool.
/// A middleware fault becomes a 500; a request that is not a static
/// resource becomes a 404.
pub async fn handle_request(
    req: hyper::Request<Incoming>,
    handler: Arc<StaticResourceHandler>,
    peer_addr: SocketAddr,
    access_log: bool,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _body) = req.into_parts();
    let request = Request::from_parts(parts, ());
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let decided = tokio::task::spawn_blocking(move || handler.handle(&request)).await;

    let response = match decided {
        Ok(Ok(Some(resource))) => respond::build_response(resource, method == Method::HEAD).await,
        Ok(Ok(None)) => http::build_404_response(),
        Ok(Err(e)) => {
            logger::log_error(&format!("Static pipeline failed for {path}: {e}"));
            http::build_500_response()
        }
        Err(e) => {
            logger::log_error(&format!("Static pipeline task failed for {path}: {e}"));
            http::build_500_response()
        }
    };

    if access_log {
        logger::log_access(&AccessLogEntry {
            remote_addr: peer_addr,
            method: method.as_str(),
            path: &path,
            status: response.status().as_u16(),
            body_bytes: response.body().size_hint().exact().unwrap_or(0),
            elapsed: started.elapsed(),
        });
    }

    Ok(response)
}
