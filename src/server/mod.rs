// Server module entry point
// Accept loop, connection handling and graceful shutdown

pub mod connection;
pub mod listener;
pub mod respond;
pub mod signal;

use std::future::Future;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::error::Error;
use crate::logger;
use crate::static_resource::StaticResourceHandler;

pub use connection::ConnectionSettings;
pub use listener::create_listener;
pub use signal::shutdown_signal;

/// Build the pipeline, bind the configured address and serve until
/// SIGTERM / Ctrl+C
pub async fn run(config: Config) -> Result<(), Error> {
    let addr = config.socket_addr()?;
    let handler = Arc::new(StaticResourceHandler::from_config(&config.static_files)?);
    let settings = Arc::new(ConnectionSettings::from(&config));
    let listener = create_listener(addr)?;

    logger::log_server_start(&addr, &config);
    serve(listener, handler, settings, shutdown_signal()).await
}

/// Accept connections until `shutdown` resolves, then tell open connections
/// to close and wait for in-flight requests to finish
pub async fn serve(
    listener: TcpListener,
    handler: Arc<StaticResourceHandler>,
    settings: Arc<ConnectionSettings>,
    shutdown: impl Future<Output = ()>,
) -> Result<(), Error> {
    let active_connections = Arc::new(AtomicUsize::new(0));
    let (stop_tx, stop_rx) = watch::channel(false);
    let mut tasks = JoinSet::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                logger::log_server_stop(tasks.len());
                break;
            }

            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(
                            stream,
                            peer_addr,
                            &handler,
                            &settings,
                            &active_connections,
                            &stop_rx,
                            &mut tasks,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            // Reap finished connections so the set does not grow unbounded
            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    drop(listener);
    stop_tx.send_replace(true);
    while tasks.join_next().await.is_some() {}
    tracing::info!("server stopped");
    Ok(())
}
