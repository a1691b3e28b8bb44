//! Logger module
//!
//! Provides logging utilities for the static file server including:
//! - Subscriber setup from `logging.level` (`RUST_LOG` wins when set)
//! - Server lifecycle logging
//! - Access logging, one event per request on the `access` target
//! - Error and warning logging

use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::Error;

/// Initialize the global `tracing` subscriber
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .map_err(|e| Error::InvalidConfig(format!("logging.level: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| Error::InvalidConfig(format!("logger already initialized: {e}")))
}

/// Request/response summary written to the access log
#[derive(Debug, Clone)]
pub struct AccessLogEntry<'a> {
    pub remote_addr: SocketAddr,
    pub method: &'a str,
    pub path: &'a str,
    pub status: u16,
    pub body_bytes: u64,
    pub elapsed: Duration,
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!(
        %addr,
        level = %config.logging.level,
        workers = ?config.server.workers,
        document_roots = ?config.static_files.document_roots,
        "static server listening"
    );
}

pub fn log_server_stop(in_flight: usize) {
    tracing::info!(in_flight, "shutdown signal received, draining connections");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!(peer = %peer_addr, "connection accepted");
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    tracing::error!("failed to serve connection: {err}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

pub fn log_access(entry: &AccessLogEntry<'_>) {
    tracing::info!(
        target: "access",
        remote_addr = %entry.remote_addr,
        method = entry.method,
        path = entry.path,
        status = entry.status,
        body_bytes = entry.body_bytes,
        request_time_us = u64::try_from(entry.elapsed.as_micros()).unwrap_or(u64::MAX),
    );
}
