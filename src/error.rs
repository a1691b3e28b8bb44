//! Error types
//!
//! `Error` covers startup failures: loading configuration, rejecting invalid
//! settings, binding the listener. `MiddlewareError` is what a middleware
//! returns when it cannot decide a response; the queue hands it to the caller
//! untouched and the server turns it into a 500.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Startup and configuration error
#[derive(Debug)]
pub enum Error {
    /// The configuration sources could not be read or deserialized
    Config(config::ConfigError),
    /// The configuration was read but holds an unusable value
    InvalidConfig(String),
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::InvalidConfig(_) => None,
            Self::Io(e) => Some(e),
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Fault raised by a middleware while deciding a response
#[derive(Debug)]
pub enum MiddlewareError {
    Io { path: PathBuf, source: io::Error },
    Message(String),
}

impl MiddlewareError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn message(msg: impl Into<String>) -> Self {
        Self::Message(msg.into())
    }
}

impl fmt::Display for MiddlewareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Message(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for MiddlewareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Message(_) => None,
        }
    }
}
