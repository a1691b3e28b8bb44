// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::collections::HashMap;

use crate::http::cache::ETagStrength;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub static_files: StaticFilesConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    /// Kept wider than `u16` so out-of-range values get a clear error
    pub port: u32,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default `tracing` filter, e.g. `info` or `yarhs_static=debug`
    pub level: String,
    pub access_log: bool,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Static resource pipeline configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StaticFilesConfig {
    /// Directories searched in order for the requested path
    pub document_roots: Vec<String>,
    /// Extra extension → Content-Type entries, overriding the built-in table
    #[serde(default)]
    pub type_map: HashMap<String, String>,
    #[serde(default)]
    pub cache_control: Vec<CacheControlRule>,
    #[serde(default)]
    pub etag: ETagConfig,
    #[serde(default)]
    pub last_modified: LastModifiedConfig,
}

/// `Cache-Control` value applied to request paths matching `pattern`
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CacheControlRule {
    pub pattern: String,
    pub directives: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ETagConfig {
    /// Request path patterns that get an `ETag`
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub validation: ETagStrength,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LastModifiedConfig {
    /// Request path patterns that get a `Last-Modified` header
    #[serde(default)]
    pub patterns: Vec<String>,
}
