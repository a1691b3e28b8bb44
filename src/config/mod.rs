// Configuration module entry point
// Loads, defaults and validates application configuration

mod types;

use std::net::SocketAddr;

use regex::Regex;

use crate::error::Error;
use crate::http::cache;

pub use types::{
    CacheControlRule, Config, ETagConfig, LastModifiedConfig, LoggingConfig, PerformanceConfig,
    ServerConfig, StaticFilesConfig,
};

pub const DEFAULT_CONFIG_PATH: &str = "config";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u32 = 8080;

impl Config {
    /// Load configuration from a file path, extension optional
    ///
    /// The file is optional. Environment variables prefixed with `YARHS`
    /// override it, using `__` between sections:
    /// `YARHS__SERVER__PORT=9000`.
    pub fn load_from(config_path: &str) -> Result<Self, Error> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("YARHS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", DEFAULT_PORT)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("static_files.document_roots", vec!["./public"])?
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), Error> {
        if !(1..=65535).contains(&self.server.port) {
            return Err(Error::InvalidConfig(format!(
                "Invalid port: {}",
                self.server.port
            )));
        }
        self.socket_addr()?;

        if self.server.workers == Some(0) {
            return Err(Error::InvalidConfig(
                "Invalid workers: must be at least 1".to_string(),
            ));
        }

        if self.static_files.document_roots.is_empty() {
            return Err(Error::InvalidConfig(
                "static_files.document_roots must not be empty".to_string(),
            ));
        }

        for rule in &self.static_files.cache_control {
            if let Some(bad) = rule
                .directives
                .iter()
                .find(|d| !cache::is_valid_directive(d))
            {
                return Err(Error::InvalidConfig(format!(
                    "Invalid cache_control directive '{bad}' for pattern '{}'",
                    rule.pattern
                )));
            }
        }

        let static_files = &self.static_files;
        let patterns = static_files
            .cache_control
            .iter()
            .map(|rule| ("cache_control", &rule.pattern))
            .chain(static_files.etag.patterns.iter().map(|p| ("etag", p)))
            .chain(static_files.last_modified.patterns.iter().map(|p| ("last_modified", p)));
        for (section, pattern) in patterns {
            Regex::new(pattern).map_err(|e| {
                Error::InvalidConfig(format!("Invalid {section} pattern '{pattern}': {e}"))
            })?;
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| Error::InvalidConfig(format!("Invalid address: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn load(toml: &str) -> Result<Config, Error> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(toml.as_bytes()).unwrap();
        file.flush().unwrap();
        Config::load_from(file.path().to_str().unwrap())
    }

    #[test]
    fn test_defaults() {
        let config = load("").unwrap();
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.access_log);
        assert_eq!(config.static_files.document_roots, vec!["./public"]);
        assert!(config.static_files.cache_control.is_empty());
        assert_eq!(config.static_files.etag.validation, cache::ETagStrength::Weak);
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_static_files_section() {
        let config = load(
            r#"
[server]
port = 9000

[static_files]
document_roots = ["/srv/www", "/srv/shared"]
type_map = { php = "text/plain" }

[[static_files.cache_control]]
pattern = '\.css$'
directives = ["public", "max-age=600"]

[static_files.etag]
patterns = ['\.js$']
validation = "strong"

[static_files.last_modified]
patterns = ['.*']
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.static_files.document_roots.len(), 2);
        assert_eq!(
            config.static_files.type_map.get("php").map(String::as_str),
            Some("text/plain")
        );
        assert_eq!(
            config.static_files.cache_control,
            vec![CacheControlRule {
                pattern: r"\.css$".to_string(),
                directives: vec!["public".to_string(), "max-age=600".to_string()],
            }]
        );
        assert_eq!(config.static_files.etag.validation, cache::ETagStrength::Strong);
        assert_eq!(config.static_files.last_modified.patterns, vec![".*"]);
    }

    #[test]
    fn test_invalid_port() {
        for port in ["0", "70000"] {
            let err = load(&format!("[server]\nport = {port}\n")).unwrap_err();
            assert!(err.to_string().contains("Invalid port"), "{err}");
        }
    }

    #[test]
    fn test_invalid_host() {
        let err = load("[server]\nhost = \"not a host\"\n").unwrap_err();
        assert!(err.to_string().contains("Invalid address"), "{err}");
    }

    #[test]
    fn test_invalid_directive() {
        let err = load(
            r#"
[[static_files.cache_control]]
pattern = '.*'
directives = ["cache-forever"]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_document_roots() {
        let mut config = load("").unwrap();
        config.static_files.document_roots.clear();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_workers() {
        let err = load("[server]\nworkers = 0\n").unwrap_err();
        assert!(err.to_string().contains("Invalid workers"), "{err}");

        let config = load("[server]\nworkers = 2\n").unwrap();
        assert_eq!(config.server.workers, Some(2));
    }

    #[test]
    fn test_invalid_pattern() {
        for section in [
            "[[static_files.cache_control]]\npattern = '(unclosed'\ndirectives = [\"public\"]\n",
            "[static_files.etag]\npatterns = ['[a-']\n",
            "[static_files.last_modified]\npatterns = ['*.css']\n",
        ] {
            let err = load(section).unwrap_err();
            assert!(err.to_string().contains("pattern"), "{err}");
        }
    }
}
