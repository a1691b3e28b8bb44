use regex::Regex;

use super::{request_path, Middleware, MiddlewareResult};
use crate::config::CacheControlRule;
use crate::error::Error;
use crate::http::cache;
use crate::static_resource::{Next, Request};

/// Adds `Cache-Control` to responses whose request path matches a rule
///
/// Rules are tried in order; the first match wins.
#[derive(Debug, Default, Clone)]
pub struct CacheControlMiddleware {
    rules: Vec<(Regex, String)>,
}

impl CacheControlMiddleware {
    /// Compile and validate the configured rules
    pub fn new(rules: &[CacheControlRule]) -> Result<Self, Error> {
        let rules = rules
            .iter()
            .map(|rule| {
                let regex = Regex::new(&rule.pattern).map_err(|e| {
                    Error::InvalidConfig(format!(
                        "cache_control pattern '{}': {e}",
                        rule.pattern
                    ))
                })?;
                if let Some(bad) = rule
                    .directives
                    .iter()
                    .find(|d| !cache::is_valid_directive(d))
                {
                    return Err(Error::InvalidConfig(format!(
                        "cache_control directive '{bad}' for pattern '{}'",
                        rule.pattern
                    )));
                }
                Ok((regex, rule.directives.join(", ")))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { rules })
    }
}

impl Middleware for CacheControlMiddleware {
    fn process(&self, request: &Request, filename: &str, next: Next<'_>) -> MiddlewareResult {
        let mut response = next.run(request, filename)?;
        let path = request_path(request);
        if let Some((_, value)) = self.rules.iter().find(|(regex, _)| regex.is_match(path)) {
            response.add_header("Cache-Control", value.as_str());
        }
        Ok(response)
    }
}
