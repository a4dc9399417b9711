//! Host header allow-listing.
//!
//! # Responsibilities
//! - Compile the resolved trusted host patterns
//! - Decide whether a request's Host header is allowed
//!
//! # Design Decisions
//! - Host matching is case-insensitive (per HTTP spec)
//! - The port is stripped before matching
//! - An empty pattern list allows every host

use regex::{Regex, RegexBuilder};

use crate::config::{ConfigError, ResolvedConfig};

/// Compiled trusted host patterns.
#[derive(Debug, Clone)]
pub struct TrustedHostMatcher {
    patterns: Vec<Regex>,
}

impl TrustedHostMatcher {
    /// Compile a list of anchored host patterns.
    pub fn new<I, P>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ConfigError::InvalidHostPattern {
                        pattern: pattern.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    pub fn from_config(config: &ResolvedConfig) -> Result<Self, ConfigError> {
        Self::new(&config.trusted_host_patterns)
    }

    /// True when no patterns are configured, so every host passes.
    pub fn is_open(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns true if `host` (a Host header value) is trusted.
    pub fn is_allowed(&self, host: &str) -> bool {
        if self.is_open() {
            return true;
        }
        let host = strip_port(host.trim());
        self.patterns.iter().any(|re| re.is_match(host))
    }
}

/// `example.com:8080` → `example.com`, `[::1]:80` → `[::1]`.
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.split_once(':') {
        Some((name, port)) if !port.contains(':') => name,
        _ => host,
    }
}
