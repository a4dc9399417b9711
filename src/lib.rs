//! Environment-driven site settings for a CMS behind a reverse proxy.
//!
//! Resolves trusted host patterns, database credentials (with a Docker
//! secret password override) and reverse proxy trust from the process
//! environment, once, at container start.

pub mod config;
pub mod observability;
pub mod security;

pub use config::{load_from_env, ConfigError, ConfigResolver, LoadOptions, ResolvedConfig};
pub use security::{TrustedHostMatcher, TrustedProxies};
