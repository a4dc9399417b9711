//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::validation::ValidationError;

/// Errors raised while resolving or loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A secret file exists but could not be read. Startup must not
    /// continue with a partially resolved credential.
    #[error("secret file {path} exists but could not be read: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `DB_PORT` is set but is not a port number.
    #[error("invalid database port {value:?}")]
    InvalidPort { value: String },

    /// A trusted host pattern does not compile.
    #[error("invalid trusted host pattern {pattern:?}: {source}")]
    InvalidHostPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A trusted proxy address is neither an IP nor a CIDR block.
    #[error("invalid trusted proxy address {value:?}: {source}")]
    InvalidProxyCidr {
        value: String,
        #[source]
        source: ipnetwork::IpNetworkError,
    },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
