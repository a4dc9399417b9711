//! Settings loading from the process environment.

use std::path::PathBuf;

use crate::config::env::{EnvSource, ProcessEnv};
use crate::config::error::ConfigError;
use crate::config::resolver::ConfigResolver;
use crate::config::schema::ResolvedConfig;
use crate::config::secrets::{FsSecrets, SecretStore};
use crate::config::validation::validate_config;

/// Overrides for where the password secret is looked up.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Defaults to `/run/secrets`.
    pub secrets_dir: Option<PathBuf>,
    /// Defaults to the database name.
    pub secret_name: Option<String>,
}

/// Resolve and validate settings from the real environment and filesystem.
pub fn load_from_env(options: &LoadOptions) -> Result<ResolvedConfig, ConfigError> {
    load_with(ProcessEnv, FsSecrets, options)
}

/// Resolve and validate settings from the given sources.
pub fn load_with<E, S>(
    env: E,
    secrets: S,
    options: &LoadOptions,
) -> Result<ResolvedConfig, ConfigError>
where
    E: EnvSource,
    S: SecretStore,
{
    let mut resolver = ConfigResolver::new(env, secrets);
    if let Some(dir) = &options.secrets_dir {
        resolver = resolver.with_secrets_dir(dir);
    }
    if let Some(name) = &options.secret_name {
        resolver = resolver.with_secret_name(name);
    }

    let config = resolver.resolve()?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    // The application may still supply these through its own defaults.
    if let Some(db) = &config.database {
        if db.host.is_empty() {
            tracing::warn!(database = %db.database, "DB_HOST not set, database host is empty");
        }
        if db.username.is_empty() {
            tracing::warn!(database = %db.database, "DB_USER not set, database user is empty");
        }
    }

    let password_from_secret = config
        .database
        .as_ref()
        .is_some_and(|db| db.password_from_secret());
    tracing::info!(
        domain = ?config.domain,
        trusted_hosts = config.trusted_host_patterns.len(),
        database = config.database.as_ref().map(|db| db.database.as_str()),
        password_from_secret,
        proxy = ?config.reverse_proxy.addresses,
        "Settings resolved"
    );

    Ok(config)
}
