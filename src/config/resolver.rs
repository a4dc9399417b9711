//! Environment-to-settings resolution.
//!
//! # Responsibilities
//! - Derive anchored trusted host patterns from `DOMAIN` and
//!   `ADDITIONAL_TRUSTED_HOSTS`
//! - Assemble database credentials when `DB_NAME` is set
//! - Let a Docker secret file override the database password
//! - Fill in reverse proxy trust with its defaults
//!
//! # Design Decisions
//! - Every input is optional; missing values fall back to fixed defaults
//! - The resolver reads through [`EnvSource`] and [`SecretStore`] only
//! - The result is built once and never mutated afterwards

use std::path::{Path, PathBuf};

use crate::config::env::{self, EnvSource};
use crate::config::error::ConfigError;
use crate::config::schema::{
    DatabaseCredentials, PasswordSource, ReverseProxySettings, ResolvedConfig,
    DEFAULT_DB_PORT, DEFAULT_TRUSTED_PROXY,
};
use crate::config::secrets::{password_secret_path, SecretStore, DEFAULT_SECRETS_DIR};

/// Anchored host patterns for `domain` followed by each comma-separated
/// entry of `additional_raw`.
///
/// Only dots are escaped, so `example.com` becomes `^example\.com$`.
/// Blank entries are skipped and the listed order is kept.
pub fn resolve_trusted_hosts(domain: Option<&str>, additional_raw: Option<&str>) -> Vec<String> {
    let domain = domain.map(str::trim).filter(|d| !d.is_empty());

    domain
        .into_iter()
        .chain(split_hosts(additional_raw.unwrap_or_default()))
        .map(host_pattern)
        .collect()
}

/// Comma-split, trimmed, non-empty host entries.
pub fn split_hosts(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|host| !host.is_empty())
}

fn host_pattern(host: &str) -> String {
    format!("^{}$", host.replace('.', "\\."))
}

/// Resolves a [`ResolvedConfig`] from an environment and a secret store.
#[derive(Debug, Clone)]
pub struct ConfigResolver<E, S> {
    env: E,
    secrets: S,
    secrets_dir: PathBuf,
    secret_name: Option<String>,
}

impl<E: EnvSource, S: SecretStore> ConfigResolver<E, S> {
    pub fn new(env: E, secrets: S) -> Self {
        Self {
            env,
            secrets,
            secrets_dir: PathBuf::from(DEFAULT_SECRETS_DIR),
            secret_name: None,
        }
    }

    /// Look for secret files in `dir` instead of `/run/secrets`.
    pub fn with_secrets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.secrets_dir = dir.into();
        self
    }

    /// Name of the password secret. Defaults to the database name.
    pub fn with_secret_name(mut self, name: impl Into<String>) -> Self {
        self.secret_name = Some(name.into());
        self
    }

    /// Resolve the full settings record.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let domain = self.env.get_non_empty(env::DOMAIN);
        let additional_raw = self.env.get(env::ADDITIONAL_TRUSTED_HOSTS);
        let additional_hosts: Vec<String> =
            split_hosts(additional_raw.as_deref().unwrap_or_default())
                .map(str::to_string)
                .collect();
        let trusted_host_patterns =
            resolve_trusted_hosts(domain.as_deref(), additional_raw.as_deref());

        tracing::debug!(
            domain = ?domain,
            patterns = trusted_host_patterns.len(),
            "Trusted hosts resolved"
        );

        let database = match self.resolve_database_credentials()? {
            Some(credentials) => {
                let path = self.secret_path(&credentials);
                Some(self.apply_secret_override(credentials, &path)?)
            }
            None => None,
        };

        Ok(ResolvedConfig {
            domain,
            additional_hosts,
            trusted_host_patterns,
            database,
            reverse_proxy: self.resolve_reverse_proxy(),
        })
    }

    /// Credentials from `DB_*`, or `None` when `DB_NAME` is unset.
    pub fn resolve_database_credentials(
        &self,
    ) -> Result<Option<DatabaseCredentials>, ConfigError> {
        let Some(name) = self.env.get_non_empty(env::DB_NAME) else {
            tracing::debug!("DB_NAME not set, skipping database credentials");
            return Ok(None);
        };

        let port = match self.env.get_non_empty(env::DB_PORT) {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            None => DEFAULT_DB_PORT,
        };

        let mut credentials = DatabaseCredentials::new(name);
        credentials.username = self.env.get_non_empty(env::DB_USER).unwrap_or_default();
        // Passwords keep their whitespace.
        credentials.password = self.env.get(env::DB_PASSWORD).unwrap_or_default();
        credentials.host = self.env.get_non_empty(env::DB_HOST).unwrap_or_default();
        credentials.port = port;

        tracing::debug!(
            database = %credentials.database,
            host = %credentials.host,
            port = credentials.port,
            "Database credentials resolved"
        );
        Ok(Some(credentials))
    }

    /// Replace the password with the trimmed contents of `secret_path`
    /// when that file exists.
    pub fn apply_secret_override(
        &self,
        mut credentials: DatabaseCredentials,
        secret_path: &Path,
    ) -> Result<DatabaseCredentials, ConfigError> {
        if !self.secrets.exists(secret_path) {
            return Ok(credentials);
        }

        let contents = self
            .secrets
            .read_to_string(secret_path)
            .map_err(|source| ConfigError::SecretRead {
                path: secret_path.to_path_buf(),
                source,
            })?;
        let password = contents.trim();
        if password.is_empty() {
            tracing::warn!(path = ?secret_path, "Secret file is empty, using an empty password");
        }

        credentials.password = password.to_string();
        credentials.password_source = PasswordSource::SecretFile {
            path: secret_path.to_path_buf(),
        };
        tracing::info!(path = ?secret_path, "Database password taken from secret file");
        Ok(credentials)
    }

    /// `<secrets_dir>/<name>_password`, where `name` is the configured
    /// secret name or else the database name.
    pub fn secret_path(&self, credentials: &DatabaseCredentials) -> PathBuf {
        let name = self
            .secret_name
            .as_deref()
            .unwrap_or(credentials.database.as_str());
        password_secret_path(&self.secrets_dir, name)
    }

    /// Reverse proxy trust for `TRUSTED_PROXY_CIDR`, defaulting to localhost.
    pub fn resolve_reverse_proxy(&self) -> ReverseProxySettings {
        let cidr = self
            .env
            .get_non_empty(env::TRUSTED_PROXY_CIDR)
            .unwrap_or_else(|| DEFAULT_TRUSTED_PROXY.to_string());
        ReverseProxySettings::for_address(cidr)
    }
}
