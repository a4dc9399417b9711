//! Environment variable sources.
//!
//! The resolver never calls `std::env` directly; it reads through an
//! [`EnvSource`] so tests and embedders can supply a fixed snapshot.

use std::collections::HashMap;

/// Primary trusted domain.
pub const DOMAIN: &str = "DOMAIN";
/// Comma-separated list of extra trusted domains.
pub const ADDITIONAL_TRUSTED_HOSTS: &str = "ADDITIONAL_TRUSTED_HOSTS";
/// Database name. Its presence enables the database credentials.
pub const DB_NAME: &str = "DB_NAME";
pub const DB_USER: &str = "DB_USER";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_HOST: &str = "DB_HOST";
pub const DB_PORT: &str = "DB_PORT";
/// Address or CIDR of the reverse proxy in front of the application.
pub const TRUSTED_PROXY_CIDR: &str = "TRUSTED_PROXY_CIDR";

/// Read-only lookup of named environment values.
pub trait EnvSource {
    /// Raw value of `key`, or `None` when unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Value of `key` with surrounding whitespace removed.
    /// Unset, empty and whitespace-only values all read as `None`.
    fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        // Non-unicode values are treated as unset.
        std::env::var(key).ok()
    }
}

/// A fixed in-memory environment snapshot.
#[derive(Debug, Default, Clone)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}
