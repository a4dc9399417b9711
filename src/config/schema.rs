//! Resolved settings schema.
//!
//! These types are the output of the resolver. They derive `Serialize` so
//! the binary can hand them to the application's entrypoint as JSON or TOML.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Database driver written into the credentials.
pub const DB_DRIVER: &str = "pgsql";

/// Default PostgreSQL port.
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Collation used for every connection.
pub const DB_COLLATION: &str = "C";

/// Proxy address trusted when none is configured.
pub const DEFAULT_TRUSTED_PROXY: &str = "127.0.0.1";

/// Symfony `Request::HEADER_X_FORWARDED_FOR`.
pub const HEADER_X_FORWARDED_FOR: u32 = 0b00010;

/// Symfony `Request::HEADER_X_FORWARDED_PROTO`.
pub const HEADER_X_FORWARDED_PROTO: u32 = 0b01000;

/// Settings resolved from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    /// Primary trusted domain.
    pub domain: Option<String>,

    /// Extra trusted domains, in the order they were listed.
    pub additional_hosts: Vec<String>,

    /// Anchored host patterns for `domain` then `additional_hosts`.
    pub trusted_host_patterns: Vec<String>,

    /// Database connection, present only when a database name is set.
    pub database: Option<DatabaseCredentials>,

    /// Reverse proxy trust.
    pub reverse_proxy: ReverseProxySettings,
}

/// Where the database password came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PasswordSource {
    Environment,
    SecretFile { path: PathBuf },
}

/// Database connection settings.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseCredentials {
    pub database: String,
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub driver: String,
    pub prefix: String,
    pub collation: String,
    pub password_source: PasswordSource,
}

impl DatabaseCredentials {
    /// Credentials for `database` with the fixed driver, prefix and collation.
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            username: String::new(),
            password: String::new(),
            host: String::new(),
            port: DEFAULT_DB_PORT,
            driver: DB_DRIVER.to_string(),
            prefix: String::new(),
            collation: DB_COLLATION.to_string(),
            password_source: PasswordSource::Environment,
        }
    }

    /// True once a secret file has replaced the password.
    pub fn password_from_secret(&self) -> bool {
        matches!(self.password_source, PasswordSource::SecretFile { .. })
    }
}

// Keeps passwords out of logs and panic messages.
impl fmt::Debug for DatabaseCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("DatabaseCredentials")
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &password)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("driver", &self.driver)
            .field("prefix", &self.prefix)
            .field("collation", &self.collation)
            .field("password_source", &self.password_source)
            .finish()
    }
}

/// Forwarded headers the application may honor from a trusted proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrustedHeaders {
    pub forwarded_proto: bool,
    pub forwarded_for: bool,
}

impl TrustedHeaders {
    /// The fixed trust used for every deployment: protocol and client address.
    pub const PROTO_AND_FOR: Self = Self {
        forwarded_proto: true,
        forwarded_for: true,
    };

    /// Symfony bitmask encoding of these flags.
    pub const fn mask(self) -> u32 {
        let mut mask = 0;
        if self.forwarded_proto {
            mask |= HEADER_X_FORWARDED_PROTO;
        }
        if self.forwarded_for {
            mask |= HEADER_X_FORWARDED_FOR;
        }
        mask
    }
}

/// Reverse proxy settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReverseProxySettings {
    pub enabled: bool,

    /// Trusted proxy addresses (IP or CIDR).
    pub addresses: Vec<String>,

    /// `trusted_headers` in the encoding the application expects.
    pub trusted_header_mask: u32,

    pub trusted_headers: TrustedHeaders,
}

impl ReverseProxySettings {
    /// Enabled settings trusting a single proxy address.
    pub fn for_address(cidr: impl Into<String>) -> Self {
        let trusted_headers = TrustedHeaders::PROTO_AND_FOR;
        Self {
            enabled: true,
            addresses: vec![cidr.into()],
            trusted_header_mask: trusted_headers.mask(),
            trusted_headers,
        }
    }
}

impl Default for ReverseProxySettings {
    fn default() -> Self {
        Self::for_address(DEFAULT_TRUSTED_PROXY)
    }
}
