//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment + /run/secrets
//!     → env.rs / secrets.rs (injectable lookups)
//!     → resolver.rs (defaults, host patterns, secret override)
//!     → validation.rs (semantic checks)
//!     → ResolvedConfig (validated, immutable)
//!     → printed for the application entrypoint
//! ```
//!
//! # Design Decisions
//! - Config is resolved once per process and never mutated
//! - Every input has a default, so an empty environment resolves
//! - Validation separates resolution from semantic checks

pub mod env;
pub mod error;
pub mod loader;
pub mod resolver;
pub mod schema;
pub mod secrets;
pub mod validation;

pub use error::ConfigError;
pub use loader::{load_from_env, LoadOptions};
pub use resolver::{resolve_trusted_hosts, ConfigResolver};
pub use schema::{DatabaseCredentials, ResolvedConfig, ReverseProxySettings, TrustedHeaders};
