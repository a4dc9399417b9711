//! Security checks built on resolved settings.
//!
//! # Data Flow
//! ```text
//! ResolvedConfig
//!     → trusted_hosts.rs (Host header allow-list)
//!     → proxy.rs (peer trust, forwarded header trust)
//! ```
//!
//! # Design Decisions
//! - Fail closed: a peer outside the trusted networks is never trusted
//! - An empty host list disables the Host check
//! - No trust in client input

pub mod proxy;
pub mod trusted_hosts;

pub use proxy::TrustedProxies;
pub use trusted_hosts::TrustedHostMatcher;
