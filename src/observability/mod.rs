//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! resolver / loader / CLI
//!     → logging.rs (structured log events on stderr)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Secrets never appear in log fields

pub mod logging;

pub use logging::{init_logging, LogFormat};
