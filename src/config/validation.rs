//! Settings validation.
//!
//! # Responsibilities
//! - Check every trusted host pattern compiles as a regex
//! - Check every trusted proxy address is an IP or CIDR block
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ResolvedConfig → Result<(), Vec<ValidationError>>
//! - Runs after resolution, before the settings are handed out

use ipnetwork::IpNetwork;
use regex::Regex;
use thiserror::Error;

use crate::config::schema::ResolvedConfig;

/// A single semantic problem in resolved settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("trusted host pattern {pattern:?} does not compile: {reason}")]
    HostPattern { pattern: String, reason: String },

    #[error("trusted proxy address {address:?} is not an IP or CIDR: {reason}")]
    ProxyAddress { address: String, reason: String },
}

/// Validate resolved settings, collecting every problem found.
pub fn validate_config(config: &ResolvedConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for pattern in &config.trusted_host_patterns {
        if let Err(e) = Regex::new(pattern) {
            errors.push(ValidationError::HostPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            });
        }
    }

    for address in &config.reverse_proxy.addresses {
        if let Err(e) = address.parse::<IpNetwork>() {
            errors.push(ValidationError::ProxyAddress {
                address: address.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{DatabaseCredentials, ReverseProxySettings};

    fn base_config() -> ResolvedConfig {
        ResolvedConfig {
            domain: Some("example.com".into()),
            additional_hosts: Vec::new(),
            trusted_host_patterns: vec![r"^example\.com$".into()],
            database: None,
            reverse_proxy: ReverseProxySettings::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&base_config()).is_ok());
    }

    #[test]
    fn test_cidr_block_accepted() {
        let mut config = base_config();
        config.reverse_proxy = ReverseProxySettings::for_address("10.0.0.0/8");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = base_config();
        config.trusted_host_patterns.push("^bad(host$".into());
        config.reverse_proxy = ReverseProxySettings::for_address("proxy.local");

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ValidationError::HostPattern { .. }));
        assert!(matches!(errors[1], ValidationError::ProxyAddress { .. }));
    }

    #[test]
    fn test_database_name_only_is_valid() {
        let mut config = base_config();
        config.database = Some(DatabaseCredentials::new("foo"));
        assert!(validate_config(&config).is_ok());
    }
}
