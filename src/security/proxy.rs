//! Reverse proxy trust.
//!
//! # Responsibilities
//! - Parse the trusted proxy addresses (plain IPs or CIDR blocks)
//! - Decide whether a peer address is a trusted proxy
//! - Report which X-Forwarded-* headers may be honored from it
//!
//! # Design Decisions
//! - Never trust existing X-Forwarded-* from untrusted sources
//! - A disabled reverse proxy trusts nobody

use std::net::IpAddr;

use ipnetwork::IpNetwork;

use crate::config::{ConfigError, ReverseProxySettings, TrustedHeaders};

/// Parsed reverse proxy trust.
#[derive(Debug, Clone)]
pub struct TrustedProxies {
    enabled: bool,
    networks: Vec<IpNetwork>,
    headers: TrustedHeaders,
}

impl TrustedProxies {
    pub fn from_settings(settings: &ReverseProxySettings) -> Result<Self, ConfigError> {
        let networks = settings
            .addresses
            .iter()
            .map(|value| {
                value
                    .parse::<IpNetwork>()
                    .map_err(|source| ConfigError::InvalidProxyCidr {
                        value: value.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            enabled: settings.enabled,
            networks,
            headers: settings.trusted_headers,
        })
    }

    /// Returns true if `peer` falls inside a trusted proxy network.
    pub fn is_trusted(&self, peer: IpAddr) -> bool {
        self.enabled && self.networks.iter().any(|net| net.contains(peer))
    }

    pub fn trusts_forwarded_for(&self) -> bool {
        self.enabled && self.headers.forwarded_for
    }

    pub fn trusts_forwarded_proto(&self) -> bool {
        self.enabled && self.headers.forwarded_proto
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proxies(cidr: &str) -> TrustedProxies {
        TrustedProxies::from_settings(&ReverseProxySettings::for_address(cidr)).unwrap()
    }

    #[test]
    fn test_default_trusts_localhost_only() {
        let p = TrustedProxies::from_settings(&ReverseProxySettings::default()).unwrap();
        assert!(p.is_trusted("127.0.0.1".parse().unwrap()));
        assert!(!p.is_trusted("127.0.0.2".parse().unwrap()));
        assert!(p.trusts_forwarded_for());
        assert!(p.trusts_forwarded_proto());
    }

    #[test]
    fn test_cidr_block() {
        let p = proxies("10.0.0.0/8");
        assert!(p.is_trusted("10.1.2.3".parse().unwrap()));
        assert!(!p.is_trusted("192.168.0.1".parse().unwrap()));
    }

    #[test]
    fn test_ipv6_network() {
        let p = proxies("fd00::/8");
        assert!(p.is_trusted("fd12::1".parse().unwrap()));
        assert!(!p.is_trusted("10.0.0.1".parse().unwrap()));
    }

    #[test]
    fn test_disabled_trusts_nobody() {
        let mut settings = ReverseProxySettings::default();
        settings.enabled = false;
        let p = TrustedProxies::from_settings(&settings).unwrap();
        assert!(!p.is_trusted("127.0.0.1".parse().unwrap()));
        assert!(!p.trusts_forwarded_for());
    }

    #[test]
    fn test_invalid_cidr() {
        let err = TrustedProxies::from_settings(&ReverseProxySettings::for_address("10.0.0.0/99"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidProxyCidr { .. }));
    }
}
