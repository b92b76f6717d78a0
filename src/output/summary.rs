//! Summary of the values derived from one network.

use crate::models::{IpVersion, Network};
use serde::Serialize;

/// Everything the binary reports about a network.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkSummary {
    /// Network in `address/prefix` form.
    pub cidr: String,
    pub version: IpVersion,
    pub prefix_len: u8,
    pub netmask: String,
    pub network: String,
    pub broadcast: String,
    pub first_host: String,
    /// None for a `/31` at the top of the address space.
    pub last_host: Option<String>,
    pub size: u128,
    /// First hosts of the enumeration, at most `host_limit`.
    pub hosts: Vec<String>,
    /// True when more hosts exist than were listed.
    pub hosts_truncated: bool,
}

impl NetworkSummary {
    pub fn new(network: &Network, host_limit: usize) -> NetworkSummary {
        let mut hosts = network.hosts();
        let listed: Vec<String> = hosts.by_ref().take(host_limit).map(|h| h.dq()).collect();
        let hosts_truncated = hosts.valid();

        let last_host = match network.last_host() {
            Ok(host) => Some(host.dq()),
            Err(e) => {
                log::warn!("No last host for {network}: {e}");
                None
            }
        };

        log::debug!(
            "Summary for {network}: {} hosts listed, truncated={hosts_truncated}",
            listed.len()
        );

        NetworkSummary {
            cidr: network.to_string(),
            version: network.version(),
            prefix_len: network.prefix_len(),
            netmask: network.netmask().dq(),
            network: network.network().dq(),
            broadcast: network.broadcast().dq(),
            first_host: network.first_host().dq(),
            last_host,
            size: network.size(),
            hosts: listed,
            hosts_truncated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_24() {
        let net = Network::new("192.168.1.0/24").unwrap();
        let summary = NetworkSummary::new(&net, 3);
        assert_eq!(summary.cidr, "192.168.1.0/24");
        assert_eq!(summary.netmask, "255.255.255.0");
        assert_eq!(summary.network, "192.168.1.0");
        assert_eq!(summary.broadcast, "192.168.1.255");
        assert_eq!(summary.first_host, "192.168.1.1");
        assert_eq!(summary.last_host.as_deref(), Some("192.168.1.254"));
        assert_eq!(summary.size, 256);
        assert_eq!(summary.hosts, vec!["192.168.1.1", "192.168.1.2", "192.168.1.3"]);
        assert!(summary.hosts_truncated);
    }

    #[test]
    fn test_summary_not_truncated() {
        let net = Network::new("10.1.1.0/30").unwrap();
        let summary = NetworkSummary::new(&net, 16);
        assert_eq!(summary.hosts.len(), 4);
        assert!(!summary.hosts_truncated);
    }

    #[test]
    fn test_summary_top_p2p() {
        let net = Network::new("255.255.255.255/31").unwrap();
        let summary = NetworkSummary::new(&net, 0);
        assert_eq!(summary.last_host, None);
        assert!(summary.hosts.is_empty());
        assert!(summary.hosts_truncated);
    }

    #[test]
    fn test_summary_json() {
        let net = Network::new("10.1.1.0/30").unwrap();
        let json = serde_json::to_value(NetworkSummary::new(&net, 2)).unwrap();
        assert_eq!(json["cidr"], "10.1.1.0/30");
        assert_eq!(json["version"], "V4");
        assert_eq!(json["size"], 4);
        assert_eq!(json["hosts"][1], "10.1.1.2");
    }
}
