//! Device inventory models
//!
//! One `DeviceConfig` describes one monitored device: which driver speaks
//! to it, how to reach it, and the driver's recognized parameters. The CLI
//! loads a list of these from its configuration file; everything here is
//! plain serde with defaults.

use crate::drivers::DriverKind;
use serde::Deserialize;
use std::time::Duration;

/// One monitored device
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    /// Name the device is addressed by on the command line
    pub name: String,

    /// Driver that speaks to this device
    pub driver: DriverKind,

    pub host: String,

    /// Overrides the driver's default port
    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Appliances commonly ship self-signed certificates, so verification
    /// is off unless asked for
    #[serde(default)]
    pub verify_tls: bool,

    #[serde(default)]
    pub params: DriverParams,
}

impl DeviceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn port_or(&self, default: u16) -> u16 {
        self.port.unwrap_or(default)
    }
}

/// Driver parameters with recognized options, supplied externally before
/// invocation
#[derive(Debug, Clone, Deserialize)]
pub struct DriverParams {
    /// Interface-name inclusion filter; `["ALL"]` keeps every interface
    #[serde(default = "default_filter")]
    pub interface_filter: Vec<String>,

    /// Services whose license state to report; `["ALL"]` keeps all of them
    #[serde(default = "default_filter")]
    pub services: Vec<String>,

    /// Addresses to ping
    #[serde(default)]
    pub addresses: Vec<String>,

    /// Packets per ping run
    #[serde(default = "default_packet_count")]
    pub packet_count: u32,

    /// Line sent right after connecting (an AUTH command)
    #[serde(default)]
    pub auth_command: Option<String>,
}

impl Default for DriverParams {
    fn default() -> Self {
        Self {
            interface_filter: default_filter(),
            services: default_filter(),
            addresses: Vec::new(),
            packet_count: default_packet_count(),
            auth_command: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_filter() -> Vec<String> {
    vec!["ALL".to_string()]
}

fn default_packet_count() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_device_deserializes_with_defaults() {
        let device: DeviceConfig = serde_json::from_str(
            r#"{"name": "fw", "driver": "opnsense-interfaces", "host": "192.0.2.1"}"#,
        )
        .unwrap();

        assert_eq!(device.timeout_secs, 30);
        assert!(!device.verify_tls);
        assert_eq!(device.port_or(443), 443);
        assert_eq!(device.params.interface_filter, vec!["ALL"]);
        assert_eq!(device.params.packet_count, 2);
    }

    #[test]
    fn test_port_override() {
        let device: DeviceConfig = serde_json::from_str(
            r#"{"name": "r", "driver": "redis-info", "host": "10.0.0.5", "port": 6380}"#,
        )
        .unwrap();

        assert_eq!(device.port_or(6379), 6380);
    }
}
