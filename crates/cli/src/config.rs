//! Device inventory loading for the CLI

use anyhow::{Context, Result};
use driver_lib::DeviceConfig;
use serde::Deserialize;

/// The device inventory: every device this host can probe
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Inventory {
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
}

impl Inventory {
    /// Look up a device by its inventory name
    pub fn device(&self, name: &str) -> Result<&DeviceConfig> {
        self.devices
            .iter()
            .find(|d| d.name == name)
            .with_context(|| {
                let known: Vec<&str> = self.devices.iter().map(|d| d.name.as_str()).collect();
                format!(
                    "no device named '{}' in the inventory (known: {})",
                    name,
                    known.join(", ")
                )
            })
    }
}

/// Load the inventory from a TOML file with NETPROBE_* environment
/// overrides
pub fn load(path: &str) -> Result<Inventory> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path))
        .add_source(config::Environment::with_prefix("NETPROBE").separator("__"))
        .build()
        .with_context(|| format!("failed to load device inventory from {}", path))?;

    settings
        .try_deserialize()
        .context("invalid device inventory")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory() -> Inventory {
        serde_json::from_str(
            r#"{"devices": [
                {"name": "fw", "driver": "opnsense-interfaces", "host": "192.0.2.1"},
                {"name": "cache", "driver": "redis-info", "host": "10.0.0.5"}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_device_lookup() {
        let inventory = inventory();
        assert_eq!(inventory.device("cache").unwrap().host, "10.0.0.5");
    }

    #[test]
    fn test_unknown_device_lists_known_names() {
        let inventory = inventory();
        let err = inventory.device("nope").unwrap_err();
        assert!(err.to_string().contains("fw, cache"));
    }
}
