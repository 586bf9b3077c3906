//! The monitoring drivers
//!
//! Every driver is independent and exposes the same two entry points:
//! `validate` proves connectivity and credentials with the cheapest call
//! available, `collect` fetches, extracts, and assembles the final table or
//! variable list. Any unrecoverable failure fails the whole invocation
//! with its classified category; there is no partial-result reporting.

mod ip_latency;
mod opnsense;
mod redis_info;
mod sonicwall;
mod windows_sessions;


pub use ip_latency::IpLatencyDriver;
pub use opnsense::OpnsenseInterfacesDriver;
pub use redis_info::RedisInfoDriver;
pub use sonicwall::SonicwallLicensesDriver;
pub use windows_sessions::WindowsSessionsDriver;

use crate::config::DeviceConfig;
use crate::error::DriverError;
use crate::output::{Table, Variable};
use crate::transport::{DeviceHttpClient, SshCommandClient, TelnetClient, WinRmShell};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

/// Structured result of one collection invocation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverOutput {
    Table(Table),
    Variables(Vec<Variable>),
}

/// One self-contained monitoring driver targeting one device
#[async_trait]
pub trait Driver: Send + Sync {
    fn name(&self) -> &'static str;

    /// Minimum call sufficient to prove connectivity and credentials;
    /// success carries no payload
    async fn validate(&self) -> Result<(), DriverError>;

    /// Fetch, extract, and assemble the device's status data
    async fn collect(&self) -> Result<DriverOutput, DriverError>;
}

/// Driver selector used in device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriverKind {
    OpnsenseInterfaces,
    SonicwallLicenses,
    IpLatency,
    WindowsSessions,
    RedisInfo,
}

impl DriverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverKind::OpnsenseInterfaces => "opnsense-interfaces",
            DriverKind::SonicwallLicenses => "sonicwall-licenses",
            DriverKind::IpLatency => "ip-latency",
            DriverKind::WindowsSessions => "windows-sessions",
            DriverKind::RedisInfo => "redis-info",
        }
    }
}

/// Build the driver for a configured device, wiring up its production
/// transport
pub fn build(device: &DeviceConfig) -> Result<Box<dyn Driver>, DriverError> {
    let driver: Box<dyn Driver> = match device.driver {
        DriverKind::OpnsenseInterfaces => Box::new(OpnsenseInterfacesDriver::new(
            Arc::new(https_client(device)?),
            device.params.interface_filter.clone(),
        )),
        DriverKind::SonicwallLicenses => Box::new(SonicwallLicensesDriver::new(
            Arc::new(https_client(device)?),
            device.params.services.clone(),
        )),
        DriverKind::IpLatency => Box::new(IpLatencyDriver::new(
            Arc::new(SshCommandClient::new(
                &device.host,
                device.port_or(22),
                &device.username,
                &device.password,
                device.timeout(),
            )),
            device.params.addresses.clone(),
            device.params.packet_count,
        )),
        DriverKind::WindowsSessions => Box::new(WindowsSessionsDriver::new(Arc::new(
            WinRmShell::new(
                &device.host,
                device.port_or(5985),
                &device.username,
                &device.password,
                device.timeout(),
            ),
        ))),
        DriverKind::RedisInfo => Box::new(RedisInfoDriver::new(Arc::new(TelnetClient::new(
            &device.host,
            device.port_or(6379),
            device.timeout(),
            device.params.auth_command.clone(),
        )))),
    };

    Ok(driver)
}

fn https_client(device: &DeviceConfig) -> Result<DeviceHttpClient, DriverError> {
    let mut base = format!("https://{}", device.host);
    if let Some(port) = device.port {
        base.push_str(&format!(":{}", port));
    }
    let base_url = Url::parse(&base)
        .map_err(|e| DriverError::generic(format!("invalid device host: {}", e)))?;

    DeviceHttpClient::new(
        base_url,
        &device.username,
        &device.password,
        device.timeout(),
        device.verify_tls,
    )
}
