//! The connectivity/credential-check entry point

use crate::output::print_success;
use anyhow::Result;
use driver_lib::{drivers, DeviceConfig};
use tracing::info;

pub async fn run(device: &DeviceConfig) -> Result<()> {
    let driver = drivers::build(device)?;
    info!(device = %device.name, driver = driver.name(), "validating");

    driver.validate().await?;
    print_success(&format!(
        "{}: connectivity and credentials verified",
        device.name
    ));

    Ok(())
}
