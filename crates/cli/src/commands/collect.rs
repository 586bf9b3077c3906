//! The data-collection entry point

use crate::output::{print_driver_output, OutputFormat};
use anyhow::Result;
use chrono::{DateTime, Utc};
use driver_lib::{drivers, DeviceConfig, DriverOutput};
use serde::Serialize;
use tracing::info;

/// JSON envelope for one collection invocation
#[derive(Serialize)]
struct CollectionReport<'a> {
    device: &'a str,
    driver: &'a str,
    collected_at: DateTime<Utc>,
    output: &'a DriverOutput,
}

pub async fn run(device: &DeviceConfig, format: OutputFormat) -> Result<()> {
    let driver = drivers::build(device)?;
    info!(device = %device.name, driver = driver.name(), "collecting");

    let output = driver.collect().await?;

    match format {
        OutputFormat::Table => print_driver_output(&output),
        OutputFormat::Json => {
            let report = CollectionReport {
                device: &device.name,
                driver: driver.name(),
                collected_at: Utc::now(),
                output: &output,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
