//! List the configured devices

use crate::config::Inventory;
use crate::output::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Row for the device listing
#[derive(Tabled, Serialize)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Driver")]
    driver: String,
    #[tabled(rename = "Host")]
    host: String,
}

pub fn run(inventory: &Inventory, format: OutputFormat) -> Result<()> {
    let rows: Vec<DeviceRow> = inventory
        .devices
        .iter()
        .map(|device| DeviceRow {
            name: device.name.clone(),
            driver: device.driver.as_str().to_string(),
            host: device.host.clone(),
        })
        .collect();

    match format {
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("{}", "No devices configured".yellow());
                return Ok(());
            }
            println!("{}", Table::new(&rows).with(Style::rounded()));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }

    Ok(())
}
