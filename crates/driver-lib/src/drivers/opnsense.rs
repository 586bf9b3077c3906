//! OPNsense firewall: advanced IPv6 statistics per interface
//!
//! Fetches the pf statistics endpoint and reports one row per interface
//! with the IPv6 block/pass byte counters. The firewall's API key and
//! secret ride as basic-auth username and password.

use super::{Driver, DriverOutput};
use crate::classify::classify_json;
use crate::error::DriverError;
use crate::extract::include_entity;
use crate::output::{Column, Table};
use crate::transport::{HttpRequest, HttpTransport};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

const INTERFACES_PATH: &str = "/api/diagnostics/firewall/pf_statistics/interfaces";

/// pf statistics payload: interface name → counters
///
/// A BTreeMap keeps row order deterministic across runs.
#[derive(Debug, Deserialize)]
struct PfStatistics {
    #[serde(default)]
    interfaces: BTreeMap<String, InterfaceCounters>,
}

#[derive(Debug, Default, Deserialize)]
struct InterfaceCounters {
    #[serde(default)]
    cleared: String,
    #[serde(default)]
    references: u64,
    #[serde(default)]
    in6_block_bytes: u64,
    #[serde(default)]
    in6_pass_bytes: u64,
    #[serde(default)]
    out6_block_bytes: u64,
    #[serde(default)]
    out6_pass_bytes: u64,
}

pub struct OpnsenseInterfacesDriver {
    http: Arc<dyn HttpTransport>,
    interface_filter: Vec<String>,
}

impl OpnsenseInterfacesDriver {
    pub fn new(http: Arc<dyn HttpTransport>, interface_filter: Vec<String>) -> Self {
        Self {
            http,
            interface_filter,
        }
    }

    async fn fetch(&self) -> Result<PfStatistics, DriverError> {
        let response = self
            .http
            .send(HttpRequest::get(INTERFACES_PATH).with_basic_auth())
            .await?;
        classify_json(response)
    }
}

#[async_trait]
impl Driver for OpnsenseInterfacesDriver {
    fn name(&self) -> &'static str {
        "opnsense-interfaces"
    }

    async fn validate(&self) -> Result<(), DriverError> {
        let stats = self.fetch().await?;
        if stats.interfaces.is_empty() {
            return Err(DriverError::generic("no interface data available"));
        }
        Ok(())
    }

    async fn collect(&self) -> Result<DriverOutput, DriverError> {
        let stats = self.fetch().await?;

        let mut table = Table::new(
            "Interfaces Advanced IPV6",
            vec![
                Column::datetime("Cleared"),
                Column::number("References"),
                Column::number("In traffic (ipv6 block)"),
                Column::number("In traffic (ipv6 pass)"),
                Column::number("Out traffic (ipv6 block)"),
                Column::number("Out traffic (ipv6 pass)"),
            ],
        );

        for (interface, counters) in &stats.interfaces {
            // "all" is the firewall's aggregate pseudo-interface
            if interface == "all" {
                continue;
            }
            if !include_entity(interface, &self.interface_filter) {
                continue;
            }

            table.insert_record(
                interface,
                vec![
                    counters.cleared.clone(),
                    counters.references.to_string(),
                    counters.in6_block_bytes.to_string(),
                    counters.in6_pass_bytes.to_string(),
                    counters.out6_block_bytes.to_string(),
                    counters.out6_pass_bytes.to_string(),
                ],
            );
        }

        debug!(rows = table.len(), "assembled interface statistics");
        Ok(DriverOutput::Table(table))
    }
}
