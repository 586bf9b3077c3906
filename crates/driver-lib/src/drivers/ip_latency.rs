//! IP latency over SSH: ping a list of addresses from a Linux host
//!
//! One ping run per configured address, dispatched concurrently and joined
//! with an all-of barrier. A single failing address fails the whole
//! collection; rows come out in the configured address order regardless of
//! which ping finishes first.

use super::{Driver, DriverOutput};
use crate::classify::classify_command;
use crate::error::DriverError;
use crate::extract::{parse_ping_stats, PingStats};
use crate::output::{Column, Table};
use crate::transport::CommandTransport;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::debug;

pub struct IpLatencyDriver {
    ssh: Arc<dyn CommandTransport>,
    addresses: Vec<String>,
    packet_count: u32,
}

impl IpLatencyDriver {
    pub fn new(ssh: Arc<dyn CommandTransport>, addresses: Vec<String>, packet_count: u32) -> Self {
        Self {
            ssh,
            addresses,
            packet_count,
        }
    }
}

/// Record identifiers are the sha256 of the address, hex-encoded and
/// truncated to the 50-character identifier limit; history stays keyed to
/// the same ids across releases
fn record_id(address: &str) -> String {
    let digest = Sha256::digest(address.as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(50);
    id
}

async fn ping(
    transport: Arc<dyn CommandTransport>,
    packet_count: u32,
    address: &str,
) -> Result<PingStats, DriverError> {
    let command = format!("ping -c {} {}", packet_count, address);
    debug!(address = %address, "pinging");

    let response = transport.run(&command).await;
    let output = classify_command(transport.protocol(), &response)?;
    parse_ping_stats(output)
}

#[async_trait]
impl Driver for IpLatencyDriver {
    fn name(&self) -> &'static str {
        "ip-latency"
    }

    async fn validate(&self) -> Result<(), DriverError> {
        let response = self.ssh.run("ls").await;
        classify_command(self.ssh.protocol(), &response)?;
        Ok(())
    }

    async fn collect(&self) -> Result<DriverOutput, DriverError> {
        if self.addresses.is_empty() {
            return Err(DriverError::generic("no addresses configured"));
        }

        let mut pings = JoinSet::new();
        for (index, address) in self.addresses.iter().enumerate() {
            let transport = Arc::clone(&self.ssh);
            let address = address.clone();
            let packet_count = self.packet_count;
            pings.spawn(async move {
                let stats = ping(transport, packet_count, &address).await;
                (index, address, stats)
            });
        }

        // All-of barrier with fail-fast: the first classified failure fails
        // the whole run and no table is produced
        let mut slots: Vec<Option<(String, PingStats)>> = vec![None; self.addresses.len()];
        while let Some(joined) = pings.join_next().await {
            let (index, address, stats) =
                joined.map_err(|e| DriverError::generic(format!("ping task failed: {}", e)))?;
            slots[index] = Some((address, stats?));
        }

        let mut table = Table::new(
            "IP Latency",
            vec![
                Column::text("IP Address"),
                Column::number("Latency").unit("ms"),
                Column::number("Packet Loss").unit("%"),
            ],
        );

        for slot in slots {
            let (address, stats) =
                slot.ok_or_else(|| DriverError::generic("ping result missing"))?;
            table.insert_record(
                &record_id(&address),
                vec![
                    address,
                    stats.average_ms.to_string(),
                    stats.packet_loss_pct.to_string(),
                ],
            );
        }

        Ok(DriverOutput::Table(table))
    }
}
