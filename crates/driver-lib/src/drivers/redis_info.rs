//! Cache server: INFO fields over a raw TCP (telnet-style) connection
//!
//! Sends `info` and reports every `key:value` pair as a variable, dropping
//! the `_human` duplicates. Authentication, when the server requires it,
//! rides on the transport's on-connect AUTH line.

use super::{Driver, DriverOutput};
use crate::classify::classify_command;
use crate::error::DriverError;
use crate::extract::parse_info_variables;
use crate::transport::CommandTransport;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

const INFO_COMMAND: &str = "info";

pub struct RedisInfoDriver {
    telnet: Arc<dyn CommandTransport>,
}

impl RedisInfoDriver {
    pub fn new(telnet: Arc<dyn CommandTransport>) -> Self {
        Self { telnet }
    }
}

#[async_trait]
impl Driver for RedisInfoDriver {
    fn name(&self) -> &'static str {
        "redis-info"
    }

    async fn validate(&self) -> Result<(), DriverError> {
        let response = self.telnet.run(INFO_COMMAND).await;
        classify_command(self.telnet.protocol(), &response)?;
        Ok(())
    }

    async fn collect(&self) -> Result<DriverOutput, DriverError> {
        let response = self.telnet.run(INFO_COMMAND).await;
        let output = classify_command(self.telnet.protocol(), &response)?;

        let variables = parse_info_variables(output);
        debug!(variables = variables.len(), "assembled info variables");
        Ok(DriverOutput::Variables(variables))
    }
}
