//! Telnet transport: a raw TCP command client
//!
//! The devices spoken to this way (redis and friends) need no option
//! negotiation, so the client is a plain TCP line protocol: optionally send
//! an on-connect command (an AUTH line), send the command, then read until
//! the peer closes or goes idle. The per-request timeout bounds the whole
//! exchange.

use super::{CommandError, CommandResponse, CommandTransport, Protocol};
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{timeout, Instant};

/// Window of silence after which a response is considered complete
const IDLE_WINDOW: Duration = Duration::from_millis(300);

/// Telnet client bound to one device
#[derive(Debug, Clone)]
pub struct TelnetClient {
    host: String,
    port: u16,
    timeout: Duration,
    on_connect: Option<String>,
}

impl TelnetClient {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        timeout: Duration,
        on_connect: Option<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
            on_connect,
        }
    }

    async fn exec(&self, command: &str) -> Result<String, CommandError> {
        let deadline = Instant::now() + self.timeout;

        let connect = TcpStream::connect((self.host.as_str(), self.port));
        let mut stream = timeout(self.timeout, connect)
            .await
            .map_err(|_| transport_error(format!("connect to {} timed out", self.host)))?
            .map_err(|e| transport_error(format!("failed to connect to {}: {}", self.host, e)))?;

        if let Some(line) = &self.on_connect {
            write_line(&mut stream, line).await?;
        }
        write_line(&mut stream, command).await?;

        let mut output = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                if output.is_empty() {
                    return Err(transport_error("command timed out".to_string()));
                }
                break;
            }

            match timeout(IDLE_WINDOW.min(remaining), stream.read(&mut buf)).await {
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => output.extend_from_slice(&buf[..n]),
                Ok(Err(e)) => {
                    return Err(transport_error(format!("failed to read response: {}", e)))
                }
                // Idle with data already buffered: the response is complete
                Err(_) if !output.is_empty() => break,
                Err(_) => {}
            }
        }

        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

async fn write_line(stream: &mut TcpStream, line: &str) -> Result<(), CommandError> {
    let mut bytes = line.trim_end_matches(['\r', '\n']).as_bytes().to_vec();
    bytes.extend_from_slice(b"\r\n");
    stream
        .write_all(&bytes)
        .await
        .map_err(|e| transport_error(format!("failed to send command: {}", e)))
}

fn transport_error(message: String) -> CommandError {
    CommandError {
        code: None,
        message,
    }
}

#[async_trait]
impl CommandTransport for TelnetClient {
    fn protocol(&self) -> Protocol {
        Protocol::Telnet
    }

    async fn run(&self, command: &str) -> CommandResponse {
        match self.exec(command).await {
            Ok(output) => CommandResponse::success(output),
            Err(error) => CommandResponse {
                output: String::new(),
                error: Some(error),
            },
        }
    }
}
