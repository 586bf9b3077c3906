//! SSH transport: one command per call over ssh2
//!
//! ssh2 is a blocking library, so each call runs on the blocking thread
//! pool. Authentication failures are reported with the fixed sentinel code
//! the classifier keys on; every other failure is carried without a code.
//! A command's exit status is not an error: drivers judge the output
//! itself (ping reports total packet loss on stdout with a non-zero exit).

use super::{CommandError, CommandResponse, CommandTransport, Protocol};
use crate::classify::SSH_AUTH_ERROR_CODE;
use async_trait::async_trait;
use ssh2::Session;
use std::io::Read;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// SSH client bound to one device
#[derive(Debug, Clone)]
pub struct SshCommandClient {
    host: String,
    port: u16,
    username: String,
    password: String,
    timeout: Duration,
}

impl SshCommandClient {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
            timeout,
        }
    }

    fn exec_blocking(&self, command: &str) -> Result<String, CommandError> {
        let addr = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| transport_error(format!("failed to resolve {}: {}", self.host, e)))?
            .next()
            .ok_or_else(|| transport_error(format!("no address for {}", self.host)))?;

        let tcp = TcpStream::connect_timeout(&addr, self.timeout)
            .map_err(|e| transport_error(format!("failed to connect to {}: {}", addr, e)))?;
        tcp.set_read_timeout(Some(self.timeout))
            .map_err(|e| transport_error(format!("failed to set read timeout: {}", e)))?;
        tcp.set_write_timeout(Some(self.timeout))
            .map_err(|e| transport_error(format!("failed to set write timeout: {}", e)))?;

        let mut session = Session::new()
            .map_err(|e| transport_error(format!("failed to create session: {}", e)))?;
        session.set_tcp_stream(tcp);
        session.set_timeout(self.timeout.as_millis() as u32);
        session
            .handshake()
            .map_err(|e| transport_error(format!("handshake failed: {}", e)))?;

        session
            .userauth_password(&self.username, &self.password)
            .map_err(|e| CommandError {
                code: Some(SSH_AUTH_ERROR_CODE),
                message: format!("authentication failed for {}: {}", self.username, e),
            })?;
        if !session.authenticated() {
            return Err(CommandError {
                code: Some(SSH_AUTH_ERROR_CODE),
                message: format!("authentication failed for {}", self.username),
            });
        }

        let mut channel = session
            .channel_session()
            .map_err(|e| transport_error(format!("failed to open channel: {}", e)))?;
        channel
            .exec(command)
            .map_err(|e| transport_error(format!("failed to execute command: {}", e)))?;

        let mut output = String::new();
        channel
            .read_to_string(&mut output)
            .map_err(|e| transport_error(format!("failed to read command output: {}", e)))?;
        let _ = channel.wait_close();

        Ok(output)
    }
}

fn transport_error(message: String) -> CommandError {
    CommandError {
        code: None,
        message,
    }
}

#[async_trait]
impl CommandTransport for SshCommandClient {
    fn protocol(&self) -> Protocol {
        Protocol::Ssh
    }

    async fn run(&self, command: &str) -> CommandResponse {
        let client = self.clone();
        let command = command.to_string();

        let result =
            tokio::task::spawn_blocking(move || client.exec_blocking(&command)).await;

        match result {
            Ok(Ok(output)) => CommandResponse::success(output),
            Ok(Err(error)) => CommandResponse {
                output: String::new(),
                error: Some(error),
            },
            Err(e) => CommandResponse::failure(None, format!("ssh task panicked: {}", e)),
        }
    }
}
