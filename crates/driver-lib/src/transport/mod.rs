//! Transport seams for the wire protocols the drivers speak
//!
//! Each driver talks to exactly one device over exactly one protocol. The
//! traits here are the boundary between driver logic and the network: the
//! production implementations live in the submodules, and tests substitute
//! in-memory fakes. Transports never retry; a timeout is an ordinary
//! failure once it fires.

mod http;
mod ssh;
mod telnet;
mod winrm;

pub use http::DeviceHttpClient;
pub use ssh::SshCommandClient;
pub use telnet::TelnetClient;
pub use winrm::WinRmShell;

use crate::error::DriverError;
use async_trait::async_trait;

/// Wire protocol a command transport speaks, used by the classifier to
/// select its protocol-specific rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Ssh,
    Telnet,
    WinRm,
}

/// HTTP method for a request descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Request descriptor for the HTTP transport, created per call
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    /// Send basic-auth credentials with this request (login calls and
    /// key-authenticated APIs); cookie-jar state is sent either way
    pub basic_auth: bool,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            basic_auth: false,
            body: None,
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            basic_auth: false,
            body: None,
        }
    }

    /// Attach basic-auth credentials
    pub fn with_basic_auth(mut self) -> Self {
        self.basic_auth = true;
        self
    }

    /// Attach a JSON body
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Raw HTTP response envelope: status plus undecoded body
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Error half of a command-transport envelope
#[derive(Debug, Clone)]
pub struct CommandError {
    /// Protocol-specific code when one exists (SSH auth sentinel, WinRM
    /// HTTP-style status)
    pub code: Option<i32>,
    pub message: String,
}

/// Response envelope for SSH, Telnet, and WinRM commands
///
/// Failures ride inside the envelope rather than a `Result` so that every
/// classification decision, including authentication, is made by the
/// classifier and not the transport.
#[derive(Debug, Clone)]
pub struct CommandResponse {
    pub output: String,
    pub error: Option<CommandError>,
}

impl CommandResponse {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            error: None,
        }
    }

    pub fn failure(code: Option<i32>, message: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            error: Some(CommandError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Issues HTTP requests against one device
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform the call and deliver the raw envelope; transport-level
    /// failures (connect, TLS, timeout) are already classified as generic
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, DriverError>;
}

/// Runs a single command string against one device
#[async_trait]
pub trait CommandTransport: Send + Sync {
    fn protocol(&self) -> Protocol;

    async fn run(&self, command: &str) -> CommandResponse;
}
