//! WinRM transport: remote PowerShell through a local `pwsh`
//!
//! There is no native WinRM client here; commands are relayed through
//! PowerShell remoting (`Invoke-Command` with basic authentication), and
//! remoting failures are normalized onto WinRM's HTTP-style status codes:
//! 401 for rejected credentials, 404 for an absent endpoint. The classifier
//! only ever sees those codes, so a native client can replace this
//! implementation without touching any driver.

use super::{CommandError, CommandResponse, CommandTransport, Protocol};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// WinRM client bound to one Windows host
#[derive(Debug, Clone)]
pub struct WinRmShell {
    host: String,
    port: u16,
    username: String,
    password: String,
    timeout: Duration,
}

impl WinRmShell {
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

    fn script_for(&self, command: &str) -> String {
        format!(
            "$password = ConvertTo-SecureString '{password}' -AsPlainText -Force; \
             $credential = New-Object System.Management.Automation.PSCredential('{username}', $password); \
             Invoke-Command -ComputerName '{host}' -Port {port} -Authentication Basic -Credential $credential \
             -ScriptBlock {{ {command} }}",
            password = quote_single(&self.password),
            username = quote_single(&self.username),
            host = quote_single(&self.host),
            port = self.port,
            command = command,
        )
    }

    async fn exec(&self, command: &str) -> Result<String, CommandError> {
        let output = Command::new("pwsh")
            .args(["-NoProfile", "-NonInteractive", "-Command"])
            .arg(self.script_for(command))
            .output();

        let output = timeout(self.timeout, output)
            .await
            .map_err(|_| CommandError {
                code: None,
                message: format!("command against {} timed out", self.host),
            })?
            .map_err(|e| CommandError {
                code: None,
                message: format!("failed to launch pwsh: {}", e),
            })?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        Err(CommandError {
            code: classify_remoting_failure(&stderr),
            message: stderr,
        })
    }
}

/// Map a remoting error record onto the WinRM status code it stands for
fn classify_remoting_failure(stderr: &str) -> Option<i32> {
    let lowered = stderr.to_lowercase();
    if lowered.contains("access is denied")
        || lowered.contains("unauthorized")
        || lowered.contains("401")
    {
        Some(401)
    } else if lowered.contains("404") || lowered.contains("cannot find") {
        Some(404)
    } else {
        None
    }
}

/// Double embedded single quotes for a PowerShell single-quoted literal
fn quote_single(value: &str) -> String {
    value.replace('\'', "''")
}

#[async_trait]
impl CommandTransport for WinRmShell {
    fn protocol(&self) -> Protocol {
        Protocol::WinRm
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remoting_failure_codes() {
        assert_eq!(
            classify_remoting_failure("Connecting to remote server failed: Access is denied."),
            Some(401)
        );
        assert_eq!(
            classify_remoting_failure("The WinRM client received an HTTP status code of 404."),
            Some(404)
        );
        assert_eq!(
            classify_remoting_failure("The network path was not found."),
            None
        );
    }

    #[test]
    fn test_script_quotes_credentials() {
        let shell = WinRmShell::new("host", 5985, "user", "p'ass", Duration::from_secs(5));
        let script = shell.script_for("quser");
        assert!(script.contains("'p''ass'"));
        assert!(script.contains("-Port 5985"));
        assert!(script.contains("{ quser }"));
    }
}
