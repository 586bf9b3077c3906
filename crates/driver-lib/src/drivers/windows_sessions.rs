//! Windows host: currently logged-in user sessions over WinRM
//!
//! Runs `quser` remotely (stderr suppressed so an empty session list is not
//! an error) and reports one row per session, keyed by username.

use super::{Driver, DriverOutput};
use crate::classify::classify_command;
use crate::error::DriverError;
use crate::extract::parse_quser_sessions;
use crate::output::{Column, Table};
use crate::transport::CommandTransport;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

const SESSIONS_COMMAND: &str =
    "Start-Process quser -NoNewWindow -RedirectStandardError \"NUL\"";

pub struct WindowsSessionsDriver {
    shell: Arc<dyn CommandTransport>,
}

impl WindowsSessionsDriver {
    pub fn new(shell: Arc<dyn CommandTransport>) -> Self {
        Self { shell }
    }
}

#[async_trait]
impl Driver for WindowsSessionsDriver {
    fn name(&self) -> &'static str {
        "windows-sessions"
    }

    async fn validate(&self) -> Result<(), DriverError> {
        let response = self.shell.run(SESSIONS_COMMAND).await;
        classify_command(self.shell.protocol(), &response)?;
        Ok(())
    }

    async fn collect(&self) -> Result<DriverOutput, DriverError> {
        let response = self.shell.run(SESSIONS_COMMAND).await;
        let output = classify_command(self.shell.protocol(), &response)?;

        let mut table = Table::new(
            "Logged In Users",
            vec![
                Column::text("State"),
                Column::text("Logon Time"),
                Column::text("Session ID"),
                Column::text("Idle Time"),
                Column::text("Session Name"),
            ],
        );

        for session in parse_quser_sessions(output) {
            table.insert_record(
                &session.username,
                vec![
                    session.state,
                    session.logon_time,
                    session.session_id,
                    session.idle_time,
                    session.session_name,
                ],
            );
        }

        debug!(sessions = table.len(), "assembled session table");
        Ok(DriverOutput::Table(table))
    }
}
