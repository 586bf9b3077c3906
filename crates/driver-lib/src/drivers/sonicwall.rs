//! SonicWALL firewall: license state of the additional security services
//!
//! Logs in with basic auth (the session rides on the transport's cookie
//! jar), fetches the dashboard payload, and reports one variable per
//! monitored service. Services absent from the payload produce an empty
//! value and are dropped before output.

use super::{Driver, DriverOutput};
use crate::classify::{classify_http, classify_json};
use crate::error::DriverError;
use crate::output::{drop_empty, Variable};
use crate::transport::{HttpRequest, HttpTransport};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

const LOGIN_PATH: &str = "/api/sonicos/auth";
const DASHBOARD_PATH: &str = "/api/sonicos/dynamic-file/getDashboardData.json";

/// The services the dashboard reports, in output order
const KNOWN_SERVICES: [(&str, &str); 5] = [
    ("cfs", "Content Filtering license"),
    ("dns", "DNS security Service license"),
    ("cass", "Anti-Spam Service license"),
    ("cees", "Endpoint security - Client Capture license"),
    ("capture", "Capture Advanced Threat Protection license"),
];

pub struct SonicwallLicensesDriver {
    http: Arc<dyn HttpTransport>,
    services: Vec<String>,
}

impl SonicwallLicensesDriver {
    pub fn new(http: Arc<dyn HttpTransport>, services: Vec<String>) -> Self {
        Self { http, services }
    }

    /// Login is chained before every fetch; its response only gates the
    /// data call
    async fn login(&self) -> Result<(), DriverError> {
        let response = self
            .http
            .send(HttpRequest::post(LOGIN_PATH).with_basic_auth())
            .await?;
        classify_http(response)?;
        Ok(())
    }

    async fn fetch_dashboard(&self) -> Result<serde_json::Value, DriverError> {
        self.login().await?;
        let response = self.http.send(HttpRequest::get(DASHBOARD_PATH)).await?;
        classify_json(response)
    }

    fn license_value(data: &serde_json::Value, service: &str) -> String {
        match data.get(service).and_then(|s| s.get("licensed")) {
            Some(serde_json::Value::Bool(true)) => "Active".to_string(),
            Some(serde_json::Value::Bool(false)) => "Not active".to_string(),
            _ => String::new(),
        }
    }

    fn extract(&self, data: &serde_json::Value) -> Vec<Variable> {
        let monitor_all = self
            .services
            .first()
            .is_some_and(|s| s.eq_ignore_ascii_case("all"));

        let mut variables = Vec::new();
        if monitor_all {
            for (service, label) in KNOWN_SERVICES {
                variables.push(Variable::new(
                    format!("{}-licensed", service),
                    label,
                    Self::license_value(data, service),
                ));
            }
        } else {
            for requested in &self.services {
                let requested = requested.to_lowercase();
                // Unknown service names are ignored
                let Some((service, label)) = KNOWN_SERVICES
                    .iter()
                    .copied()
                    .find(|(s, _)| *s == requested)
                else {
                    continue;
                };
                variables.push(Variable::new(
                    format!("{}-licensed", service),
                    label,
                    Self::license_value(data, service),
                ));
            }
        }

        drop_empty(variables)
    }
}

#[async_trait]
impl Driver for SonicwallLicensesDriver {
    fn name(&self) -> &'static str {
        "sonicwall-licenses"
    }

    async fn validate(&self) -> Result<(), DriverError> {
        let data = self.fetch_dashboard().await?;
        if data.as_object().map_or(true, |o| o.is_empty()) {
            return Err(DriverError::generic("no dashboard data available"));
        }
        Ok(())
    }

    async fn collect(&self) -> Result<DriverOutput, DriverError> {
        let data = self.fetch_dashboard().await?;
        let variables = self.extract(&data);
        debug!(variables = variables.len(), "assembled license variables");
        Ok(DriverOutput::Variables(variables))
    }
}
