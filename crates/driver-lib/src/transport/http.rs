//! HTTPS transport backed by reqwest
//!
//! Appliance APIs in this corpus authenticate with basic auth, often sit
//! behind self-signed certificates, and track login state with a session
//! cookie, so the client keeps a cookie store for the lifetime of one
//! collection invocation and can skip certificate verification per device.

use super::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::error::DriverError;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// HTTP client bound to one device
pub struct DeviceHttpClient {
    client: reqwest::Client,
    base_url: Url,
    username: String,
    password: String,
}

impl DeviceHttpClient {
    /// Build a client for the device at `base_url`
    pub fn new(
        base_url: Url,
        username: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
        verify_tls: bool,
    ) -> Result<Self, DriverError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .danger_accept_invalid_certs(!verify_tls)
            .build()
            .map_err(|e| DriverError::generic(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            username: username.into(),
            password: password.into(),
        })
    }
}

#[async_trait]
impl HttpTransport for DeviceHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, DriverError> {
        let url = self
            .base_url
            .join(&request.path)
            .map_err(|e| DriverError::generic(format!("invalid request path: {}", e)))?;

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };

        if request.basic_auth {
            builder = builder.basic_auth(&self.username, Some(&self.password));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| DriverError::generic(format!("request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DriverError::generic(format!("failed to read response body: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_http;
    use crate::error::FailureKind;

    fn client(server_url: &str) -> DeviceHttpClient {
        DeviceHttpClient::new(
            Url::parse(server_url).unwrap(),
            "user",
            "pass",
            Duration::from_secs(5),
            true,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_success_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/status")
            .with_status(200)
            .with_body("{\"ok\":true}")
            .create_async()
            .await;

        let response = client(&server.url())
            .send(HttpRequest::get("/api/status"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_unauthorized_classifies_as_authentication() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/status")
            .with_status(401)
            .create_async()
            .await;

        let response = client(&server.url())
            .send(HttpRequest::get("/api/status"))
            .await
            .unwrap();

        let err = classify_http(response).unwrap_err();
        assert_eq!(err.kind, FailureKind::Authentication);
    }

    #[tokio::test]
    async fn test_basic_auth_header_sent_when_requested() {
        let mut server = mockito::Server::new_async().await;
        // user:pass
        let mock = server
            .mock("POST", "/api/auth")
            .match_header("authorization", "Basic dXNlcjpwYXNz")
            .with_status(200)
            .create_async()
            .await;

        client(&server.url())
            .send(HttpRequest::post("/api/auth").with_basic_auth())
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connect_failure_is_generic() {
        // Nothing listens on this port
        let client = client("http://127.0.0.1:9");
        let err = client.send(HttpRequest::get("/")).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::Generic);
    }
}
