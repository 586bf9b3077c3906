//! Response classification: envelope in, payload or failure category out
//!
//! One shared classifier parameterized by protocol replaces the per-script
//! triage the drivers would otherwise duplicate. The rules are fixed:
//!
//! - HTTP 401/403 → authentication, 404 → resource unavailable, any other
//!   non-200 → generic
//! - SSH error code 5 → authentication; success output containing
//!   `"100% packet loss"` → generic (reachable but unresponsive target)
//! - WinRM error code 401 → authentication, 404 → resource unavailable
//! - Telnet: any error → generic

use crate::error::DriverError;
use crate::transport::{CommandResponse, HttpResponse, Protocol};
use serde::de::DeserializeOwned;

/// Fixed sentinel the SSH transport reports on credential failure
pub const SSH_AUTH_ERROR_CODE: i32 = 5;

/// Marker distinguishing an unresponsive ping target from an SSH failure
const PACKET_LOSS_MARKER: &str = "100% packet loss";

/// Classify an HTTP envelope, forwarding the body on success
pub fn classify_http(response: HttpResponse) -> Result<String, DriverError> {
    match response.status {
        200 => Ok(response.body),
        401 | 403 => Err(DriverError::authentication(format!(
            "device returned status {}",
            response.status
        ))),
        404 => Err(DriverError::unavailable("device returned status 404")),
        status => Err(DriverError::generic(format!(
            "unexpected status {}",
            status
        ))),
    }
}

/// Classify an HTTP envelope and deserialize the successful body as JSON
pub fn classify_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, DriverError> {
    let body = classify_http(response)?;
    serde_json::from_str(&body)
        .map_err(|e| DriverError::generic(format!("malformed payload: {}", e)))
}

/// Classify a command envelope, forwarding the output on success
pub fn classify_command(
    protocol: Protocol,
    response: &CommandResponse,
) -> Result<&str, DriverError> {
    if let Some(error) = &response.error {
        let failure = match (protocol, error.code) {
            (Protocol::Ssh, Some(SSH_AUTH_ERROR_CODE)) => {
                DriverError::authentication(error.message.clone())
            }
            (Protocol::WinRm, Some(401)) => DriverError::authentication(error.message.clone()),
            (Protocol::WinRm, Some(404)) => DriverError::unavailable(error.message.clone()),
            _ => DriverError::generic(error.message.clone()),
        };
        return Err(failure);
    }

    if protocol == Protocol::Ssh && response.output.contains(PACKET_LOSS_MARKER) {
        return Err(DriverError::generic("target lost every packet"));
    }

    Ok(&response.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    fn http(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_http_auth_statuses() {
        for status in [401, 403] {
            let err = classify_http(http(status, "")).unwrap_err();
            assert_eq!(err.kind, FailureKind::Authentication, "status {}", status);
        }
    }

    #[test]
    fn test_http_not_found() {
        let err = classify_http(http(404, "")).unwrap_err();
        assert_eq!(err.kind, FailureKind::ResourceUnavailable);
    }

    #[test]
    fn test_http_other_non_200() {
        for status in [301, 500, 503] {
            let err = classify_http(http(status, "")).unwrap_err();
            assert_eq!(err.kind, FailureKind::Generic, "status {}", status);
        }
    }

    #[test]
    fn test_http_success_forwards_body() {
        let body = classify_http(http(200, "{\"ok\":true}")).unwrap();
        assert_eq!(body, "{\"ok\":true}");
    }

    #[test]
    fn test_json_success_parses_payload() {
        let value: serde_json::Value = classify_json(http(200, "{\"ok\":true}")).unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn test_json_malformed_body_is_generic() {
        let err = classify_json::<serde_json::Value>(http(200, "not json")).unwrap_err();
        assert_eq!(err.kind, FailureKind::Generic);
    }

    #[test]
    fn test_ssh_auth_sentinel() {
        let response = CommandResponse::failure(Some(SSH_AUTH_ERROR_CODE), "auth failed");
        let err = classify_command(Protocol::Ssh, &response).unwrap_err();
        assert_eq!(err.kind, FailureKind::Authentication);
    }

    #[test]
    fn test_ssh_other_error_is_generic() {
        let response = CommandResponse::failure(None, "connection reset");
        let err = classify_command(Protocol::Ssh, &response).unwrap_err();
        assert_eq!(err.kind, FailureKind::Generic);
    }

    #[test]
    fn test_ssh_total_packet_loss_is_generic() {
        // A response was received, but the target answered nothing
        let response = CommandResponse::success(
            "2 packets transmitted, 0 received, 100% packet loss, time 1013ms",
        );
        let err = classify_command(Protocol::Ssh, &response).unwrap_err();
        assert_eq!(err.kind, FailureKind::Generic);
    }

    #[test]
    fn test_ssh_partial_packet_loss_passes() {
        let response = CommandResponse::success(
            "2 packets transmitted, 1 received, 50% packet loss, time 1013ms",
        );
        assert!(classify_command(Protocol::Ssh, &response).is_ok());
    }

    #[test]
    fn test_winrm_codes() {
        let auth = CommandResponse::failure(Some(401), "access denied");
        assert_eq!(
            classify_command(Protocol::WinRm, &auth).unwrap_err().kind,
            FailureKind::Authentication
        );

        let missing = CommandResponse::failure(Some(404), "endpoint absent");
        assert_eq!(
            classify_command(Protocol::WinRm, &missing).unwrap_err().kind,
            FailureKind::ResourceUnavailable
        );

        let other = CommandResponse::failure(Some(500), "boom");
        assert_eq!(
            classify_command(Protocol::WinRm, &other).unwrap_err().kind,
            FailureKind::Generic
        );
    }

    #[test]
    fn test_telnet_error_is_generic() {
        let response = CommandResponse::failure(Some(401), "refused");
        let err = classify_command(Protocol::Telnet, &response).unwrap_err();
        assert_eq!(err.kind, FailureKind::Generic);
    }

    #[test]
    fn test_success_forwards_output() {
        let response = CommandResponse::success("uptime_in_seconds:12");
        assert_eq!(
            classify_command(Protocol::Telnet, &response).unwrap(),
            "uptime_in_seconds:12"
        );
    }
}
