//! Failure taxonomy shared by every driver
//!
//! Classification happens as close to the transport boundary as possible;
//! once classified, the category propagates unchanged to the entry point.
//! There are no retries and no partial-result reporting anywhere.

use serde::Serialize;
use thiserror::Error;

/// Category reported to the host when an invocation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Bad or expired credentials
    Authentication,
    /// Endpoint or command target absent (HTTP 404, WinRM 404)
    ResourceUnavailable,
    /// Everything else: transport failure, malformed payload, unexpected
    /// status, timeout
    Generic,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FailureKind::Authentication => "authentication error",
            FailureKind::ResourceUnavailable => "resource unavailable",
            FailureKind::Generic => "generic error",
        };
        f.write_str(label)
    }
}

/// Classified failure carried from the transport boundary to the caller
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct DriverError {
    pub kind: FailureKind,
    pub message: String,
}

impl DriverError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Authentication, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ResourceUnavailable, message)
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Generic, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category() {
        let err = DriverError::authentication("login rejected");
        assert_eq!(err.to_string(), "authentication error: login rejected");
        assert_eq!(err.kind, FailureKind::Authentication);
    }

    #[test]
    fn test_generic_constructor() {
        let err = DriverError::generic("timed out");
        assert_eq!(err.kind, FailureKind::Generic);
    }
}
