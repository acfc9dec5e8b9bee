//! Network-related error types.
//!
//! Covers failures of the single HTTP attempt made per API call: the
//! connection never completing, the deadline elapsing, the server answering
//! with a non-200 status, or the body not being a readable envelope.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Network error type.
///
/// `ConnectionFailed`, `Timeout` and `InvalidResponse` are transport errors;
/// `Http` carries the status code of a non-200 answer.
///
/// ```
/// use hiface_core::error::NetworkError;
///
/// let error = NetworkError::Http {
///     status_code: 404,
///     reason: "Not Found".to_string(),
/// };
/// assert_eq!(error.status_code(), Some(404));
/// assert!(!error.is_transport());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkError {
    /// Connection to remote host failed.
    #[error("[Network] Connection failed: {reason}")]
    ConnectionFailed {
        /// Reason for the connection failure.
        reason: String,
    },

    /// Request did not complete within the configured timeout.
    #[error("[Network] Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// Server answered with a status other than 200.
    #[error("[Network] HTTP error: status {status_code} - {reason}")]
    Http {
        /// HTTP status code.
        status_code: u16,
        /// Status text or body excerpt.
        reason: String,
    },

    /// Body of a 200 answer was not a `Response` envelope.
    #[error("[Network] Invalid response: {reason}")]
    InvalidResponse {
        /// What was wrong with the body.
        reason: String,
    },
}

impl NetworkError {
    /// Returns true for failures of the transport itself (no usable HTTP answer).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Http { .. })
    }

    /// Returns the HTTP status code for `Http` errors.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Returns true if this error is recoverable (a later attempt may succeed).
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.severity().is_recoverable()
    }

    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> super::ErrorSeverity {
        use super::ErrorSeverity;
        match self {
            Self::Timeout { .. } | Self::ConnectionFailed { .. } => ErrorSeverity::Recoverable,
            Self::Http { status_code, .. } if *status_code >= 500 => ErrorSeverity::Recoverable,
            Self::Http { .. } => ErrorSeverity::Warning,
            Self::InvalidResponse { .. } => ErrorSeverity::Fatal,
        }
    }

    /// Returns a suggested retry delay in milliseconds, if applicable.
    #[must_use]
    pub fn suggested_retry_delay_ms(&self) -> Option<u64> {
        match self {
            Self::Timeout { timeout_ms } => Some(*timeout_ms / 2),
            Self::ConnectionFailed { .. } => Some(1000),
            Self::Http { status_code, .. } if *status_code >= 500 => Some(1000),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failed() {
        let error = NetworkError::ConnectionFailed {
            reason: "Connection refused".to_string(),
        };
        assert!(error.to_string().contains("Connection refused"));
        assert!(error.is_transport());
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_timeout() {
        let error = NetworkError::Timeout { timeout_ms: 5000 };
        assert!(error.to_string().contains("5000ms"));
        assert!(error.is_recoverable());
        assert_eq!(error.suggested_retry_delay_ms(), Some(2500));
    }

    #[test]
    fn test_http_status() {
        let error = NetworkError::Http {
            status_code: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(error.status_code(), Some(404));
        assert!(!error.is_transport());
        assert!(error.is_recoverable());
        assert_eq!(error.suggested_retry_delay_ms(), None);

        let error = NetworkError::Http {
            status_code: 502,
            reason: "Bad Gateway".to_string(),
        };
        assert_eq!(error.suggested_retry_delay_ms(), Some(1000));
    }

    #[test]
    fn test_invalid_response_is_fatal() {
        let error = NetworkError::InvalidResponse {
            reason: "missing Response".to_string(),
        };
        assert!(error.is_transport());
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_serde_roundtrip() {
        let error = NetworkError::Timeout { timeout_ms: 3000 };
        let json = serde_json::to_string(&error).unwrap();
        let parsed: NetworkError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, parsed);
    }
}
