//! Vendor-reported service errors.
//!
//! A 200 answer whose envelope carries `Response.Error` becomes a
//! [`ServiceError`]. Vendor codes are dotted (`AuthFailure.SignatureExpire`);
//! the classification helpers match on the leading segment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Business error reported by the cloud API.
///
/// ```
/// use hiface_core::error::ServiceError;
///
/// let error = ServiceError::new("AuthFailure.SignatureFailure", "bad signature", "req-1");
/// assert!(error.is_auth_failure());
/// assert!(error.to_string().contains("req-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("[Service] {code}: {message} (request id: {request_id})")]
pub struct ServiceError {
    /// Machine-readable vendor error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Request-correlation identifier returned by the vendor.
    pub request_id: String,
}

impl ServiceError {
    /// Creates a new service error.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            request_id: request_id.into(),
        }
    }

    fn code_family(&self) -> &str {
        self.code.split('.').next().unwrap_or_default()
    }

    /// Returns true for `AuthFailure` codes (bad credential, signature, or clock skew).
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        self.code_family() == "AuthFailure"
    }

    /// Returns true for `RequestLimitExceeded` codes.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.code_family() == "RequestLimitExceeded"
    }

    /// Returns true for `InternalError` codes.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.code_family() == "InternalError"
    }

    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> super::ErrorSeverity {
        use super::ErrorSeverity;
        if self.is_rate_limited() || self.is_internal() {
            ErrorSeverity::Recoverable
        } else if self.is_auth_failure() {
            ErrorSeverity::Fatal
        } else {
            ErrorSeverity::Warning
        }
    }

    /// Returns a suggested retry delay in milliseconds, if applicable.
    #[must_use]
    pub fn suggested_retry_delay_ms(&self) -> Option<u64> {
        if self.is_rate_limited() {
            Some(1000)
        } else if self.is_internal() {
            Some(500)
        } else {
            None
        }
    }
}
