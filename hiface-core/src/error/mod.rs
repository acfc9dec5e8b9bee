//! Error types and handling framework.
//!
//! Every cloud API call resolves to either a payload or exactly one
//! [`CloudError`]. The hierarchy is:
//! - `CloudError` - Top-level error type
//!   - `NetworkError` - Transport failures and non-200 HTTP statuses
//!   - `ServiceError` - Business errors reported in the vendor's `Response.Error`
//!   - `SigningError` - Failures while building a signed request
//!   - `ConfigError` - Configuration errors
//!
//! ```
//! use hiface_core::error::{CloudError, NetworkError};
//!
//! let error: CloudError = NetworkError::Timeout { timeout_ms: 5000 }.into();
//! assert!(error.is_transport_error());
//! assert_eq!(error.category(), "network");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error severity levels for categorizing errors.
///
/// - `Fatal`: the request cannot succeed without a change on the caller's side
/// - `Recoverable`: a later attempt may succeed
/// - `Warning`: the request failed but the condition is expected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Unrecoverable error requiring a change in configuration or input.
    Fatal,

    /// Error that a later attempt may not hit.
    #[default]
    Recoverable,

    /// Non-critical failure worth logging.
    Warning,
}

impl ErrorSeverity {
    /// Returns true if this error is recoverable (not fatal).
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Fatal)
    }

    /// Returns true if this error is fatal (unrecoverable).
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }

    /// Returns the severity as a static string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fatal => "FATAL",
            Self::Recoverable => "RECOVERABLE",
            Self::Warning => "WARNING",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

mod config;
mod network;
mod service;
mod signing;

pub use config::ConfigError;
pub use network::NetworkError;
pub use service::ServiceError;
pub use signing::SigningError;

/// Top-level error type returned by cloud API calls.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudError {
    /// Transport failure or non-200 HTTP status.
    #[error("{0}")]
    Network(#[from] NetworkError),

    /// Vendor-reported business error.
    #[error("{0}")]
    Service(#[from] ServiceError),

    /// Request could not be signed.
    #[error("{0}")]
    Signing(#[from] SigningError),

    /// Configuration error.
    #[error("{0}")]
    Config(#[from] ConfigError),
}

impl CloudError {
    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Network(e) => e.severity(),
            Self::Service(e) => e.severity(),
            Self::Signing(_) | Self::Config(_) => ErrorSeverity::Fatal,
        }
    }

    /// Returns true if this error is recoverable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.severity().is_recoverable()
    }

    /// Returns true if the connection itself failed (network, timeout, unreadable body).
    #[must_use]
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Network(e) if e.is_transport())
    }

    /// Returns the HTTP status code when the server answered with a non-200 status.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Network(e) => e.status_code(),
            _ => None,
        }
    }

    /// Returns true if this is a vendor-reported service error.
    #[must_use]
    pub fn is_service_error(&self) -> bool {
        matches!(self, Self::Service(_))
    }

    /// Returns the inner service error, if any.
    #[must_use]
    pub fn as_service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the inner network error, if any.
    #[must_use]
    pub fn as_network_error(&self) -> Option<&NetworkError> {
        match self {
            Self::Network(e) => Some(e),
            _ => None,
        }
    }

    /// Returns a suggested retry delay in milliseconds, if applicable.
    ///
    /// No retries happen inside the SDK; this is a hint for callers that
    /// implement their own policy.
    #[must_use]
    pub fn suggested_retry_delay_ms(&self) -> Option<u64> {
        match self {
            Self::Network(e) => e.suggested_retry_delay_ms(),
            Self::Service(e) => e.suggested_retry_delay_ms(),
            Self::Signing(_) | Self::Config(_) => None,
        }
    }

    /// Returns the error category as a string.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Service(_) => "service",
            Self::Signing(_) => "signing",
            Self::Config(_) => "config",
        }
    }
}

/// A specialized Result type for cloud API operations.
pub type Result<T> = std::result::Result<T, CloudError>;
