//! Request signing error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a signed request, before anything is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SigningError {
    /// A credential field required by the signing scheme is empty.
    #[error("[Signing] Missing credential field: {field}")]
    MissingCredential {
        /// Name of the empty field.
        field: String,
    },

    /// The HMAC key could not be initialized.
    #[error("[Signing] Invalid signing key: {reason}")]
    InvalidKey {
        /// Reason reported by the MAC implementation.
        reason: String,
    },

    /// The request body could not be serialized.
    #[error("[Signing] Failed to serialize request body: {reason}")]
    Serialization {
        /// Serializer error message.
        reason: String,
    },

    /// A header name or value cannot be carried over HTTP.
    #[error("[Signing] Invalid header '{name}': {reason}")]
    InvalidHeader {
        /// Header name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A request parameter fails a client-side check.
    #[error("[Signing] Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name as sent on the wire.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}
