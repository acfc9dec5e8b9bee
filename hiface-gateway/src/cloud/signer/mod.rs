//! Request signing schemes.
//!
//! Every request is authenticated by exactly one scheme, chosen from the
//! client profile:
//! - [`LegacySigner`]: flat parameters plus a `Signature` field (HMAC-SHA1/SHA256, base64)
//! - [`Tc3Signer`]: canonical-request HMAC chain carried in an `Authorization` header

pub mod legacy;
pub mod tc3;

pub use legacy::{LegacySigner, SignedQuery};
pub use tc3::{
    SignedHeaders, Tc3Signer, canonical_request, derive_signing_key, sha256_hex, string_to_sign,
};

use super::clock::SigningInstant;
use hiface_core::error::SigningError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Request path signed and sent by both schemes.
pub const REQUEST_PATH: &str = "/";

/// Per-request values shared by both signing schemes.
///
/// Built once per call; every timestamp-derived field comes from `instant`.
#[derive(Debug, Clone, Copy)]
pub struct SigningContext<'a> {
    /// API action name, e.g. `DescribeInstances`.
    pub action: &'a str,
    /// API version, e.g. `2017-03-12`.
    pub version: &'a str,
    /// Target region, omitted from the request when `None`.
    pub region: Option<&'a str>,
    /// Language tag for vendor messages.
    pub language: &'a str,
    /// SDK identifier reported to the vendor.
    pub request_client: &'a str,
    /// Effective target host.
    pub host: &'a str,
    /// The single captured signing instant.
    pub instant: SigningInstant,
}

impl SigningContext<'_> {
    /// Service name: the first dot-separated label of the host.
    #[must_use]
    pub fn service(&self) -> &str {
        service_of(self.host)
    }
}

/// Returns the first dot-separated label of `host`.
#[must_use]
pub fn service_of(host: &str) -> &str {
    host.split('.').next().unwrap_or(host)
}

/// Raw HMAC-SHA256 tag of `message` under `key`, shared by both schemes.
pub(crate) fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<[u8; 32], SigningError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| SigningError::InvalidKey {
        reason: format!("Failed to create HMAC: {e}"),
    })?;
    mac.update(message);
    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}
