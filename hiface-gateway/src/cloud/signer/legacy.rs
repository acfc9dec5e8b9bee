//! Legacy query-string signing.
//!
//! The full parameter set is sorted by key, joined as `k=v&k=v` and prefixed
//! with `METHOD + host + path + "?"`. The HMAC of that string, base64 encoded,
//! is sent back as the `Signature` parameter.

use super::{REQUEST_PATH, SigningContext, hmac_sha256};
use crate::cloud::credential::Credential;
use crate::cloud::params::FlatParams;
use crate::cloud::profile::{HttpMethod, SignatureMethod};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hiface_core::error::SigningError;
use ring::hmac;

/// Parameter carrying the computed signature.
pub const SIGNATURE_PARAM: &str = "Signature";

/// Legacy HMAC signer (HMAC-SHA1 or HMAC-SHA256, base64 output).
#[derive(Debug, Clone, Copy)]
pub struct LegacySigner {
    method: SignatureMethod,
}

/// Output of legacy signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedQuery {
    /// Complete parameter set to send, including `Signature`.
    pub params: FlatParams,
    /// The exact string that was signed.
    pub string_to_sign: String,
    /// Base64 signature.
    pub signature: String,
}

impl LegacySigner {
    /// Creates a signer for `HmacSHA1`.
    #[must_use]
    pub fn hmac_sha1() -> Self {
        Self {
            method: SignatureMethod::HmacSha1,
        }
    }

    /// Creates a signer for `HmacSHA256`.
    #[must_use]
    pub fn hmac_sha256() -> Self {
        Self {
            method: SignatureMethod::HmacSha256,
        }
    }

    /// Returns the legacy signer for `method`, or `None` for TC3.
    #[must_use]
    pub fn for_method(method: SignatureMethod) -> Option<Self> {
        match method {
            SignatureMethod::HmacSha1 => Some(Self::hmac_sha1()),
            SignatureMethod::HmacSha256 => Some(Self::hmac_sha256()),
            SignatureMethod::Tc3HmacSha256 => None,
        }
    }

    /// Returns the signature method this signer produces.
    #[must_use]
    pub fn method(&self) -> SignatureMethod {
        self.method
    }

    /// Injects the common parameters into `params` and signs the result.
    ///
    /// Caller-supplied keys that collide with common parameters are
    /// overwritten; a caller-supplied `Signature` is discarded.
    pub fn sign(
        &self,
        credential: &Credential,
        context: &SigningContext<'_>,
        http_method: HttpMethod,
        nonce: u16,
        mut params: FlatParams,
    ) -> Result<SignedQuery, SigningError> {
        credential.ensure_signable()?;

        params.remove(SIGNATURE_PARAM);
        params.insert("Action".to_string(), context.action.to_string());
        params.insert(
            "RequestClient".to_string(),
            context.request_client.to_string(),
        );
        params.insert("Nonce".to_string(), nonce.to_string());
        params.insert(
            "Timestamp".to_string(),
            context.instant.unix_seconds().to_string(),
        );
        params.insert("Version".to_string(), context.version.to_string());
        params.insert("Language".to_string(), context.language.to_string());
        if !credential.secret_id.is_empty() {
            params.insert("SecretId".to_string(), credential.secret_id.clone());
        }
        if let Some(region) = context.region {
            params.insert("Region".to_string(), region.to_string());
        }
        if let Some(token) = &credential.token {
            params.insert("Token".to_string(), token.clone());
        }
        params.insert(
            "SignatureMethod".to_string(),
            self.method.as_str().to_string(),
        );

        let string_to_sign = string_to_sign(http_method, context.host, REQUEST_PATH, &params);
        let signature = self.sign_string(credential.secret_key(), &string_to_sign)?;
        params.insert(SIGNATURE_PARAM.to_string(), signature.clone());

        Ok(SignedQuery {
            params,
            string_to_sign,
            signature,
        })
    }

    /// HMACs `message` with `secret_key` and base64 encodes the tag.
    ///
    /// SHA-256 goes through the same HMAC as TC3; ring covers SHA-1 only.
    pub fn sign_string(&self, secret_key: &str, message: &str) -> Result<String, SigningError> {
        let key = secret_key.as_bytes();
        let message = message.as_bytes();
        let tag = match self.method {
            SignatureMethod::HmacSha1 => {
                let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, key);
                STANDARD.encode(hmac::sign(&key, message).as_ref())
            }
            SignatureMethod::HmacSha256 | SignatureMethod::Tc3HmacSha256 => {
                STANDARD.encode(hmac_sha256(key, message)?)
            }
        };
        Ok(tag)
    }
}

/// Builds `METHOD + host + path + "?" + k1=v1&k2=v2...`.
///
/// Keys are in byte order (the map's order); values are not URL-encoded.
#[must_use]
pub fn string_to_sign(method: HttpMethod, host: &str, path: &str, params: &FlatParams) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}{host}{path}?{query}", method.as_str())
}
