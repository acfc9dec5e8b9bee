//! TC3-HMAC-SHA256 canonical-request signing.

use super::{REQUEST_PATH, SigningContext, hmac_sha256};
use crate::cloud::credential::Credential;
use hiface_core::error::SigningError;
use sha2::{Digest, Sha256};

/// Algorithm name, also the `Authorization` scheme prefix.
pub const ALGORITHM: &str = "TC3-HMAC-SHA256";
/// Content type of every TC3 request body.
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";
/// Headers covered by the signature, in canonical order.
pub const SIGNED_HEADERS: &str = "content-type;host";
const TERMINATOR: &str = "tc3_request";

/// Output of TC3 signing: the header set plus intermediate values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    headers: Vec<(&'static str, String)>,
    /// The canonical request that was hashed.
    pub canonical_request: String,
    /// The string that was signed.
    pub string_to_sign: String,
    /// Hex signature.
    pub signature: String,
}

impl SignedHeaders {
    /// Looks up a header by name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The `Authorization` header value.
    #[must_use]
    pub fn authorization(&self) -> &str {
        self.get("Authorization").unwrap_or_default()
    }

    /// Iterates headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.headers.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Consumes the set into owned pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.headers
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

/// TC3-HMAC-SHA256 signer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tc3Signer;

impl Tc3Signer {
    /// Creates a new signer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Signs `payload`, the exact JSON body that will be sent.
    pub fn sign(
        &self,
        credential: &Credential,
        context: &SigningContext<'_>,
        payload: &str,
    ) -> Result<SignedHeaders, SigningError> {
        credential.ensure_signable()?;

        let timestamp = context.instant.unix_seconds();
        let date = context.instant.date();
        let service = context.service();
        let scope = format!("{date}/{service}/{TERMINATOR}");

        let canonical = canonical_request(CONTENT_TYPE, context.host, &sha256_hex(payload));
        let to_sign = string_to_sign(timestamp, &scope, &sha256_hex(&canonical));
        let key = derive_signing_key(credential.secret_key(), &date, service)?;
        let signature = hex::encode(hmac_sha256(&key, to_sign.as_bytes())?);

        let authorization = format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            credential.secret_id
        );

        let mut headers = vec![
            ("Authorization", authorization),
            ("Content-Type", CONTENT_TYPE.to_string()),
            ("Host", context.host.trim().to_string()),
            ("X-TC-Action", context.action.to_string()),
            ("X-TC-RequestClient", context.request_client.to_string()),
            ("X-TC-Timestamp", timestamp.to_string()),
            ("X-TC-Version", context.version.to_string()),
            ("X-TC-Language", context.language.to_string()),
        ];
        if let Some(region) = context.region {
            headers.push(("X-TC-Region", region.to_string()));
        }
        if let Some(token) = &credential.token {
            headers.push(("X-TC-Token", token.clone()));
        }
        for (name, value) in &headers {
            check_header_value(name, value)?;
        }

        Ok(SignedHeaders {
            headers,
            canonical_request: canonical,
            string_to_sign: to_sign,
            signature,
        })
    }
}

/// Builds the canonical request for a `POST /` with an empty query.
///
/// Header values are trimmed; their case is kept.
#[must_use]
pub fn canonical_request(content_type: &str, host: &str, payload_hash: &str) -> String {
    format!(
        "POST\n{REQUEST_PATH}\n\ncontent-type:{}\nhost:{}\n\n{SIGNED_HEADERS}\n{payload_hash}",
        content_type.trim(),
        host.trim()
    )
}

/// Builds `TC3-HMAC-SHA256\n<timestamp>\n<scope>\n<digest>`.
#[must_use]
pub fn string_to_sign(timestamp: i64, credential_scope: &str, canonical_digest: &str) -> String {
    format!("{ALGORITHM}\n{timestamp}\n{credential_scope}\n{canonical_digest}")
}

/// Derives the signing key: date, then service, then `tc3_request`.
pub fn derive_signing_key(
    secret_key: &str,
    date: &str,
    service: &str,
) -> Result<[u8; 32], SigningError> {
    let secret_date = hmac_sha256(format!("TC3{secret_key}").as_bytes(), date.as_bytes())?;
    let secret_service = hmac_sha256(&secret_date, service.as_bytes())?;
    hmac_sha256(&secret_service, TERMINATOR.as_bytes())
}

/// Lower-case hex SHA-256 of `data`.
#[must_use]
pub fn sha256_hex(data: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(data.as_ref()))
}

fn check_header_value(name: &str, value: &str) -> Result<(), SigningError> {
    if let Some(c) = value.chars().find(|c| c.is_control() && *c != '\t') {
        return Err(SigningError::InvalidHeader {
            name: name.to_string(),
            reason: format!("control character {c:?} in value"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::clock::{FixedClock, SigningInstant};

    const SECRET_ID: &str = "AKIDz8krbsJ5yKBZQpn74WFkmLPx3EXAMPLE";
    const SECRET_KEY: &str = "Gu5t9xGARNpq86cd98joQYCN3EXAMPLE";
    const PAYLOAD: &str = r#"{"Limit":10}"#;
    const EXPECTED_AUTHORIZATION: &str = "TC3-HMAC-SHA256 \
        Credential=AKIDz8krbsJ5yKBZQpn74WFkmLPx3EXAMPLE/2019-02-25/cvm/tc3_request, \
        SignedHeaders=content-type;host, \
        Signature=c311bcb3ab633bf7bf22bd40d3acc1c6e638c75b5de87ef1227962c5d14d799a";

    fn context() -> SigningContext<'static> {
        SigningContext {
            action: "DescribeInstances",
            version: "2017-03-12",
            region: Some("ap-guangzhou"),
            language: "en-US",
            request_client: "SDK_RUST_TEST",
            host: "cvm.tencentcloudapi.com",
            instant: SigningInstant::capture(&FixedClock::from_unix_seconds(1_551_113_065)),
        }
    }

    fn credential() -> Credential {
        Credential::new(SECRET_ID, SECRET_KEY)
    }

    #[test]
    fn test_golden_authorization() {
        let signed = Tc3Signer::new()
            .sign(&credential(), &context(), PAYLOAD)
            .unwrap();

        assert_eq!(
            signed.canonical_request,
            "POST\n/\n\ncontent-type:application/json; charset=utf-8\n\
             host:cvm.tencentcloudapi.com\n\ncontent-type;host\n\
             7323ae808f32f1a67f80c52911966937e5b960c236a8de953aec7c984492feb0"
        );
        assert_eq!(
            signed.string_to_sign,
            "TC3-HMAC-SHA256\n1551113065\n2019-02-25/cvm/tc3_request\n\
             c4853a41ab653c6beb6228ce40bc0e3aeeaa605adefffeb2f8532afdb471cba1"
        );
        assert_eq!(
            signed.signature,
            "c311bcb3ab633bf7bf22bd40d3acc1c6e638c75b5de87ef1227962c5d14d799a"
        );
        assert_eq!(signed.authorization(), EXPECTED_AUTHORIZATION);
    }

    #[test]
    fn test_header_set() {
        let signed = Tc3Signer::new()
            .sign(&credential(), &context(), PAYLOAD)
            .unwrap();

        assert_eq!(signed.get("host"), Some("cvm.tencentcloudapi.com"));
        assert_eq!(signed.get("Content-Type"), Some(CONTENT_TYPE));
        assert_eq!(signed.get("X-TC-Action"), Some("DescribeInstances"));
        assert_eq!(signed.get("X-TC-Timestamp"), Some("1551113065"));
        assert_eq!(signed.get("X-TC-Version"), Some("2017-03-12"));
        assert_eq!(signed.get("X-TC-Region"), Some("ap-guangzhou"));
        assert_eq!(signed.get("X-TC-RequestClient"), Some("SDK_RUST_TEST"));
        assert_eq!(signed.get("X-TC-Language"), Some("en-US"));
        assert_eq!(signed.get("X-TC-Token"), None);
    }

    #[test]
    fn test_optional_headers() {
        let mut ctx = context();
        ctx.region = None;
        let credential = credential().with_token("session-token");

        let signed = Tc3Signer::new().sign(&credential, &ctx, PAYLOAD).unwrap();
        assert_eq!(signed.get("X-TC-Region"), None);
        assert_eq!(signed.get("X-TC-Token"), Some("session-token"));
        // Neither header is signed.
        assert_eq!(
            signed.signature,
            "c311bcb3ab633bf7bf22bd40d3acc1c6e638c75b5de87ef1227962c5d14d799a"
        );
    }

    #[test]
    fn test_signing_is_deterministic() {
        let signer = Tc3Signer::new();
        let first = signer.sign(&credential(), &context(), PAYLOAD).unwrap();
        let second = signer.sign(&credential(), &context(), PAYLOAD).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_payload_change_changes_signature() {
        let signer = Tc3Signer::new();
        let base = signer.sign(&credential(), &context(), PAYLOAD).unwrap();
        let other = signer
            .sign(&credential(), &context(), r#"{"Limit":11}"#)
            .unwrap();
        assert_ne!(base.signature, other.signature);
    }

    #[test]
    fn test_derivation_order_matters() {
        let key = derive_signing_key(SECRET_KEY, "2019-02-25", "cvm").unwrap();
        assert_eq!(
            hex::encode(key),
            "ac658d5dde49e9bfdd14e04e062f66b05d9f637d44b8a8d845327d4a77f666b1"
        );

        let secret_service = hmac_sha256(format!("TC3{SECRET_KEY}").as_bytes(), b"cvm").unwrap();
        let secret_date = hmac_sha256(&secret_service, b"2019-02-25").unwrap();
        let swapped = hmac_sha256(&secret_date, b"tc3_request").unwrap();
        assert_eq!(
            hex::encode(swapped),
            "44a4cd6e0921d436c25bda59ec617e08661985d433ece30a63599b5a69eeac07"
        );
        assert_ne!(key, swapped);
    }

    #[test]
    fn test_canonical_request_trims_but_keeps_case() {
        let hash = sha256_hex("");
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        let plain = canonical_request(CONTENT_TYPE, "cvm.tencentcloudapi.com", &hash);
        let padded = canonical_request(
            &format!("  {CONTENT_TYPE}\t"),
            " cvm.tencentcloudapi.com  ",
            &hash,
        );
        assert_eq!(plain, padded);

        let upper = canonical_request(CONTENT_TYPE, "CVM.tencentcloudapi.com", &hash);
        assert_ne!(plain, upper);
    }

    #[test]
    fn test_host_casing_changes_signature() {
        let mut ctx = context();
        ctx.host = "CVM.tencentcloudapi.com";
        let upper = Tc3Signer::new().sign(&credential(), &ctx, PAYLOAD).unwrap();
        assert_ne!(
            upper.signature,
            "c311bcb3ab633bf7bf22bd40d3acc1c6e638c75b5de87ef1227962c5d14d799a"
        );
    }

    #[test]
    fn test_rejects_control_characters_in_headers() {
        let credential = credential().with_token("bad\r\ntoken");
        let result = Tc3Signer::new().sign(&credential, &context(), PAYLOAD);
        assert!(matches!(
            result,
            Err(SigningError::InvalidHeader { name, .. }) if name == "X-TC-Token"
        ));
    }

    #[test]
    fn test_missing_secret_key() {
        let result = Tc3Signer::new().sign(&Credential::new(SECRET_ID, ""), &context(), PAYLOAD);
        assert!(matches!(result, Err(SigningError::MissingCredential { .. })));
    }
}
