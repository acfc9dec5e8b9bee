//! Cloud API client: signs one request per call and dispatches it.

use super::clock::{Clock, NonceSource, SigningInstant, SystemClock, SystemNonce};
use super::credential::Credential;
use super::envelope::parse_envelope;
use super::params::flatten;
use super::profile::{ClientProfile, HttpMethod, SignatureMethod};
use super::signer::{LegacySigner, REQUEST_PATH, SigningContext, Tc3Signer, service_of};
use super::transport::{HttpRequest, HttpTransport, RequestBody, ReqwestTransport};
use hiface_core::config::Validatable;
use hiface_core::error::{CloudError, NetworkError, Result, SigningError};
use hiface_telemetry::masking::SensitiveDataMasker;
use hiface_telemetry::spans::api_call_span;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{Instrument, debug, trace, warn};

/// Default SDK identifier reported with every request.
pub const DEFAULT_REQUEST_CLIENT: &str = concat!("SDK_RUST_", env!("CARGO_PKG_VERSION"));

/// A signed request and the values it was derived from.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// Scheme that signed the request.
    pub sign_method: SignatureMethod,
    /// Request handed to the transport.
    pub request: HttpRequest,
    /// TC3 canonical request; `None` for legacy signing.
    pub canonical_request: Option<String>,
    /// The exact string that was signed.
    pub string_to_sign: String,
    /// Final signature (base64 for legacy, hex for TC3).
    pub signature: String,
    /// Unix timestamp the request was signed at.
    pub timestamp: i64,
}

/// Client for one vendor service endpoint.
///
/// # Example
///
/// ```ignore
/// use hiface_gateway::cloud::{ClientProfile, CloudClient, Credential};
/// use serde_json::json;
///
/// let client = CloudClient::new(
///     "cvm.tencentcloudapi.com",
///     "2017-03-12",
///     Credential::from_env()?,
///     Some("ap-guangzhou".to_string()),
///     ClientProfile::default(),
/// )?;
/// let response = client.request("DescribeInstances", &json!({"Limit": 10})).await?;
/// ```
pub struct CloudClient {
    endpoint: String,
    api_version: String,
    credential: Credential,
    region: Option<String>,
    profile: ClientProfile,
    request_client: String,
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
    nonce_source: Arc<dyn NonceSource>,
    masker: SensitiveDataMasker,
}

impl fmt::Debug for CloudClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudClient")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("credential", &self.credential)
            .field("region", &self.region)
            .field("profile", &self.profile)
            .field("request_client", &self.request_client)
            .finish_non_exhaustive()
    }
}

impl CloudClient {
    /// Creates a client using the system clock, OS nonces and a `reqwest` transport.
    pub fn new(
        endpoint: impl Into<String>,
        api_version: impl Into<String>,
        credential: Credential,
        region: Option<String>,
        profile: ClientProfile,
    ) -> Result<Self> {
        profile.validate()?;
        Ok(Self {
            endpoint: endpoint.into(),
            api_version: api_version.into(),
            credential,
            region: region.filter(|r| !r.is_empty()),
            profile,
            request_client: DEFAULT_REQUEST_CLIENT.to_string(),
            transport: Arc::new(ReqwestTransport::new()?),
            clock: Arc::new(SystemClock),
            nonce_source: Arc::new(SystemNonce::new()),
            masker: SensitiveDataMasker::new(),
        })
    }

    /// Replaces the HTTP transport.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the nonce source.
    #[must_use]
    pub fn with_nonce_source(mut self, nonce_source: Arc<dyn NonceSource>) -> Self {
        self.nonce_source = nonce_source;
        self
    }

    /// Overrides the SDK identifier sent as `RequestClient`.
    #[must_use]
    pub fn with_request_client(mut self, request_client: impl Into<String>) -> Self {
        self.request_client = request_client.into();
        self
    }

    /// Effective host: the profile override, else the service endpoint.
    ///
    /// Trimmed, so the URL, the `Host` header and the credential scope agree.
    #[must_use]
    pub fn host(&self) -> &str {
        self.profile
            .http_profile
            .endpoint
            .as_deref()
            .unwrap_or(&self.endpoint)
            .trim()
    }

    /// Service name derived from the host.
    #[must_use]
    pub fn service(&self) -> &str {
        service_of(self.host())
    }

    /// API version sent with every request.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Configured region.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Client profile.
    #[must_use]
    pub fn profile(&self) -> &ClientProfile {
        &self.profile
    }

    /// Signs a request without sending it.
    pub fn prepare(&self, action: &str, params: &Value) -> Result<PreparedRequest> {
        let instant = SigningInstant::capture(self.clock.as_ref());
        let host = self.host();
        let context = SigningContext {
            action,
            version: &self.api_version,
            region: self.region.as_deref(),
            language: &self.profile.language,
            request_client: &self.request_client,
            host,
            instant,
        };
        let url = format!("{}{host}{REQUEST_PATH}", self.profile.http_profile.protocol);
        let timeout = self.profile.http_profile.timeout();
        let sign_method = self.profile.sign_method;

        if let Some(signer) = LegacySigner::for_method(sign_method) {
            let http_method = self.profile.http_profile.req_method;
            let signed = signer.sign(
                &self.credential,
                &context,
                http_method,
                self.nonce_source.nonce(),
                flatten(params),
            )?;
            let body = match http_method {
                HttpMethod::Get => RequestBody::Query(signed.params),
                HttpMethod::Post => RequestBody::Form(signed.params),
            };
            return Ok(PreparedRequest {
                sign_method,
                request: HttpRequest {
                    method: http_method,
                    url,
                    headers: Vec::new(),
                    body,
                    timeout,
                },
                canonical_request: None,
                string_to_sign: signed.string_to_sign,
                signature: signed.signature,
                timestamp: instant.unix_seconds(),
            });
        }

        let payload = json_body(params)?;
        let signed = Tc3Signer::new().sign(&self.credential, &context, &payload)?;
        Ok(PreparedRequest {
            sign_method,
            canonical_request: Some(signed.canonical_request.clone()),
            string_to_sign: signed.string_to_sign.clone(),
            signature: signed.signature.clone(),
            timestamp: instant.unix_seconds(),
            request: HttpRequest {
                method: HttpMethod::Post,
                url,
                headers: signed.into_pairs(),
                body: RequestBody::Json(payload),
                timeout,
            },
        })
    }

    /// Calls `action` and returns the `Response` payload.
    ///
    /// Exactly one HTTP attempt is made.
    pub async fn request(&self, action: &str, params: &Value) -> Result<Value> {
        let span = api_call_span(action, self.service(), self.region());
        async {
            let result = self.dispatch(action, params).await;
            if let Err(e) = &result {
                warn!(
                    action = %action,
                    category = e.category(),
                    http_status = e.http_status(),
                    error = %self.masker.mask_string(&e.to_string()),
                    "Cloud API call failed"
                );
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Typed variant of [`request`](Self::request).
    pub async fn request_as<Req, Resp>(&self, action: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let params = serde_json::to_value(request).map_err(|e| SigningError::Serialization {
            reason: e.to_string(),
        })?;
        let response = self.request(action, &params).await?;
        serde_json::from_value(response).map_err(|e| {
            CloudError::from(NetworkError::InvalidResponse {
                reason: format!("Failed to decode {action} response: {e}"),
            })
        })
    }

    async fn dispatch(&self, action: &str, params: &Value) -> Result<Value> {
        let prepared = self.prepare(action, params)?;

        debug!(
            action = %action,
            host = %self.host(),
            scheme = %prepared.sign_method,
            method = prepared.request.method.as_str(),
            timestamp = prepared.timestamp,
            "Dispatching request"
        );
        if let Some(authorization) = prepared
            .request
            .headers
            .iter()
            .find(|(k, _)| k == "Authorization")
            .map(|(_, v)| v)
        {
            trace!(authorization = %self.masker.mask_string(authorization), "Signed headers");
        }

        let response = self.transport.send(prepared.request).await?;
        debug!(status = response.status, "Received response");
        parse_envelope(response.status, &response.body)
    }
}

/// Serializes the unflattened parameters; `null` sends an empty object.
fn json_body(params: &Value) -> std::result::Result<String, SigningError> {
    let body = if params.is_null() {
        Ok("{}".to_string())
    } else {
        serde_json::to_string(params)
    };
    body.map_err(|e| SigningError::Serialization {
        reason: e.to_string(),
    })
}
