//! Client profile: signing scheme and HTTP settings.

use hiface_core::config::{Configurable, EnvOverride, Validatable};
use hiface_core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Request signing method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignatureMethod {
    /// Legacy query-string signing with HMAC-SHA1.
    #[serde(rename = "HmacSHA1")]
    HmacSha1,
    /// Legacy query-string signing with HMAC-SHA256.
    #[default]
    #[serde(rename = "HmacSHA256")]
    HmacSha256,
    /// Canonical-request signing with the TC3 HMAC-SHA256 derivation chain.
    #[serde(rename = "TC3-HMAC-SHA256")]
    Tc3HmacSha256,
}

impl SignatureMethod {
    /// Returns the vendor's wire name for this method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HmacSha1 => "HmacSHA1",
            Self::HmacSha256 => "HmacSHA256",
            Self::Tc3HmacSha256 => "TC3-HMAC-SHA256",
        }
    }

    /// Returns true for the TC3 canonical-request scheme.
    #[must_use]
    pub const fn is_tc3(&self) -> bool {
        matches!(self, Self::Tc3HmacSha256)
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HmacSHA1" => Ok(Self::HmacSha1),
            "HmacSHA256" => Ok(Self::HmacSha256),
            "TC3-HMAC-SHA256" => Ok(Self::Tc3HmacSha256),
            other => Err(ConfigError::invalid_value(
                "sign_method",
                format!("unknown signature method '{other}'"),
            )),
        }
    }
}

/// HTTP method used by the legacy scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Parameters travel in the query string.
    Get,
    /// Parameters travel in the body.
    #[default]
    Post,
}

impl HttpMethod {
    /// Returns the upper-case method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            other => Err(ConfigError::invalid_value(
                "req_method",
                format!("unsupported method '{other}'"),
            )),
        }
    }
}

/// HTTP-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpProfile {
    /// Method for legacy-signed requests. TC3 requests are always `POST`.
    #[serde(default)]
    pub req_method: HttpMethod,

    /// URL scheme prefix, `https://` or `http://`.
    #[serde(default = "default_protocol")]
    pub protocol: String,

    /// Host override; when unset the client's service endpoint is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_req_timeout_secs")]
    pub req_timeout_secs: u64,
}

fn default_protocol() -> String {
    "https://".to_string()
}

fn default_req_timeout_secs() -> u64 {
    60
}

impl Default for HttpProfile {
    fn default() -> Self {
        Self {
            req_method: HttpMethod::default(),
            protocol: default_protocol(),
            endpoint: None,
            req_timeout_secs: default_req_timeout_secs(),
        }
    }
}

impl HttpProfile {
    /// Returns the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.req_timeout_secs)
    }
}

/// Read-only per-client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    /// Signing scheme applied to every request.
    #[serde(default)]
    pub sign_method: SignatureMethod,

    /// HTTP settings.
    #[serde(default)]
    pub http_profile: HttpProfile,

    /// Language tag for vendor messages.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en-US".to_string()
}

impl Default for ClientProfile {
    fn default() -> Self {
        Self {
            sign_method: SignatureMethod::default(),
            http_profile: HttpProfile::default(),
            language: default_language(),
        }
    }
}

impl ClientProfile {
    /// Creates a new builder for `ClientProfile`.
    #[must_use]
    pub fn builder() -> ClientProfileBuilder {
        ClientProfileBuilder::default()
    }
}

impl Validatable for ClientProfile {
    fn validate(&self) -> Result<(), ConfigError> {
        let http = &self.http_profile;
        if http.protocol != "https://" && http.protocol != "http://" {
            return Err(ConfigError::invalid_value(
                "http_profile.protocol",
                format!("expected https:// or http://, got '{}'", http.protocol),
            ));
        }
        if http.req_timeout_secs == 0 {
            return Err(ConfigError::invalid_value(
                "http_profile.req_timeout_secs",
                "timeout must be positive",
            ));
        }
        if let Some(endpoint) = &http.endpoint
            && endpoint.trim().is_empty()
        {
            return Err(ConfigError::invalid_value(
                "http_profile.endpoint",
                "endpoint override must not be empty",
            ));
        }
        if self.language.is_empty() {
            return Err(ConfigError::missing_field("language"));
        }
        Ok(())
    }
}

impl Configurable for ClientProfile {
    fn apply_env_overrides(&mut self, prefix: &str) {
        EnvOverride::apply_parsed(&format!("{prefix}_SIGN_METHOD"), &mut self.sign_method);
        EnvOverride::apply_parsed(
            &format!("{prefix}_REQ_METHOD"),
            &mut self.http_profile.req_method,
        );
        EnvOverride::apply_optional_string(
            &format!("{prefix}_ENDPOINT"),
            &mut self.http_profile.endpoint,
        );
        EnvOverride::apply_parsed(
            &format!("{prefix}_REQ_TIMEOUT"),
            &mut self.http_profile.req_timeout_secs,
        );
        EnvOverride::apply_string(&format!("{prefix}_LANGUAGE"), &mut self.language);
    }

    fn env_var_names(prefix: &str) -> Vec<String> {
        ["SIGN_METHOD", "REQ_METHOD", "ENDPOINT", "REQ_TIMEOUT", "LANGUAGE"]
            .iter()
            .map(|name| format!("{prefix}_{name}"))
            .collect()
    }
}

/// Builder for `ClientProfile`.
#[derive(Debug, Default)]
pub struct ClientProfileBuilder {
    sign_method: Option<SignatureMethod>,
    req_method: Option<HttpMethod>,
    protocol: Option<String>,
    endpoint: Option<String>,
    req_timeout_secs: Option<u64>,
    language: Option<String>,
}

impl ClientProfileBuilder {
    /// Sets the signature method.
    #[must_use]
    pub fn sign_method(mut self, method: SignatureMethod) -> Self {
        self.sign_method = Some(method);
        self
    }

    /// Sets the HTTP method for legacy-signed requests.
    #[must_use]
    pub fn req_method(mut self, method: HttpMethod) -> Self {
        self.req_method = Some(method);
        self
    }

    /// Sets the URL scheme prefix.
    #[must_use]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Overrides the target host.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.req_timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Sets the language tag.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builds the `ClientProfile`.
    #[must_use]
    pub fn build(self) -> ClientProfile {
        ClientProfile {
            sign_method: self.sign_method.unwrap_or_default(),
            http_profile: HttpProfile {
                req_method: self.req_method.unwrap_or_default(),
                protocol: self.protocol.unwrap_or_else(default_protocol),
                endpoint: self.endpoint,
                req_timeout_secs: self
                    .req_timeout_secs
                    .unwrap_or_else(default_req_timeout_secs),
            },
            language: self.language.unwrap_or_else(default_language),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults() {
        let profile = ClientProfile::default();
        assert_eq!(profile.sign_method, SignatureMethod::HmacSha256);
        assert_eq!(profile.http_profile.req_method, HttpMethod::Post);
        assert_eq!(profile.http_profile.protocol, "https://");
        assert_eq!(profile.http_profile.timeout(), Duration::from_secs(60));
        assert_eq!(profile.language, "en-US");
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_profile_builder() {
        let profile = ClientProfile::builder()
            .sign_method(SignatureMethod::Tc3HmacSha256)
            .req_method(HttpMethod::Get)
            .endpoint("cvm.ap-shanghai.tencentcloudapi.com")
            .timeout(Duration::from_secs(15))
            .build();

        assert!(profile.sign_method.is_tc3());
        assert_eq!(profile.http_profile.req_method, HttpMethod::Get);
        assert_eq!(
            profile.http_profile.endpoint.as_deref(),
            Some("cvm.ap-shanghai.tencentcloudapi.com")
        );
        assert_eq!(profile.http_profile.req_timeout_secs, 15);
    }

    #[test]
    fn test_validation() {
        let profile = ClientProfile::builder().protocol("ftp://").build();
        assert!(profile.validate().is_err());

        let profile = ClientProfile::builder().timeout(Duration::ZERO).build();
        assert!(profile.validate().is_err());

        let profile = ClientProfile::builder().endpoint("  ").build();
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_signature_method_wire_names() {
        for method in [
            SignatureMethod::HmacSha1,
            SignatureMethod::HmacSha256,
            SignatureMethod::Tc3HmacSha256,
        ] {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.as_str()));
            assert_eq!(method.as_str().parse::<SignatureMethod>().unwrap(), method);
        }
        assert!("HMAC-MD5".parse::<SignatureMethod>().is_err());
    }

    #[test]
    fn test_profile_serde_with_defaults() {
        let profile: ClientProfile =
            serde_json::from_str(r#"{"sign_method": "TC3-HMAC-SHA256", "http_profile": {"req_method": "GET"}}"#)
                .unwrap();
        assert!(profile.sign_method.is_tc3());
        assert_eq!(profile.http_profile.req_method, HttpMethod::Get);
        assert_eq!(profile.http_profile.req_timeout_secs, 60);
        assert_eq!(profile.language, "en-US");
    }

    #[test]
    fn test_env_overrides() {
        let prefix = "HIFACE_PROFILE_TEST";
        // SAFETY: the variables use a prefix no other test reads.
        unsafe {
            std::env::set_var(format!("{prefix}_SIGN_METHOD"), "TC3-HMAC-SHA256");
            std::env::set_var(format!("{prefix}_REQ_TIMEOUT"), "5");
            std::env::set_var(format!("{prefix}_ENDPOINT"), "iai.ap-shanghai.tencentcloudapi.com");
        }

        let mut profile = ClientProfile::default();
        profile.apply_env_overrides(prefix);
        assert!(profile.sign_method.is_tc3());
        assert_eq!(profile.http_profile.req_timeout_secs, 5);
        assert_eq!(
            profile.http_profile.endpoint.as_deref(),
            Some("iai.ap-shanghai.tencentcloudapi.com")
        );
        assert_eq!(profile.http_profile.req_method, HttpMethod::Post);
        assert_eq!(ClientProfile::env_var_names(prefix).len(), 5);
    }
}
