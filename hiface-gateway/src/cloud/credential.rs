//! API credentials.

use hiface_core::config::Validatable;
use hiface_core::error::{ConfigError, SigningError};
use hiface_telemetry::masking::SensitiveDataMasker;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable holding the secret identifier.
pub const ENV_SECRET_ID: &str = "TENCENTCLOUD_SECRET_ID";
/// Environment variable holding the secret key.
pub const ENV_SECRET_KEY: &str = "TENCENTCLOUD_SECRET_KEY";
/// Environment variable holding an optional temporary session token.
pub const ENV_SESSION_TOKEN: &str = "TENCENTCLOUD_SESSION_TOKEN";

/// Credentials used to sign cloud API requests.
///
/// The secret key is skipped during serialization and masked in `Debug`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
    /// Secret identifier (`AKID...`), sent in clear with every request.
    pub secret_id: String,

    /// Secret key used as HMAC input; never leaves the process.
    #[serde(skip_serializing, default)]
    secret_key: String,

    /// Temporary session token issued alongside short-lived keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Credential {
    /// Creates credentials from a secret identifier and key.
    #[must_use]
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            token: None,
        }
    }

    /// Attaches a temporary session token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Reads credentials from `TENCENTCLOUD_SECRET_ID`, `TENCENTCLOUD_SECRET_KEY`
    /// and the optional `TENCENTCLOUD_SESSION_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar {
                    name: name.to_string(),
                })
        };
        let mut credential = Self::new(read(ENV_SECRET_ID)?, read(ENV_SECRET_KEY)?);
        credential.token = std::env::var(ENV_SESSION_TOKEN)
            .ok()
            .filter(|v| !v.is_empty());
        Ok(credential)
    }

    /// Returns the secret key.
    ///
    /// Only signers should call this; the value must never be logged.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Checks that the fields a signature needs are present.
    pub(crate) fn ensure_signable(&self) -> Result<(), SigningError> {
        if self.secret_key.is_empty() {
            return Err(SigningError::MissingCredential {
                field: "secret_key".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masker = SensitiveDataMasker::new();
        f.debug_struct("Credential")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &masker.mask_value(&self.secret_key))
            .field("token", &self.token.as_deref().map(|t| masker.mask_value(t)))
            .finish()
    }
}

impl Validatable for Credential {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.secret_id.is_empty() {
            return Err(ConfigError::missing_field_in_section("secret_id", "credential"));
        }
        if self.secret_key.is_empty() {
            return Err(ConfigError::missing_field_in_section("secret_key", "credential"));
        }
        Ok(())
    }
}
