//! CLI configuration file.

use std::path::Path;

use anyhow::{Context, Result};
use hiface_core::config::{ConfigLoader, Configurable, EnvOverride, Validatable};
use hiface_core::error::ConfigError;
use hiface_gateway::cloud::ClientProfile;
use hiface_gateway::iai;
use hiface_telemetry::logging::LogConfig;
use serde::{Deserialize, Serialize};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "HIFACE";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Target service and client profile.
    #[serde(default)]
    pub cloud: CloudSettings,

    /// Logging setup.
    #[serde(default)]
    pub logging: LogConfig,
}

/// Target service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudSettings {
    /// Service endpoint host.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API version.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Region; omitted from requests when unset.
    #[serde(default)]
    pub region: Option<String>,

    /// Signing and HTTP profile.
    #[serde(default)]
    pub profile: ClientProfile,
}

fn default_endpoint() -> String {
    iai::ENDPOINT.to_string()
}

fn default_api_version() -> String {
    iai::API_VERSION.to_string()
}

impl Default for CloudSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_version: default_api_version(),
            region: None,
            profile: ClientProfile::default(),
        }
    }
}

impl Configurable for AppConfig {
    fn apply_env_overrides(&mut self, prefix: &str) {
        EnvOverride::apply_optional_string(&format!("{prefix}_REGION"), &mut self.cloud.region);
        EnvOverride::apply_string(
            &format!("{prefix}_API_VERSION"),
            &mut self.cloud.api_version,
        );
        self.cloud.profile.apply_env_overrides(prefix);
        self.logging.apply_env_overrides(prefix);
    }

    fn env_var_names(prefix: &str) -> Vec<String> {
        let mut names = vec![format!("{prefix}_REGION"), format!("{prefix}_API_VERSION")];
        names.extend(ClientProfile::env_var_names(prefix));
        names.extend(LogConfig::env_var_names(prefix));
        names
    }
}

impl Validatable for AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.cloud.endpoint.trim().is_empty() {
            return Err(ConfigError::missing_field_in_section("endpoint", "cloud"));
        }
        if self.cloud.api_version.trim().is_empty() {
            return Err(ConfigError::missing_field_in_section("api_version", "cloud"));
        }
        self.cloud.profile.validate()?;
        self.logging.validate()
    }
}

/// Loads `path` when it exists, otherwise starts from defaults; env overrides
/// and validation apply either way.
pub fn load(path: &Path) -> Result<AppConfig> {
    let loader = ConfigLoader::new().with_env_prefix(ENV_PREFIX);
    let config: AppConfig = if path.exists() {
        loader
            .load_configured(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
    } else {
        loader
            .finish(AppConfig::default())
            .context("Invalid default configuration")?
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiface_gateway::cloud::SignatureMethod;
    use std::io::Write;

    #[test]
    fn test_defaults_target_face_service() {
        let config = AppConfig::default();
        assert_eq!(config.cloud.endpoint, "iai.tencentcloudapi.com");
        assert_eq!(config.cloud.api_version, "2020-03-03");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(
            file,
            "cloud:\n  endpoint: cvm.tencentcloudapi.com\n  api_version: 2017-03-12\n  region: ap-guangzhou\n  profile:\n    sign_method: TC3-HMAC-SHA256\nlogging:\n  level: debug\n  format: pretty\n"
        )
        .unwrap();

        let config = load(file.path()).unwrap();
        assert_eq!(config.cloud.endpoint, "cvm.tencentcloudapi.com");
        assert_eq!(config.cloud.region.as_deref(), Some("ap-guangzhou"));
        assert_eq!(config.cloud.profile.sign_method, SignatureMethod::Tc3HmacSha256);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load(Path::new("definitely-missing-hiface.yaml")).unwrap();
        assert_eq!(config.cloud.endpoint, iai::ENDPOINT);
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"cloud": {{"profile": {{"http_profile": {{"protocol": "ftp://"}}}}}}}}"#)
            .unwrap();
        assert!(load(file.path()).is_err());
    }

    #[test]
    fn test_env_var_names() {
        let names = AppConfig::env_var_names(ENV_PREFIX);
        assert!(names.contains(&"HIFACE_REGION".to_string()));
        assert!(names.contains(&"HIFACE_SIGN_METHOD".to_string()));
        assert!(names.contains(&"HIFACE_LOG_LEVEL".to_string()));
    }
}
