//! Logging configuration types.

use hiface_core::config::{Configurable, EnvOverride, Validatable};
use hiface_core::error::ConfigError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Configuration for the logging system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive (e.g., "info", "hiface_gateway=debug")
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,

    /// Output targets
    #[serde(default = "default_outputs")]
    pub outputs: Vec<LogOutput>,

    /// Include thread IDs in log output
    #[serde(default)]
    pub include_thread_id: bool,

    /// Include file and line information
    #[serde(default)]
    pub include_file_info: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            outputs: default_outputs(),
            include_thread_id: false,
            include_file_info: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_outputs() -> Vec<LogOutput> {
    vec![LogOutput::Stdout]
}

impl Validatable for LogConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        EnvFilter::try_new(&self.level)
            .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;
        if self.outputs.is_empty() {
            return Err(ConfigError::invalid_value(
                "logging.outputs",
                "at least one output is required",
            ));
        }
        for output in &self.outputs {
            if let LogOutput::File { path, .. } = output
                && path.is_empty()
            {
                return Err(ConfigError::missing_field_in_section("path", "logging.outputs"));
            }
        }
        Ok(())
    }
}

impl Configurable for LogConfig {
    fn apply_env_overrides(&mut self, prefix: &str) {
        EnvOverride::apply_string(&format!("{prefix}_LOG_LEVEL"), &mut self.level);
        EnvOverride::apply_parsed(&format!("{prefix}_LOG_FORMAT"), &mut self.format);
    }

    fn env_var_names(prefix: &str) -> Vec<String> {
        vec![format!("{prefix}_LOG_LEVEL"), format!("{prefix}_LOG_FORMAT")]
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format for log aggregation systems
    #[default]
    Json,
    /// Human-readable format for development
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(ConfigError::invalid_value(
                "logging.format",
                format!("unknown format '{other}', expected json or pretty"),
            )),
        }
    }
}

/// Log output target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LogOutput {
    /// Output to stdout
    Stdout,
    /// Output to file with optional rotation
    File {
        /// Directory path for log files
        path: String,
        /// Rotation configuration
        rotation: Option<RotationConfig>,
    },
}

/// Log rotation configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationConfig {
    /// Rotate logs hourly
    Hourly,
    /// Rotate logs daily
    Daily,
    /// Never rotate (single file)
    Never,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.outputs.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = LogConfig {
            level: "hiface_gateway=debug,info".to_string(),
            format: LogFormat::Pretty,
            outputs: vec![
                LogOutput::Stdout,
                LogOutput::File {
                    path: "/var/log/hiface".to_string(),
                    rotation: Some(RotationConfig::Daily),
                },
            ],
            include_thread_id: true,
            include_file_info: true,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: LogConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.level, "hiface_gateway=debug,info");
        assert_eq!(parsed.format, LogFormat::Pretty);
        assert_eq!(parsed.outputs.len(), 2);
    }

    #[test]
    fn test_validate_rejects_empty_outputs() {
        let config = LogConfig {
            outputs: Vec::new(),
            ..LogConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_file_path() {
        let config = LogConfig {
            outputs: vec![LogOutput::File {
                path: String::new(),
                rotation: None,
            }],
            ..LogConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField { .. })
        ));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
