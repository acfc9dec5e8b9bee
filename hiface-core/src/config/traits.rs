//! Configuration traits for validation and environment overrides.

use crate::error::ConfigError;

/// Trait for types that can be validated.
///
/// ```rust
/// use hiface_core::config::Validatable;
/// use hiface_core::error::ConfigError;
///
/// struct TimeoutConfig {
///     seconds: u64,
/// }
///
/// impl Validatable for TimeoutConfig {
///     fn validate(&self) -> Result<(), ConfigError> {
///         if self.seconds == 0 {
///             return Err(ConfigError::invalid_value("seconds", "must be positive"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Trait for types that support environment variable overrides.
///
/// ```rust,ignore
/// impl Configurable for CloudSettings {
///     fn apply_env_overrides(&mut self, prefix: &str) {
///         EnvOverride::apply_optional_string(&format!("{prefix}_REGION"), &mut self.region);
///     }
///
///     fn env_var_names(prefix: &str) -> Vec<String> {
///         vec![format!("{prefix}_REGION")]
///     }
/// }
/// ```
pub trait Configurable: Sized {
    /// Applies environment variable overrides to the configuration.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The environment variable prefix (e.g., "HIFACE")
    fn apply_env_overrides(&mut self, prefix: &str);

    /// Returns the environment variable names that can override this configuration.
    fn env_var_names(prefix: &str) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestConfig {
        value: i32,
    }

    impl Validatable for TestConfig {
        fn validate(&self) -> Result<(), ConfigError> {
            if self.value < 0 {
                return Err(ConfigError::invalid_value(
                    "value",
                    "Value must be non-negative",
                ));
            }
            Ok(())
        }
    }

    #[test]
    fn test_validatable_success() {
        let config = TestConfig { value: 10 };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validatable_failure() {
        let config = TestConfig { value: -1 };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("value"));
    }
}
