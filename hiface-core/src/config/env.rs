//! Environment variable override helpers.

/// Helpers for applying environment variable overrides to config fields.
///
/// Unset variables leave the target untouched; values that fail to parse
/// are ignored.
///
/// ```rust
/// use hiface_core::config::EnvOverride;
///
/// let mut region = Some("ap-guangzhou".to_string());
/// EnvOverride::apply_optional_string("HIFACE_DOC_UNSET_REGION", &mut region);
/// assert_eq!(region.as_deref(), Some("ap-guangzhou"));
/// ```
pub struct EnvOverride;

impl EnvOverride {
    /// Applies an environment variable override to a string value.
    pub fn apply_string(var_name: &str, target: &mut String) {
        if let Ok(value) = std::env::var(var_name) {
            *target = value;
        }
    }

    /// Applies an environment variable override to an optional string value.
    pub fn apply_optional_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(value) = std::env::var(var_name) {
            *target = Some(value);
        }
    }

    /// Applies an environment variable override to any `FromStr` value.
    pub fn apply_parsed<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(value) = std::env::var(var_name)
            && let Ok(parsed) = value.parse()
        {
            *target = parsed;
        }
    }
}
